//! The `datasets` subcommand.

use cli_test_dir::*;

#[test]
fn datasets_are_listed_in_load_order() {
    let testdir = TestDir::new("paintings_loader", "datasets_are_listed_in_load_order");
    let output = testdir
        .cmd()
        .args(["datasets", "--names-only"])
        .expect_success();
    assert_eq!(
        output.stdout_str(),
        "artist\ncanvas_size\nimage_link\nmuseum_hours\nmuseum\nproduct_size\nsubject\nwork\n"
    );
}

#[test]
fn datasets_show_their_file_names() {
    let testdir = TestDir::new("paintings_loader", "datasets_show_their_file_names");
    let output = testdir.cmd().arg("datasets").expect_success();
    assert!(output.stdout_str().contains("museum_hours   museum_hours.csv\n"));
    assert!(output.stdout_str().contains("work           work.csv\n"));
}
