use cli_test_dir::*;
use std::{env, process::Command};

mod config;
mod datasets;
mod load;

/// The URL of our test database.
pub(crate) fn postgres_test_url() -> String {
    env::var("POSTGRES_TEST_URL").unwrap_or_else(|_| {
        "postgres://postgres:@localhost:5432/paintings_loader_test?sslmode=disable"
            .to_owned()
    })
}

/// Build a command which ignores the caller's own configuration file and
/// environment, so that tests only see what they set up themselves.
pub(crate) fn isolated_cmd(testdir: &TestDir) -> Command {
    let mut cmd = testdir.cmd();
    cmd.env("PAINTINGS_LOADER_CONFIG_DIR", testdir.path("config"))
        .env_remove("DATABASE_URL")
        .env_remove("PAINTINGS_SOURCE_DIR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_flag() {
    let testdir = TestDir::new("paintings_loader", "help_flag");
    let output = testdir.cmd().arg("--help").expect_success();
    assert!(output.stdout_str().contains("paintings_loader"));
    assert!(output.stdout_str().contains("load"));
}

#[test]
fn version_flag() {
    let testdir = TestDir::new("paintings_loader", "version_flag");
    let output = testdir.cmd().arg("--version").expect_success();
    assert!(output.stdout_str().contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_log_format_is_rejected() {
    let testdir = TestDir::new("paintings_loader", "unknown_log_format_is_rejected");
    let output = testdir
        .cmd()
        .args(["--log-format", "xml", "datasets"])
        .expect_failure();
    assert!(output.stderr_str().contains("xml"));
}
