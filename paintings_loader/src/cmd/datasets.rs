//! The `datasets` subcommand.

use clap::Parser;

use crate::common::*;

/// Dataset listing arguments.
#[derive(Debug, Parser)]
pub(crate) struct Opt {
    /// Print only the dataset names.
    #[clap(long = "names-only")]
    names_only: bool,
}

/// List our datasets.
pub(crate) fn run(opt: Opt) -> Result<()> {
    for dataset in DatasetName::all() {
        if opt.names_only {
            println!("{}", dataset);
        } else {
            println!("{:<14} {}", dataset, dataset.csv_file_name());
        }
    }
    Ok(())
}
