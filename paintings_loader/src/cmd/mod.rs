//! Command parsing.

use clap::{Parser, Subcommand};

use crate::common::*;
use crate::config::Configuration;
use crate::logging::LogFormat;

pub(crate) mod config;
pub(crate) mod datasets;
pub(crate) mod load;

/// Command-line options, parsed using `clap`.
#[derive(Debug, Parser)]
#[clap(
    name = "paintings_loader",
    version,
    about = "Load the paintings CSV datasets into PostgreSQL, replacing each table."
)]
pub(crate) struct Opt {
    /// Log format [values: indented, flat, json].
    #[clap(long = "log-format", global = true, default_value_t)]
    pub(crate) log_format: LogFormat,

    /// The command to run.
    #[clap(subcommand)]
    pub(crate) cmd: Command,
}

/// The command to run.
#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Load every dataset, replacing its table.
    #[clap(after_help = r#"EXAMPLE:
    paintings_loader load --source-dir ./archive \
        --database-url postgres://postgres@localhost:5432/paintings
"#)]
    Load {
        #[clap(flatten)]
        command: load::Opt,
    },

    /// List the datasets we load, in load order.
    Datasets {
        #[clap(flatten)]
        command: datasets::Opt,
    },

    /// Configuration-related commands.
    Config {
        #[clap(flatten)]
        command: config::Opt,
    },
}

pub(crate) async fn run(ctx: Context, config: Configuration, opt: Opt) -> Result<()> {
    match opt.cmd {
        Command::Load { command } => load::run(ctx, config, command).await,
        Command::Datasets { command } => datasets::run(command),
        Command::Config { command } => config::run(config, command),
    }
}
