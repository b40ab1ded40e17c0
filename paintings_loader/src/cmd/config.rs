//! The `config` subcommand.

use std::env;

use clap::Parser;

use crate::common::*;
use crate::config::{Configuration, Overrides, Settings};

/// Configuration arguments.
#[derive(Debug, Parser)]
pub(crate) struct Opt {
    /// The command to perform.
    #[clap(subcommand)]
    command: Command,
}

/// A configuration command.
#[derive(Debug, Parser)]
pub(crate) enum Command {
    /// Show the configuration file path and the effective settings.
    #[clap(name = "show")]
    Show,
}

/// Run a configuration command.
pub(crate) fn run(config: Configuration, opt: Opt) -> Result<()> {
    match opt.command {
        Command::Show => {
            let settings =
                Settings::resolve(&config, Overrides::default(), |name| env::var(name).ok())?;
            println!("config_file = {}", config.path().display());
            println!("source_dir = {}", settings.source_dir.display());
            match &settings.database_url {
                Some(url) => println!("database_url = {}", url),
                None => println!("database_url = (not set)"),
            }
            match &settings.table_schema {
                Some(schema) => println!("table_schema = {}", schema),
                None => println!("table_schema = (default search_path)"),
            }
            println!("replace_mode = {}", settings.replace_mode);
        }
    }
    Ok(())
}
