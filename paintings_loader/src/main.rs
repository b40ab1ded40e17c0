//! A CLI tool for loading the paintings CSV datasets into PostgreSQL.

#![warn(rust_2018_idioms, unused_extern_crates, clippy::all)]

use clap::Parser;

mod cmd;
mod config;
mod context;
mod csv_table;
mod database_url;
mod dataset;
mod drivers;
mod loader;
mod logging;
mod replace_mode;
mod tls;

/// Definitions included by all the files in this crate.
///
/// This forms the dialect of Rust we use for the loader and its drivers, with
/// an emphasis on `anyhow` errors and `tracing` spans.
#[allow(unused_imports)]
pub(crate) mod common {
    pub(crate) use anyhow::{format_err, Context as _, Error, Result};
    pub(crate) use async_trait::async_trait;
    pub(crate) use futures::{Future, FutureExt, SinkExt, TryFutureExt};
    pub(crate) use tracing::{
        debug, debug_span, error, info, info_span, instrument, trace, warn,
        Instrument,
    };
    pub(crate) use url::Url;

    pub(crate) use crate::{
        context::{BoxFuture, Context},
        csv_table::{Column, CsvTable, DataType, Value},
        database_url::DatabaseUrl,
        dataset::DatasetName,
        drivers::postgres_shared::PgName,
        replace_mode::ReplaceMode,
    };
}

use crate::common::*;
use crate::config::Configuration;

fn main() -> Result<()> {
    let opt = cmd::Opt::parse();
    logging::init_logging(opt.log_format)?;
    debug!("{:?}", opt);

    let config = Configuration::try_default()?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("could not start async runtime")?;
    runtime.block_on(run(config, opt))
}

/// Run our command, along with any background workers it starts.
async fn run(config: Configuration, opt: cmd::Opt) -> Result<()> {
    let (ctx, worker_fut) = Context::create();
    let cmd_fut = cmd::run(ctx, config, opt);
    futures::try_join!(cmd_fut, worker_fut)?;
    Ok(())
}
