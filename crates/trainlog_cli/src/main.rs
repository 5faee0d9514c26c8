//! trainlog terminal front end.
//!
//! # Responsibility
//! - Resolve configuration and start logging before any session work.
//! - Run one interactive session over stdin/stdout; records live until exit.

mod config;
mod session;

use anyhow::{anyhow, Result};
use clap::Parser;
use log::info;
use std::io;

fn main() -> Result<()> {
    let cli = config::Cli::parse();
    let (level, target) = cli.log_settings();
    trainlog_core::init_logging(&level, target)
        .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;
    info!(
        "event=session_start module=cli status=ok core_version={}",
        trainlog_core::core_version()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = session::Session::new(cli.json).run(stdin.lock(), stdout.lock());
    trainlog_core::flush_logging();
    result
}
