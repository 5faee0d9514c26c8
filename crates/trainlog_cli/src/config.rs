//! Command-line and environment configuration.

use clap::Parser;
use std::path::PathBuf;
use trainlog_core::{default_log_level, LogTarget};

/// Level used when logs share the terminal with the session.
const STDERR_DEFAULT_LEVEL: &str = "warn";

#[derive(Parser, Debug)]
#[command(name = "trainlog", version, about = "Log distance-training entries by date", long_about = None)]
pub struct Cli {
    /// Log level: trace|debug|info|warn|error
    #[arg(long, env = "TRAINLOG_LOG_LEVEL", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rotating log files (logs go to stderr when unset)
    #[arg(long, env = "TRAINLOG_LOG_DIR", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Print the record list as JSON after each command
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Resolves the effective log level and target.
    pub fn log_settings(&self) -> (String, LogTarget) {
        match &self.log_dir {
            Some(dir) => (
                self.log_level
                    .clone()
                    .unwrap_or_else(|| default_log_level().to_string()),
                LogTarget::Directory(dir.clone()),
            ),
            None => (
                self.log_level
                    .clone()
                    .unwrap_or_else(|| STDERR_DEFAULT_LEVEL.to_string()),
                LogTarget::Stderr,
            ),
        }
    }
}
