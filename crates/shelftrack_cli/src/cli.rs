//! Command-line flags; each one can also be set through a `SHELFTRACK_*`
//! environment variable.

use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser};
use shelftrack_core::db::DEFAULT_DB_FILE_NAME;

#[derive(Parser, Debug)]
#[command(
    name = "shelftrack",
    author,
    version,
    about = "Menu-driven bookstore inventory backed by a local SQLite file."
)]
pub struct Cli {
    /// Path to the SQLite inventory database (created when missing).
    #[arg(long, value_name = "PATH", env = "SHELFTRACK_DB", default_value = DEFAULT_DB_FILE_NAME)]
    pub db: PathBuf,

    /// Log level: trace, debug, info, warn or error.
    #[arg(long = "log-level", value_name = "LEVEL", env = "SHELFTRACK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files. Logging is disabled when unset.
    #[arg(long = "log-dir", value_name = "DIR", env = "SHELFTRACK_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Do not insert the default catalogue on startup.
    #[arg(
        long = "no-seed",
        env = "SHELFTRACK_NO_SEED",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub no_seed: bool,
}
