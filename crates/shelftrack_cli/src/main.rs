//! `shelftrack` binary entry point.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use shelftrack_cli::cli::Cli;
use shelftrack_cli::config::AppConfig;
use shelftrack_cli::menu::{run_session, Console};
use shelftrack_core::db::open_db;
use shelftrack_core::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = AppConfig::from_cli(cli)?;

    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir).context("failed to initialize logging")?;
    }
    info!("event=cli_start module=cli status=ok seed={}", config.seed);

    let conn = open_db(&config.db_path).with_context(|| {
        format!("failed to open database `{}`", config.db_path.display())
    })?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    run_session(&conn, config.seed, &mut console)
}
