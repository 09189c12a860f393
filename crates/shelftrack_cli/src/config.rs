//! Runtime configuration resolved from command-line flags and environment.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use shelftrack_core::default_log_level;

use crate::cli::Cli;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute log directory; `None` keeps logging off.
    pub log_dir: Option<PathBuf>,
    pub seed: bool,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        Self::resolve(cli, &cwd)
    }

    /// Resolves relative log directories against `cwd`.
    pub fn resolve(cli: &Cli, cwd: &Path) -> Result<Self> {
        if cli.db.as_os_str().is_empty() {
            bail!("database path cannot be empty");
        }

        let log_level = match cli.log_level.as_deref().map(str::trim) {
            Some(level) if !level.is_empty() => level.to_string(),
            _ => default_log_level().to_string(),
        };

        let log_dir = cli
            .log_dir
            .as_ref()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| {
                if dir.is_absolute() {
                    dir.clone()
                } else {
                    cwd.join(dir)
                }
            });

        Ok(Self {
            db_path: cli.db.clone(),
            log_level,
            log_dir,
            seed: !cli.no_seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;
    use crate::cli::Cli;
    use clap::Parser;
    use std::path::{Path, PathBuf};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("shelftrack").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn explicit_flags_are_applied() {
        let cli = parse(&[
            "--db",
            "/tmp/store.db",
            "--log-level",
            "warn",
            "--log-dir",
            "/var/log/shelftrack",
            "--no-seed",
        ]);
        let config = AppConfig::resolve(&cli, Path::new("/home/op")).unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/store.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/shelftrack")));
        assert!(!config.seed);
    }

    #[test]
    fn relative_log_dir_is_anchored_to_cwd() {
        let cli = parse(&["--db", "store.db", "--log-dir", "logs"]);
        let config = AppConfig::resolve(&cli, Path::new("/home/op")).unwrap();

        assert_eq!(config.log_dir, Some(PathBuf::from("/home/op/logs")));
        assert!(config.seed);
    }

    #[test]
    fn blank_level_and_dir_fall_back_to_defaults() {
        let cli = Cli {
            db: PathBuf::from("store.db"),
            log_level: Some(" ".to_string()),
            log_dir: Some(PathBuf::new()),
            no_seed: false,
        };
        let config = AppConfig::resolve(&cli, Path::new("/home/op")).unwrap();

        assert_eq!(config.log_level, shelftrack_core::default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn empty_db_path_is_rejected() {
        let cli = Cli {
            db: PathBuf::new(),
            log_level: None,
            log_dir: None,
            no_seed: false,
        };
        let err = AppConfig::resolve(&cli, Path::new("/home/op")).unwrap_err();
        assert!(err.to_string().contains("database path"));
    }
}
