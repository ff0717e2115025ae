//! Command line and environment configuration.

use std::net::SocketAddr;
use std::path::Path;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_DB_URL: &str = "sqlite://trivia.sqlite3";
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_LOG_FILTER: &str = "trivia_api=debug,services=debug,tower=info";

/// `RUST_LOG` when it is set and parses, otherwise [`DEFAULT_LOG_FILTER`].
#[must_use]
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// SQLite database URL or plain file path.
    #[arg(long = "db", env = "TRIVIA_DB_URL", default_value = DEFAULT_DB_URL, global = true)]
    pub db_url: String,

    /// The address to bind to.
    #[arg(short, long, env = "TRIVIA_ADDRESS", default_value = DEFAULT_ADDRESS, global = true)]
    pub address: SocketAddr,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Command {
    /// Serve the HTTP API.
    #[default]
    Serve,
    /// Load the sample catalogue into the database and exit.
    Seed,
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.unwrap_or_default()
    }

    /// Database URL in the `sqlite://` form sqlx expects.
    #[must_use]
    pub fn database_url(&self) -> String {
        normalize_sqlite_url(&self.db_url)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid --db value: {raw}")]
    InvalidDbUrl { raw: String },
    #[error("could not prepare database file: {0}")]
    Io(#[from] std::io::Error),
}

fn is_in_memory(db_url: &str) -> bool {
    db_url == "sqlite::memory:" || db_url.contains("mode=memory")
}

/// Bare paths and `sqlite:path` become `sqlite://path`.
#[must_use]
pub fn normalize_sqlite_url(raw: &str) -> String {
    let raw = raw.trim();
    if is_in_memory(raw) || raw.starts_with("sqlite://") {
        return raw.to_owned();
    }
    let path = raw.strip_prefix("sqlite:").unwrap_or(raw);
    format!("sqlite://{path}")
}

/// Create the database file and its parent directory when missing.
///
/// # Errors
///
/// Returns `ConfigError::InvalidDbUrl` when no file path can be extracted, or
/// `ConfigError::Io` if the filesystem refuses.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), ConfigError> {
    if is_in_memory(db_url) {
        return Ok(());
    }

    let invalid = || ConfigError::InvalidDbUrl {
        raw: db_url.to_owned(),
    };
    let path = db_url.strip_prefix("sqlite://").ok_or_else(invalid)?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(invalid());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}
