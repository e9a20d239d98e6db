use anyhow::{Context, Result};
use clap::Parser;
use std::env;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "JSON CRUD API for student and user records")]
pub struct Args {
    /// Host to bind to (overrides RECORD_STORE_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides RECORD_STORE_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides RECORD_STORE_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        Self::from_args(Args::parse())
    }

    /// Merge already-parsed CLI args with the environment. CLI values win.
    pub fn from_args(args: Args) -> Result<(Self, bool)> {
        let host = match args.host {
            Some(host) => host,
            None => env::var("RECORD_STORE_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        };

        let port = match args.port {
            Some(port) => port,
            None => match env::var("RECORD_STORE_PORT") {
                Ok(value) => value
                    .parse::<u16>()
                    .with_context(|| format!("parsing RECORD_STORE_PORT value `{}`", value))?,
                Err(env::VarError::NotPresent) => 8000,
                Err(err) => return Err(err).context("reading RECORD_STORE_PORT"),
            },
        };

        let database_url = match args.database_url {
            Some(url) => url,
            None => env::var("RECORD_STORE_DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://./data/records.db".into()),
        };

        Ok((
            Self {
                host,
                port,
                database_url,
            },
            args.migrate,
        ))
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_values_take_precedence() {
        let args = Args::try_parse_from([
            "record-store",
            "--host",
            "127.0.0.1",
            "--port",
            "9090",
            "--database-url",
            "sqlite::memory:",
            "--migrate",
        ])
        .unwrap();

        let (cfg, migrate) = AppConfig::from_args(args).unwrap();
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.database_url, "sqlite::memory:");
        assert_eq!(cfg.addr(), "127.0.0.1:9090");
        assert!(migrate);
    }

    #[test]
    fn rejects_non_numeric_port_flag() {
        let parsed = Args::try_parse_from(["record-store", "--port", "eighty"]);
        assert!(parsed.is_err());
    }
}
