use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub db_path: Option<PathBuf>,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
}

/// Parsed value, or `default` when the variable is unset or unparseable.
fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.parse::<T>().ok()).unwrap_or(default)
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    parse_or(std::env::var(key).ok(), default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let db_path = std::env::var("DB_PATH").ok().map(PathBuf::from);
        let database_url = match (std::env::var("DATABASE_URL"), &db_path) {
            (Ok(url), _) => url,
            (Err(_), Some(path)) => format!("sqlite://{}", path.display()),
            (Err(e), None) => {
                return Err(e).context("DATABASE_URL or DB_PATH must be set");
            }
        };
        let max_connections = env_or::<u32>("DB_MAX_CONNECTIONS", 5);
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = env_or::<u16>("APP_PORT", 8080);
        Ok(Self {
            database_url,
            db_path,
            max_connections,
            host,
            port,
        })
    }

    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }

    /// Path of the database file, falling back to the one embedded in a
    /// `sqlite://` url.
    pub fn database_file(&self) -> Option<PathBuf> {
        if let Some(path) = &self.db_path {
            return Some(path.clone());
        }
        let rest = self
            .database_url
            .strip_prefix("sqlite://")
            .or_else(|| self.database_url.strip_prefix("sqlite:"))?;
        let path = rest.split('?').next().unwrap_or_default();
        if path.is_empty() || path == ":memory:" {
            None
        } else {
            Some(PathBuf::from(path))
        }
    }
}
