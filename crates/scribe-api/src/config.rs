//! Process configuration from environment variables.
//!
//! | Variable | Default | |
//! |---|---|---|
//! | `DATABASE_URL` | (required) | PostgreSQL connection string |
//! | `HOST` | `0.0.0.0` | Listen address |
//! | `PORT` | `8000` | Listen port |
//! | `DB_MAX_CONNECTIONS` | `10` | Pool size |
//! | `DB_CONNECT_TIMEOUT_SECS` | `30` | Pool acquire timeout |
//!
//! A `.env` file is loaded first when present.

use std::net::SocketAddr;

use scribe_core::{Error, Result};
use scribe_db::PoolConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub pool: PoolConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::Config("DATABASE_URL must be set".to_string()))?;

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("PORT must be a valid port number, got {raw:?}")))?,
            None => DEFAULT_PORT,
        };

        let pool = PoolConfig::from_lookup(&lookup)?;

        Ok(Self {
            database_url,
            host,
            port,
            pool,
        })
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| Error::Config(format!("invalid listen address {}:{}", self.host, self.port)))
    }
}
