//! Server configuration parsed from environment variables.
//!
//! `main` loads a `.env` file (if present) with `dotenvy` before calling
//! [`Config::from_env`]. Parsing is written against a lookup function so tests
//! can feed a map instead of mutating the process environment.

use storable::DEFAULT_MAX_DEPTH;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("invalid {var}: '{value}' (expected true/false/1/0)")]
    InvalidBool { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Postgres URL. When absent the server keeps canvases in memory.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub sanitize_max_depth: usize,
    /// Turn `item_N` mappings back into nested sequences on load.
    pub restore_on_load: bool,
}

impl Config {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `DATABASE_URL`: in-memory store when absent or empty
    /// - `DATABASE_MAX_CONNECTIONS`: default 5
    /// - `SANITIZE_MAX_DEPTH`: default 256
    /// - `RESTORE_ON_LOAD`: default false
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `PORT` or `RESTORE_ON_LOAD` is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let database_max_connections =
            parse_or(lookup("DATABASE_MAX_CONNECTIONS"), DEFAULT_DATABASE_MAX_CONNECTIONS);
        let sanitize_max_depth = parse_or(lookup("SANITIZE_MAX_DEPTH"), DEFAULT_MAX_DEPTH);
        let restore_on_load = parse_bool("RESTORE_ON_LOAD", lookup("RESTORE_ON_LOAD"))?;

        Ok(Self { port, database_url, database_max_connections, sanitize_max_depth, restore_on_load })
    }
}

/// Tuning values fall back to their default when missing or malformed.
fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}

fn parse_bool(var: &'static str, raw: Option<String>) -> Result<bool, ConfigError> {
    let Some(raw) = raw else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "0" => Ok(false),
        "true" | "1" => Ok(true),
        _ => Err(ConfigError::InvalidBool { var, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
