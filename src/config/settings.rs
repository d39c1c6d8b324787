use anyhow::{Context, Result, bail};
use std::path::PathBuf;

pub const MEMORY_DATABASE_URL: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub url: String,
    pub name: String,
    pub connect_timeout_secs: u64,
    pub busy_timeout_ms: u64,
    pub max_connections: u32,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            url: MEMORY_DATABASE_URL.to_string(),
            name: "poker_ledger".to_string(),
            connect_timeout_secs: 5,
            busy_timeout_ms: 5000,
            max_connections: 8,
        }
    }
}

impl StoreSettings {
    /// Resolves the connection string into the SQLite file the pool opens.
    ///
    /// `DATABASE_URL` names a directory (optionally `sqlite://`-prefixed);
    /// the database file inside it is `<name>.db`.
    pub fn location(&self) -> StoreLocation {
        let trimmed = self.url.trim();
        let directory = trimmed.strip_prefix("sqlite://").unwrap_or(trimmed);

        if directory == MEMORY_DATABASE_URL {
            return StoreLocation::Memory;
        }

        StoreLocation::File(PathBuf::from(directory).join(format!("{}.db", self.name)))
    }
}

#[derive(Debug, Clone)]
pub struct QuerySettings {
    pub recent_sessions_limit: usize,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            recent_sessions_limit: 50,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub store: StoreSettings,
    pub queries: QuerySettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = StoreSettings::default();

        let url = match lookup("DATABASE_URL") {
            Some(url) if !url.trim().is_empty() => url,
            _ => bail!("DATABASE_URL must be set"),
        };

        let store = StoreSettings {
            url,
            name: lookup("DATABASE_NAME")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(defaults.name),
            connect_timeout_secs: parse_or(&lookup, "DATABASE_TIMEOUT_SECS", defaults.connect_timeout_secs)?,
            busy_timeout_ms: parse_or(&lookup, "DATABASE_BUSY_TIMEOUT_MS", defaults.busy_timeout_ms)?,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
        };

        Ok(Self {
            store,
            queries: QuerySettings::default(),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
