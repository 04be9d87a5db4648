use std::env;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

use crate::blockchain::DEFAULT_MAX_ATTEMPTS;
use crate::error::{LedgerError, Result};

/// Node settings, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    /// Identifier credited with mining rewards.
    pub node_id: String,
    pub peer_timeout: Duration,
    pub resolve_concurrency: usize,
    pub pow_max_attempts: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            node_id: new_node_id(),
            peer_timeout: Duration::from_secs(5),
            resolve_concurrency: 4,
            pow_max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl NodeConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            node_id: lookup("NODE_ID")
                .filter(|id| !id.trim().is_empty())
                .unwrap_or(defaults.node_id),
            peer_timeout: Duration::from_secs(parse_or(
                &lookup,
                "PEER_TIMEOUT_SECS",
                defaults.peer_timeout.as_secs(),
            )?),
            resolve_concurrency: parse_or(&lookup, "RESOLVE_CONCURRENCY", defaults.resolve_concurrency)?,
            pow_max_attempts: parse_or(&lookup, "POW_MAX_ATTEMPTS", defaults.pow_max_attempts)?,
        })
    }
}

/// Random identifier: a v4 UUID without dashes.
pub fn new_node_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| LedgerError::Config(format!("{key}={raw:?}: {e}"))),
    }
}
