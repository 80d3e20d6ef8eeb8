//! Configuration loading and representation.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://web_forms.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 5000);
pub const DEFAULT_SNAPSHOT_DIR: &str = ".";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Root directory for print snapshots.
    pub snapshot_dir: PathBuf,
    pub db_max_connections: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    ///
    /// Unset variables take their default silently; set but unparseable ones
    /// take it with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let snapshot_dir = lookup("SNAPSHOT_DIR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SNAPSHOT_DIR.to_string());

        Self {
            database_url,
            bind_addr: parsed(&lookup, "BIND_ADDR", || DEFAULT_BIND_ADDR),
            snapshot_dir: PathBuf::from(snapshot_dir),
            db_max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS", || DEFAULT_DB_MAX_CONNECTIONS)
                .max(1),
        }
    }
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: impl FnOnce() -> T,
) -> T {
    match lookup(key) {
        None => default(),
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "invalid configuration value; using default");
            default()
        }),
    }
}
