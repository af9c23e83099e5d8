//! Database configuration types for Polis.
//!
//! `DatabaseConfig` is read from `polis.toml` in the data directory. Every
//! field has a default so an empty or missing file is valid.

use serde::{Deserialize, Serialize};

/// Connection settings for the SQLite session provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL, e.g. `sqlite:///home/me/.polis/polis.db`.
    ///
    /// `None` means "the `polis.db` file in the data directory".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Upper bound on simultaneously open sessions.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait on a locked database before failing the operation.
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    1
}

fn default_busy_timeout_secs() -> u64 {
    5
}

impl DatabaseConfig {
    /// Default settings pointed at a specific database URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            busy_timeout_secs: default_busy_timeout_secs(),
        }
    }
}
