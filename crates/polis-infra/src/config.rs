//! Configuration loader for Polis.
//!
//! Reads `polis.toml` from the data directory (`~/.polis/` in production)
//! and deserializes it into [`DatabaseConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::{Path, PathBuf};

use polis_types::config::DatabaseConfig;

use crate::sqlite::pool::database_url_for;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "POLIS_DATA_DIR";

/// Environment variable that overrides the configured database URL.
pub const DATABASE_URL_ENV: &str = "POLIS_DATABASE_URL";

/// Resolve the data directory: `POLIS_DATA_DIR`, then `~/.polis`, then
/// `./.polis` as a last resort.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".polis");
    }

    PathBuf::from(".polis")
}

/// Load database configuration from `{data_dir}/polis.toml`.
///
/// - Missing file: defaults.
/// - Unreadable or unparseable file: logs a warning, defaults.
/// - No `url` in the file: the `polis.db` file inside `data_dir`.
/// - `POLIS_DATABASE_URL`, when set, replaces whatever url was resolved.
pub async fn load_config(data_dir: &Path) -> DatabaseConfig {
    let mut config = read_config_file(&data_dir.join("polis.toml")).await;

    if config.url.is_none() {
        config.url = Some(database_url_for(data_dir));
    }

    if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
        tracing::debug!("{DATABASE_URL_ENV} overrides configured database url");
        config.url = Some(url);
    }

    config
}

async fn read_config_file(config_path: &Path) -> DatabaseConfig {
    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No polis.toml found at {}, using defaults", config_path.display());
            return DatabaseConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return DatabaseConfig::default();
        }
    };

    match toml::from_str::<DatabaseConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            DatabaseConfig::default()
        }
    }
}
