//! Configuration management for the betpool core

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct AppConfig {
    pub indexer: IndexerConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct IndexerConfig {
    #[validate(url)]
    pub endpoint: String,
    #[validate(range(min = 1, max = 1000))]
    pub page_size: usize,
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AuthConfig {
    /// Maximum age of a signed action timestamp before it is rejected.
    #[validate(range(min = 1, max = 86400))]
    pub max_age_secs: u64,
    /// Tolerance for client clocks running ahead of ours.
    #[validate(range(min = 0, max = 3600))]
    pub max_future_skew_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the durable likedComments map.
    pub likes_path: PathBuf,
    /// Quiet period before pending like updates are flushed.
    #[validate(range(min = 10, max = 60000))]
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MonitoringConfig {
    pub log_level: String,
    pub structured_logging: bool,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000/subgraphs/name/betpool".to_string(),
            page_size: 20,
            request_timeout_secs: 30,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            max_age_secs: 600,
            max_future_skew_secs: 60,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            likes_path: "./data/social".into(),
            debounce_ms: 1000,
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            structured_logging: false,
        }
    }
}

impl AuthConfig {
    pub fn max_age(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.max_age_secs as i64)
    }

    pub fn max_future_skew(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.max_future_skew_secs as i64)
    }
}

impl StorageConfig {
    pub fn debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_ms)
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;

        config.validate()?;

        Ok(config)
    }

    /// Ensure required directories exist
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.storage.likes_path)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(&self.indexer)?;
        Validate::validate(&self.auth)?;
        Validate::validate(&self.storage)?;
        if self.indexer.endpoint.is_empty() {
            return Err(anyhow::anyhow!("Indexer endpoint cannot be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.storage.debounce_ms, 1000);
        assert_eq!(config.auth.max_age_secs, 600);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [indexer]
            endpoint = "http://indexer.betpool.local/graphql"
            "#,
        )
        .unwrap();
        assert_eq!(config.indexer.endpoint, "http://indexer.betpool.local/graphql");
        assert_eq!(config.indexer.page_size, 20);
        assert_eq!(config.monitoring.log_level, "info");
    }

    #[test]
    fn ensure_directories_creates_likes_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.storage.likes_path = dir.path().join("social");
        config.ensure_directories().unwrap();
        assert!(config.storage.likes_path.is_dir());
    }

    #[test]
    fn out_of_range_page_size_rejected() {
        let config: AppConfig = toml::from_str(
            r#"
            [indexer]
            page_size = 0
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
