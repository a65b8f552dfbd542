//! TOML-backed dismiss flags

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::warn;

use crate::application::ports::DismissStore;
use crate::domain::error::ConfigError;

/// File name of the flag store, kept next to the config file
pub const FLAGS_FILE: &str = "flags.toml";

/// Boolean flags persisted as a flat TOML table
pub struct TomlFlagStore {
    path: PathBuf,
}

impl TomlFlagStore {
    /// Store flags in `dir/flags.toml`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(FLAGS_FILE),
        }
    }

    async fn read(&self) -> Result<BTreeMap<String, bool>, ConfigError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl DismissStore for TomlFlagStore {
    async fn is_dismissed(&self, key: &str) -> bool {
        match self.read().await {
            Ok(flags) => flags.get(key).copied().unwrap_or(false),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Unreadable flag file");
                false
            }
        }
    }

    async fn dismiss(&self, key: &str) -> Result<(), ConfigError> {
        let mut flags = match self.read().await {
            Ok(flags) => flags,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Replacing unreadable flag file");
                BTreeMap::new()
            }
        };
        flags.insert(key.to_string(), true);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content =
            toml::to_string(&flags).map_err(|e| ConfigError::WriteError(e.to_string()))?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}
