use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Startup configuration. A missing file is created with defaults on first
/// run, which leaves the app in local-storage mode until a realtime database
/// URL is filled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the realtime database, e.g.
    /// "https://my-club.firebaseio.com". `None` skips the probe entirely.
    pub realtime_url: Option<String>,

    /// How long the startup probe waits before falling back to local storage.
    pub probe_timeout_secs: u64,

    /// Local database filename, relative to the platform data directory.
    pub local_db_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            realtime_url: None,
            probe_timeout_secs: 3,
            local_db_file: "roster.db".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            let default_config = Self::default();
            default_config.save()?;
            Ok(default_config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("courtside").join("config.toml"))
    }

    pub fn local_db_path(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(data_dir.join("courtside").join(&self.local_db_file))
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}
