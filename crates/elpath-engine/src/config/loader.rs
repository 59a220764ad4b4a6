use super::schema::ElpathConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from default locations:
    /// 1. ./elpath.yaml
    /// 2. ~/.elpath/config.yaml
    /// 3. Default configuration
    pub async fn load_default() -> Result<ElpathConfig, ConfigError> {
        let local_config = PathBuf::from("./elpath.yaml");
        if local_config.exists() {
            return Self::load_from(&local_config).await;
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".elpath").join("config.yaml");
            if home_config.exists() {
                return Self::load_from(&home_config).await;
            }
        }

        Ok(ElpathConfig::default())
    }

    pub async fn load_from(path: &Path) -> Result<ElpathConfig, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        let mut config: ElpathConfig = serde_yaml::from_str(&content)?;

        let relative_to_config = match (&config.definitions, path.parent()) {
            (Some(definitions), Some(dir)) if definitions.is_relative() => {
                Some(dir.join(definitions))
            }
            _ => None,
        };
        if relative_to_config.is_some() {
            config.definitions = relative_to_config;
        }
        Ok(config)
    }
}
