use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub token_cache: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    pub theme: String,
    pub date_format: String,
    pub default_view: String,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("odonto-agenda")
            .join("config.toml")
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .expect("Failed to serialize config");
        std::fs::write(&config_path, content)?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("odonto-agenda");

        Self {
            api: ApiConfig {
                base_url: "http://localhost:5000/api".to_string(),
                token_cache: config_dir.join("session.json"),
            },
            ui: UiConfig {
                theme: "default".to_string(),
                date_format: "%d/%m/%Y".to_string(),
                default_view: "Month".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_local_backend() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
    }

    #[test]
    fn default_config_uses_brazilian_date_format() {
        let config = Config::default();
        assert_eq!(config.ui.date_format, "%d/%m/%Y");
    }

    #[test]
    fn parse_valid_toml_config() {
        let toml_content = r#"
            [api]
            base_url = "https://clinic.example.com/api"
            token_cache = "/tmp/session.json"

            [ui]
            theme = "nord"
            date_format = "%Y-%m-%d"
            default_view = "Day"
        "#;

        let config = Config::from_toml(toml_content).unwrap();

        assert_eq!(config.api.base_url, "https://clinic.example.com/api");
        assert_eq!(config.ui.theme, "nord");
        assert_eq!(config.ui.default_view, "Day");
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let invalid_toml = "this is not valid toml";
        let result = Config::from_toml(invalid_toml);
        assert!(result.is_err());
    }
}
