use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::tui::app::AppOptions;

pub const KEYS: [&str; 4] = ["data_dir", "log_file", "log_level", "empty_list_opens_add"];

const FALLBACK_DATA_DIR: &str = "exdb";
const LOG_FILE_NAME: &str = "checklist.log";

/// Settings read from `config.toml`. Every field is optional; unset fields
/// fall back to the defaults below.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_list_opens_add: Option<bool>,
}

impl Config {
    /// A missing config file is not an error: it means all defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&get_config_file_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&get_config_file_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content = toml::to_string(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        fs::write(config_path, content)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<(), ConfigError> {
        match key {
            "data_dir" => self.data_dir = Some(value),
            "log_file" => self.log_file = Some(value),
            "log_level" => {
                LevelFilter::from_str(&value)
                    .map_err(|_| ConfigError::InvalidValue(key.to_string(), value.clone()))?;
                self.log_level = Some(value);
            }
            "empty_list_opens_add" => {
                let flag = value
                    .parse::<bool>()
                    .map_err(|_| ConfigError::InvalidValue(key.to_string(), value.clone()))?;
                self.empty_list_opens_add = Some(flag);
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// The effective value of `key`, defaults included.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "data_dir" => self.data_dir().display().to_string(),
            "log_file" => self.log_file().display().to_string(),
            "log_level" => self.log_level().to_string().to_lowercase(),
            "empty_list_opens_add" => self.app_options().empty_list_opens_add.to_string(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        Ok(value)
    }

    pub fn data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => PathBuf::from(dir),
            None => default_base_dir()
                .map(|base| base.join("db"))
                .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR)),
        }
    }

    pub fn log_file(&self) -> PathBuf {
        match &self.log_file {
            Some(file) => PathBuf::from(file),
            None => default_base_dir()
                .map(|base| base.join(LOG_FILE_NAME))
                .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME)),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|level| LevelFilter::from_str(level).ok())
            .unwrap_or(LevelFilter::Info)
    }

    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            empty_list_opens_add: self.empty_list_opens_add.unwrap_or(false),
        }
    }
}

fn default_base_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("checklist"))
}

fn get_config_file_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?;

    Ok(config_dir.join("checklist").join("config.toml"))
}

#[derive(Debug)]
pub enum ConfigError {
    ConfigDirNotFound,
    UnknownKey(String),
    InvalidValue(String, String),
    ReadError(String),
    WriteError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigDirNotFound => {
                write!(f, "Could not find config directory")
            }
            ConfigError::UnknownKey(key) => {
                write!(f, "Unknown configuration key '{}'. Known keys: {}", key, KEYS.join(", "))
            }
            ConfigError::InvalidValue(key, value) => {
                write!(f, "Invalid value '{}' for configuration key '{}'", value, key)
            }
            ConfigError::ReadError(msg) => {
                write!(f, "Failed to read config file: {}", msg)
            }
            ConfigError::WriteError(msg) => {
                write!(f, "Failed to write config file: {}", msg)
            }
            ConfigError::ParseError(msg) => {
                write!(f, "Failed to parse config file: {}", msg)
            }
            ConfigError::SerializeError(msg) => {
                write!(f, "Failed to serialize config: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
