use std::env;
use std::fs;
use std::path::PathBuf;

use leadline_core::rules::{validate_soon_days, MAX_PAGE_SIZE};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "leadline";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_SOON_DAYS: i64 = 7;
pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const DEFAULT_LEAD_SOURCE: &str = "Website";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub worklist_soon_days: i64,
    pub default_page_size: i64,
    pub default_lead_source: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            worklist_soon_days: DEFAULT_SOON_DAYS,
            default_page_size: DEFAULT_PAGE_SIZE,
            default_lead_source: DEFAULT_LEAD_SOURCE.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid worklist_soon_days value: {0}")]
    InvalidSoonDays(i64),
    #[error("invalid default_page_size value: {0}")]
    InvalidPageSize(i64),
    #[error("invalid default_lead_source value")]
    InvalidLeadSource,
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    worklist_soon_days: Option<i64>,
    default_page_size: Option<i64>,
    default_lead_source: Option<String>,
}

/// Loads the config file, falling back to defaults when no file exists.
/// A missing file is only an error when the path was given explicitly.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };

    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path));
        }
        return Ok(AppConfig::default());
    }

    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let file: ConfigFile = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;

    let mut config = AppConfig::default();
    if let Some(days) = file.worklist_soon_days {
        config.worklist_soon_days =
            validate_soon_days(days).map_err(|_| ConfigError::InvalidSoonDays(days))?;
    }
    if let Some(size) = file.default_page_size {
        if size < 1 || size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidPageSize(size));
        }
        config.default_page_size = size;
    }
    if let Some(source) = file.default_lead_source {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidLeadSource);
        }
        config.default_lead_source = trimmed.to_string();
    }

    Ok(config)
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                dirs::config_dir().ok_or(ConfigError::MissingHomeDir)?
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{load, AppConfig, ConfigError};
    use std::fs;
    use tempfile::TempDir;

    fn write_config(contents: &str) -> (TempDir, std::path::PathBuf) {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("config.toml");
        fs::write(&path, contents).expect("write config");
        (temp, path)
    }

    #[test]
    fn defaults_when_no_file() {
        let config = AppConfig::default();
        assert_eq!(config.worklist_soon_days, 7);
        assert_eq!(config.default_page_size, 50);
        assert_eq!(config.default_lead_source, "Website");
    }

    #[test]
    fn load_overrides_defaults() {
        let (_temp, path) = write_config(
            "worklist_soon_days = 14\ndefault_page_size = 25\ndefault_lead_source = \"Walk In\"\n",
        );
        let config = load(Some(path)).expect("load config");
        assert_eq!(config.worklist_soon_days, 14);
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.default_lead_source, "Walk In");
    }

    #[test]
    fn load_rejects_invalid_values() {
        let (_temp, path) = write_config("worklist_soon_days = 0\n");
        assert!(matches!(
            load(Some(path)),
            Err(ConfigError::InvalidSoonDays(0))
        ));

        let (_temp, path) = write_config("default_page_size = 500\n");
        assert!(matches!(
            load(Some(path)),
            Err(ConfigError::InvalidPageSize(500))
        ));
    }

    #[test]
    fn load_rejects_unknown_fields() {
        let (_temp, path) = write_config("unknown_key = true\n");
        assert!(matches!(load(Some(path)), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("nope.toml");
        assert!(matches!(
            load(Some(path)),
            Err(ConfigError::MissingConfigFile(_))
        ));
    }
}
