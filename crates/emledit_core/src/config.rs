//! Engine configuration.
//!
//! # Responsibility
//! - Carry deployment-specific values stamped into new documents.
//! - Locate the per-user document folders.
//!
//! # Invariants
//! - `system` and `data_root` are never empty after `validate()`.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_SYSTEM: &str = "https://pasta.edirepository.org";
const DEFAULT_AUTH_SYSTEM: &str = "https://pasta.edirepository.org/authentication";
const LOG_FOLDER: &str = ".logs";

/// Result type used by configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors from loading or validating configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// Config payload is not valid JSON for `EngineConfig`.
    Parse(serde_json::Error),
    /// Field value is unusable.
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Attributes put on a freshly created `access` element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccessDefaults {
    pub system: String,
    pub scope: String,
    pub order: String,
    pub auth_system: String,
}

impl Default for AccessDefaults {
    fn default() -> Self {
        Self {
            system: DEFAULT_SYSTEM.to_string(),
            scope: "document".to_string(),
            order: "allowFirst".to_string(),
            auth_system: DEFAULT_AUTH_SYSTEM.to_string(),
        }
    }
}

/// Runtime configuration of the edit engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory holding one sub-folder per user.
    pub data_root: PathBuf,
    /// Value of `eml/@system`.
    pub system: String,
    pub access: AccessDefaults,
    pub public_principal: String,
    pub public_permission: String,
    pub owner_permission: String,
    pub log_level: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("user-data"),
            system: DEFAULT_SYSTEM.to_string(),
            access: AccessDefaults::default(),
            public_principal: "public".to_string(),
            public_permission: "read".to_string(),
            owner_permission: "all".to_string(),
            log_level: None,
        }
    }
}

impl EngineConfig {
    /// Default configuration rooted at `data_root`.
    pub fn with_data_root(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            ..Self::default()
        }
    }

    /// Parses and validates a JSON config payload.
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.data_root.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_root cannot be empty".to_string()));
        }
        if self.system.trim().is_empty() {
            return Err(ConfigError::Invalid("system cannot be empty".to_string()));
        }
        for (field, value) in [
            ("public_principal", &self.public_principal),
            ("public_permission", &self.public_permission),
            ("owner_permission", &self.owner_permission),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field} cannot be empty")));
            }
        }
        Ok(())
    }

    /// Folder holding the documents of one user.
    pub fn user_folder(&self, user: &str) -> PathBuf {
        self.data_root.join(user)
    }

    /// Folder for rolling log files; user ids cannot start with a dot.
    pub fn log_dir(&self) -> PathBuf {
        self.data_root.join(LOG_FOLDER)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, EngineConfig};

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = EngineConfig::from_json_str(r#"{"data_root": "/srv/eml"}"#).unwrap();
        assert_eq!(config.data_root.to_str(), Some("/srv/eml"));
        assert_eq!(config.access.order, "allowFirst");
        assert_eq!(config.public_principal, "public");
    }

    #[test]
    fn blank_system_is_rejected() {
        let err = EngineConfig::from_json_str(r#"{"system": "  "}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = EngineConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
