//! Configuration loader for the operator CLI. The file is plain JSON with
//! camelCase keys; every key is optional and falls back to its default.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "VERIFIER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file unreadable: {0}")]
    Io(String),
    #[error("config parse failed: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct VerifierConfig {
    /// JSON file backing the credential store used by `signup` and `login`.
    pub store_path: PathBuf,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub debug_level: String,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("credentials.json"),
            debug_level: "warn".to_string(),
        }
    }
}

/// Loads the JSON configuration file at `path`.
pub fn load_config(path: impl AsRef<Path>) -> Result<VerifierConfig, ConfigError> {
    let raw_json = fs::read_to_string(&path).map_err(|e| ConfigError::Io(format!("{e}")))?;
    serde_json::from_str(&raw_json).map_err(|e| ConfigError::Parse(format!("{e}")))
}

/// Loads configuration from `explicit`, else from `$VERIFIER_CONFIG`, else
/// returns the defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<VerifierConfig, ConfigError> {
    match config_path(explicit, env::var_os(CONFIG_ENV_VAR)) {
        Some(path) => load_config(path),
        None => Ok(VerifierConfig::default()),
    }
}

fn config_path(explicit: Option<&Path>, from_env: Option<OsString>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| from_env.filter(|value| !value.is_empty()).map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::{config_path, load_config, ConfigError, VerifierConfig};
    use serde_json::json;
    use std::ffi::OsString;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::NamedTempFile;

    #[test]
    fn loads_config_file() {
        let payload = json!({ "storePath": "/var/lib/verifier/users.json", "debugLevel": "debug" });
        let file = NamedTempFile::new().expect("temp file");
        fs::write(file.path(), serde_json::to_vec(&payload).unwrap()).unwrap();

        let config = load_config(file.path()).expect("config should load");
        assert_eq!(config.store_path, PathBuf::from("/var/lib/verifier/users.json"));
        assert_eq!(config.debug_level, "debug");
    }

    #[test]
    fn missing_keys_take_defaults() {
        let file = NamedTempFile::new().expect("temp file");
        fs::write(file.path(), br#"{ "debugLevel": "info" }"#).unwrap();

        let config = load_config(file.path()).expect("config should load");
        assert_eq!(config.store_path, VerifierConfig::default().store_path);
        assert_eq!(config.debug_level, "info");
    }

    #[test]
    fn rejects_unknown_keys() {
        let file = NamedTempFile::new().expect("temp file");
        fs::write(file.path(), br#"{ "kdfRounds": 1 }"#).unwrap();
        assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_config("/nonexistent/verifier-config.json").unwrap_err();
        assert!(format!("{err}").contains("config file unreadable"));
    }

    #[test]
    fn explicit_path_wins_over_environment() {
        let explicit = Path::new("cli.json");
        assert_eq!(
            config_path(Some(explicit), Some(OsString::from("env.json"))),
            Some(PathBuf::from("cli.json"))
        );
        assert_eq!(config_path(None, Some(OsString::from("env.json"))), Some(PathBuf::from("env.json")));
        assert_eq!(config_path(None, Some(OsString::new())), None);
        assert_eq!(config_path(None, None), None);
    }
}
