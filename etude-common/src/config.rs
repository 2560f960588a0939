//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Service configuration loaded from `config.toml` in the root folder
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// TCP port the API server binds
    pub port: u16,
    /// Base URL of the external proficiency scoring service
    pub scoring_url: String,
    /// Base URL of the external listening-history service
    pub listening_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            scoring_url: "http://127.0.0.1:8008".to_string(),
            listening_url: "https://api.spotify.com".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from `config.toml` in the root folder.
    ///
    /// A missing file yields defaults; a malformed file is a
    /// configuration error rather than a silent fallback.
    pub fn load(root_folder: &Path) -> Result<Self> {
        let path = root_folder.join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }
}

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>, env_var_name: &str) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    // Priority 3: TOML config file
    if let Some(config_path) = user_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml_content.parse::<toml::Value>() {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return Ok(PathBuf::from(root_folder));
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    Ok(default_root_folder())
}

/// Database file location within the root folder
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join("etude.db")
}

fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("etude").join("config.toml"))
}

fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("etude"))
        .unwrap_or_else(|| PathBuf::from("./etude_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_arg_takes_priority() {
        let root = resolve_root_folder(Some("/tmp/etude-cli"), "ETUDE_TEST_UNSET_VAR").unwrap();
        assert_eq!(root, PathBuf::from("/tmp/etude-cli"));
    }

    #[test]
    fn test_service_config_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServiceConfig::load(dir.path()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.scoring_url, "http://127.0.0.1:8008");
    }

    #[test]
    fn test_service_config_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "scoring_url = \"http://scoring.local:9000\"\n",
        )
        .unwrap();

        let config = ServiceConfig::load(dir.path()).unwrap();
        assert_eq!(config.scoring_url, "http://scoring.local:9000");
        // Unspecified keys keep their defaults
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_service_config_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "port = \"not a number\"\n").unwrap();

        let result = ServiceConfig::load(dir.path());
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
