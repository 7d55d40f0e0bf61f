use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::oui::fetch::DEFAULT_REGISTRY_URL;

/// Run configuration loaded from a TOML file or defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Local copy of the OUI registry; downloaded here when missing.
    #[serde(default = "default_registry_path")]
    pub registry_path: PathBuf,

    /// Where to download the registry from.
    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    /// Timeout in seconds for the registry download.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Merge prefixes that share a vendor name into one group.
    #[serde(default = "default_fold")]
    pub fold: bool,
}

fn default_registry_path() -> PathBuf {
    PathBuf::from("oui.txt")
}

fn default_registry_url() -> String {
    DEFAULT_REGISTRY_URL.to_string()
}

fn default_fetch_timeout() -> u64 {
    60
}

fn default_fold() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            registry_path: default_registry_path(),
            registry_url: default_registry_url(),
            fetch_timeout_secs: default_fetch_timeout(),
            fold: default_fold(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: AppConfig = toml::de::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Apply command-line overrides on top of the file/default values.
    pub fn with_overrides(mut self, registry: Option<PathBuf>, dontfold: bool) -> Self {
        if let Some(path) = registry {
            self.registry_path = path;
        }
        if dontfold {
            self.fold = false;
        }
        self
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.registry_path, PathBuf::from("oui.txt"));
        assert_eq!(cfg.registry_url, DEFAULT_REGISTRY_URL);
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(60));
        assert!(cfg.fold);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let cfg: AppConfig = toml::de::from_str(
            r#"
            registry_path = "/var/cache/ouicount/oui.txt"
            fold = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.registry_path, PathBuf::from("/var/cache/ouicount/oui.txt"));
        assert!(!cfg.fold);
        assert_eq!(cfg.registry_url, DEFAULT_REGISTRY_URL);
        assert_eq!(cfg.fetch_timeout_secs, 60);
    }

    #[test]
    fn test_cli_overrides_win_over_file() {
        let from_file: AppConfig =
            toml::de::from_str("registry_path = \"file.txt\"\nfold = true").unwrap();
        let cfg = from_file.with_overrides(Some(PathBuf::from("cli.txt")), true);
        assert_eq!(cfg.registry_path, PathBuf::from("cli.txt"));
        assert!(!cfg.fold);
    }

    #[test]
    fn test_absent_overrides_keep_file_values() {
        let from_file: AppConfig =
            toml::de::from_str("registry_path = \"file.txt\"\nfold = false").unwrap();
        let cfg = from_file.with_overrides(None, false);
        assert_eq!(cfg.registry_path, PathBuf::from("file.txt"));
        assert!(!cfg.fold, "an unset --dontfold must not re-enable folding");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let res: Result<AppConfig, _> = toml::de::from_str("registry = \"oui.txt\"");
        assert!(res.is_err());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = AppConfig::from_file(Path::new("/nonexistent/ouicount.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/ouicount.toml"));
    }
}
