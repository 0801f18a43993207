//! Configuration loading and types

use std::path::{Path, PathBuf};
use std::time::Duration;

use pkgupdate_pkg::CheckOptions;
use serde::{Deserialize, Serialize};

/// Top-level configuration for pkgupdate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Defaults for the update check
    #[serde(default)]
    pub check: CheckConfig,
    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
}

/// Defaults for the update check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Package manager to use instead of probing the host
    pub pkg_mgr: Option<String>,
    /// Per-command deadline in seconds; unset means commands may run forever
    pub timeout_secs: Option<u64>,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from an explicit path, `PKGUPDATE_CONFIG`, or the default paths
    ///
    /// # Errors
    /// Returns error if a config file exists but cannot be loaded
    pub fn load_default(explicit: Option<&Path>) -> eyre::Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Ok(path) = std::env::var("PKGUPDATE_CONFIG") {
            return Self::load(Path::new(&path));
        }

        let paths = [
            Some(PathBuf::from("pkgupdate.toml")),
            Some(PathBuf::from("/etc/pkgupdate/pkgupdate.toml")),
            dirs::config_dir().map(|p| p.join("pkgupdate/pkgupdate.toml")),
        ];

        for path in paths.into_iter().flatten() {
            if path.exists() {
                return Self::load(&path);
            }
        }

        Ok(Config::default())
    }

    /// Build check options, letting command-line values win
    #[must_use]
    pub fn check_options(
        &self,
        pkg_mgr: Option<String>,
        timeout_secs: Option<u64>,
    ) -> CheckOptions {
        CheckOptions {
            pkg_mgr: pkg_mgr.or_else(|| self.check.pkg_mgr.clone()),
            timeout: timeout_secs
                .or(self.check.timeout_secs)
                .map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_full() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[check]\npkg_mgr = \"yum\"\ntimeout_secs = 120\n\n[log]\nlevel = \"debug\"\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.check.pkg_mgr.as_deref(), Some("yum"));
        assert_eq!(config.check.timeout_secs, Some(120));
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_load_empty_uses_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_load_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[check]\ntimeout_secs = \"soon\"\n").unwrap();

        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_load_default_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[check]\npkg_mgr = \"dnf\"\n").unwrap();

        let config = Config::load_default(Some(file.path())).unwrap();

        assert_eq!(config.check.pkg_mgr.as_deref(), Some("dnf"));
    }

    #[test]
    fn test_check_options_cli_overrides_config() {
        let config = Config {
            check: CheckConfig {
                pkg_mgr: Some("yum".to_string()),
                timeout_secs: Some(60),
            },
            ..Config::default()
        };

        let options = config.check_options(Some("dnf".to_string()), None);

        assert_eq!(options.pkg_mgr.as_deref(), Some("dnf"));
        assert_eq!(options.timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_check_options_default_has_no_timeout() {
        let options = Config::default().check_options(None, None);

        assert_eq!(options, CheckOptions::default());
    }
}
