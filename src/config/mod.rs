//! Configuration management for `git_issues`.
//!
//! Settings come from command-line overrides first, then the environment:
//! - `GIT_ISSUES_FILE` - issues file override (read by the locator)
//! - `PORT` - health service port
//! - `GIT_ISSUES_SERVICE` - service name reported by the health endpoint

use std::path::PathBuf;

use issues_lib::Locator;
use thiserror::Error;

/// Health service port variable.
pub const PORT_ENV: &str = "PORT";
/// Health service name variable.
pub const SERVICE_ENV: &str = "GIT_ISSUES_SERVICE";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5004;
pub const DEFAULT_SERVICE: &str = "git-issues";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {var} value '{value}': expected a port number")]
    InvalidPort { var: &'static str, value: String },

    #[error("Search root is not a directory: {}", .0.display())]
    InvalidRoot(PathBuf),

    #[error("I/O error resolving {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub file: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Issues file discovery settings.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: Option<PathBuf>,
    pub root: Option<PathBuf>,
}

impl Config {
    /// Resolve discovery settings. A search root must be an existing directory
    /// and is canonicalized.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRoot` if `--root` is not a directory.
    pub fn resolve(overrides: &CliOverrides) -> Result<Self, ConfigError> {
        let root = match &overrides.root {
            Some(root) if !root.is_dir() => return Err(ConfigError::InvalidRoot(root.clone())),
            Some(root) => Some(dunce::canonicalize(root).map_err(|source| ConfigError::Io {
                path: root.clone(),
                source,
            })?),
            None => None,
        };

        Ok(Self {
            file: overrides.file.clone(),
            root,
        })
    }

    /// Locator honouring `--file`, `--root` and `GIT_ISSUES_FILE`.
    #[must_use]
    pub fn locator(&self) -> Locator {
        let mut locator = Locator::new();
        if let Some(root) = &self.root {
            locator = locator.search_root(root);
        }
        if let Some(file) = &self.file {
            locator = locator.explicit(file);
        }
        locator
    }
}

/// Health service settings.
///
/// The health endpoint reports `service`, which defaults to [`DEFAULT_SERVICE`]
/// (`git-issues`). The older `umbra-cloud-profile-service` name is intentionally
/// not used; set `GIT_ISSUES_SERVICE` to report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
    pub service: String,
}

impl ServeConfig {
    /// Resolve from overrides and the process environment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPort` if `PORT` is set but not a valid port.
    pub fn resolve(overrides: &CliOverrides) -> Result<Self, ConfigError> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPort` if `PORT` is set but not a valid port.
    pub fn resolve_with<F>(overrides: &CliOverrides, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match overrides.port {
            Some(port) => port,
            None => match env(PORT_ENV).filter(|v| !v.trim().is_empty()) {
                Some(value) => value
                    .trim()
                    .parse::<u16>()
                    .map_err(|_| ConfigError::InvalidPort {
                        var: PORT_ENV,
                        value,
                    })?,
                None => DEFAULT_PORT,
            },
        };

        let service = env(SERVICE_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVICE.to_string());

        Ok(Self {
            host: overrides
                .host
                .clone()
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_serve_defaults() {
        let config = ServeConfig::resolve_with(&CliOverrides::default(), env_of(&[])).unwrap();
        assert_eq!(
            config,
            ServeConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
                service: DEFAULT_SERVICE.to_string(),
            }
        );
    }

    #[test]
    fn test_serve_env_port_and_service() {
        let config = ServeConfig::resolve_with(
            &CliOverrides::default(),
            env_of(&[("PORT", " 8080 "), ("GIT_ISSUES_SERVICE", "board")]),
        )
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.service, "board");
    }

    #[test]
    fn test_serve_flag_beats_env() {
        let overrides = CliOverrides {
            port: Some(9000),
            host: Some("127.0.0.1".to_string()),
            ..Default::default()
        };
        let config = ServeConfig::resolve_with(&overrides, env_of(&[("PORT", "8080")])).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_serve_invalid_port() {
        let err = ServeConfig::resolve_with(&CliOverrides::default(), env_of(&[("PORT", "http")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    }

    #[test]
    fn test_root_must_be_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("git_issues.json");
        std::fs::write(&file, "[]").unwrap();

        let overrides = CliOverrides {
            root: Some(file),
            ..Default::default()
        };
        assert!(matches!(
            Config::resolve(&overrides),
            Err(ConfigError::InvalidRoot(_))
        ));
    }

    #[test]
    fn test_locator_uses_root() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = CliOverrides {
            root: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let config = Config::resolve(&overrides).unwrap();
        let root = config.locator().root().unwrap();
        assert_eq!(root, dunce::canonicalize(dir.path()).unwrap());
    }
}
