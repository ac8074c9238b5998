//! Runtime configuration loaded from `flowkit.toml`.
//!
//! ```toml
//! [host]
//! update_policy = "deferred"
//! scroll_axis = "vertical"
//!
//! [reuse]
//! capacity_per_key = 32
//!
//! [logging]
//! filter = "flowkit_layout=debug"
//! ```
//!
//! Every section and key is optional.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use flowkit_layout::HostConfig;
use flowkit_reuse::ReusePolicy;

/// Name of the configuration file looked up in a project root.
pub const FILE_NAME: &str = "flowkit.toml";

/// Errors raised while loading a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The file is not valid TOML for [`Config`].
    #[error("invalid configuration in {}: {source}", path.display())]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },
    /// `reuse.capacity_per_key` is zero, which would disable reuse entirely.
    #[error("reuse.capacity_per_key must be at least 1")]
    InvalidCapacity,
}

/// Logging section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives. Falls back to `RUST_LOG`, then `info`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Everything configurable at runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for new layout hosts.
    pub host: HostConfig,
    /// Policy of the thread-wide reuse pool.
    pub reuse: ReusePolicy,
    /// Tracing output.
    pub logging: LoggingConfig,
}

impl Config {
    /// Location of the configuration file under `root`.
    pub fn path(root: impl AsRef<Path>) -> PathBuf {
        root.as_ref().join(FILE_NAME)
    }

    /// Loads `flowkit.toml` from `root`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, does not parse, or holds invalid
    /// values.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = Self::path(root);
        match fs::read_to_string(&path) {
            Ok(text) => Self::parse(&text, path),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io { path, source }),
        }
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Fails if the text does not parse or holds invalid values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text, PathBuf::from(FILE_NAME))
    }

    fn parse(text: &str, path: PathBuf) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(text).map_err(|source| ConfigError::Parse { path, source })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] for a zero pool capacity.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if matches!(self.reuse.capacity_per_key, Some(0)) {
            return Err(ConfigError::InvalidCapacity);
        }
        Ok(())
    }

    /// Installs logging and applies the reuse policy to this thread's pool.
    pub fn apply(&self) {
        crate::logging::install(self.logging.filter.as_deref());
        flowkit_reuse::configure_global(self.reuse);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowkit_layout::{Axis, UpdatePolicy};

    #[test]
    fn test_empty_file_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.host.update_policy, UpdatePolicy::Immediate);
        assert_eq!(config.reuse.capacity_per_key, None);
    }

    #[test]
    fn test_full_file() {
        let config = Config::from_toml_str(
            r#"
            [host]
            update_policy = "deferred"
            scroll_axis = "vertical"

            [reuse]
            capacity_per_key = 32

            [logging]
            filter = "flowkit_layout=debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.host.update_policy, UpdatePolicy::Deferred);
        assert_eq!(config.host.scroll_axis, Some(Axis::Vertical));
        assert_eq!(config.reuse, ReusePolicy::bounded(32));
        assert_eq!(config.logging.filter.as_deref(), Some("flowkit_layout=debug"));
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let error = Config::from_toml_str("[reuse]\ncapacity_per_key = 0").unwrap_err();
        assert!(matches!(error, ConfigError::InvalidCapacity));
    }

    #[test]
    fn test_unknown_policy_is_a_parse_error() {
        let error = Config::from_toml_str("[host]\nupdate_policy = \"sometimes\"").unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
        assert!(error.to_string().contains(FILE_NAME));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let root = std::env::temp_dir().join("flowkit-config-test-missing");
        assert_eq!(Config::load(&root).unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_disk() {
        let root = std::env::temp_dir().join(format!("flowkit-config-test-{}", std::process::id()));
        fs::create_dir_all(&root).unwrap();
        fs::write(Config::path(&root), "[host]\nscroll_axis = \"horizontal\"\n").unwrap();

        let config = Config::load(&root).unwrap();
        assert_eq!(config.host.scroll_axis, Some(Axis::Horizontal));

        fs::remove_dir_all(&root).unwrap();
    }
}
