//! Server configuration

use std::io;
use std::net::{Ipv4Addr, SocketAddr};

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

/// Errors loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Reading market config from {path}")]
    Io {
        /// Path to the configuration file
        path: Utf8PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// The file is not valid configuration TOML
    #[error("Parsing market config from {path}")]
    Parse {
        /// Path to the configuration file
        path: Utf8PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml_edit::de::Error,
    },
}

/// Configuration for the market server.
///
/// ```toml
/// listen = "0.0.0.0:8080"
/// log = "market=debug,produce=debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketConfig {
    /// Address the server binds to
    pub listen: SocketAddr,

    /// Log filter directive, used when `RUST_LOG` is unset
    pub log: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            log: "info".to_string(),
        }
    }
}

impl MarketConfig {
    /// Parse configuration from a TOML document
    pub fn from_toml(document: &str) -> Result<Self, toml_edit::de::Error> {
        toml_edit::de::from_str(document)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let document = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        let config = Self::from_toml(&document).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;

        tracing::debug!(%path, "Loaded market config");
        Ok(config)
    }
}
