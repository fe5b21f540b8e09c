//! Configuration for the chainward verifier and its store collaborator.
//!
//! [`ChainwardConfig`] is loaded from `chainward.toml` or assembled from
//! `CHAINWARD_*` environment variables. It is constructed explicitly at
//! startup and passed into the store provider; there is no ambient global
//! configuration state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ChainwardError;

/// Default configuration file name.
pub const CONFIG_FILENAME: &str = "chainward.toml";

/// Read-consistency level requested from the store backend.
///
/// Chain verification depends on strongly consistent reads: a stale read
/// can falsely report a missing genesis or a wrong head. The store
/// provider rejects `Eventual` at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReadConsistency {
    #[default]
    Strong,
    Eventual,
}

/// Which store backend to connect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// SQLite database file; requires [`StoreConfig::path`].
    Sqlite,
    /// In-memory store, empty at startup. For demos and tests.
    Memory,
}

/// Connection settings for the audit log store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Database file path; required for the sqlite backend.
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub read_consistency: ReadConsistency,
}

impl StoreConfig {
    /// Convenience constructor for a strongly consistent SQLite store.
    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            path: Some(path.into()),
            read_consistency: ReadConsistency::Strong,
        }
    }
}

/// Top-level configuration, loaded from [`CONFIG_FILENAME`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainwardConfig {
    pub store: StoreConfig,
}

impl ChainwardConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ChainwardError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ChainwardError::ConfigError(format!(
                "could not read config file {}: {e}",
                path.display()
            ))
        })?;
        toml::from_str(&raw).map_err(|e| {
            ChainwardError::ConfigError(format!(
                "could not parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Assemble configuration from `CHAINWARD_*` environment variables.
    ///
    /// Recognized variables: `CHAINWARD_STORE_BACKEND` (`sqlite` or
    /// `memory`, default `sqlite`), `CHAINWARD_SQLITE_PATH`, and
    /// `CHAINWARD_READ_CONSISTENCY` (`strong` or `eventual`, default
    /// `strong`).
    pub fn from_env() -> Result<Self, ChainwardError> {
        let backend = match std::env::var("CHAINWARD_STORE_BACKEND") {
            Ok(value) => match value.as_str() {
                "sqlite" => StoreBackend::Sqlite,
                "memory" => StoreBackend::Memory,
                other => {
                    return Err(ChainwardError::ConfigError(format!(
                        "unknown CHAINWARD_STORE_BACKEND '{other}' (expected sqlite or memory)"
                    )))
                }
            },
            Err(_) => StoreBackend::Sqlite,
        };

        let path = std::env::var("CHAINWARD_SQLITE_PATH")
            .ok()
            .map(PathBuf::from);

        let read_consistency = match std::env::var("CHAINWARD_READ_CONSISTENCY") {
            Ok(value) => match value.as_str() {
                "strong" => ReadConsistency::Strong,
                "eventual" => ReadConsistency::Eventual,
                other => {
                    return Err(ChainwardError::ConfigError(format!(
                        "unknown CHAINWARD_READ_CONSISTENCY '{other}' (expected strong or eventual)"
                    )))
                }
            },
            Err(_) => ReadConsistency::Strong,
        };

        Ok(Self {
            store: StoreConfig {
                backend,
                path,
                read_consistency,
            },
        })
    }
}
