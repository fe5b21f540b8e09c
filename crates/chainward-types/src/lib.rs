//! Core types shared across all chainward crates.
//!
//! Defines the audit record, verification verdicts, configuration, and
//! error types used by the store backends, the verification core, and the
//! CLI.

pub mod cancel;
pub mod config;
pub mod error;
pub mod record;
pub mod verdict;

pub use cancel::CancelToken;
pub use config::{ChainwardConfig, ReadConsistency, StoreBackend, StoreConfig, CONFIG_FILENAME};
pub use error::ChainwardError;
pub use record::{Record, GENESIS_PREVIOUS_HASH};
pub use verdict::Verdict;
