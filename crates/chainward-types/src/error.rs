use crate::record::Record;

/// Errors surfaced by chainward components.
///
/// A verification run failing with any of these must not crash a caller
/// that is verifying multiple chains; every variant is reported, none is
/// fatal to the process. Chain defects found by a completed walk (forks,
/// breaks, count mismatches) are [`crate::Verdict`] variants, not errors.
#[derive(Debug, thiserror::Error)]
pub enum ChainwardError {
    /// The chain has no records at all.
    #[error("chain '{0}' has no records")]
    EmptyChain(String),

    /// A store query failed. Always propagated as-is; retry policy
    /// belongs to the store collaborator, never to the verification core.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// The chain has records, but none claims the empty previous hash.
    #[error("chain '{chain_key}' has no genesis record: no record carries an empty previous hash")]
    MissingGenesis { chain_key: String },

    /// More than one record claims the empty previous hash. Reported at
    /// the locator, before any walking, because the walk's starting point
    /// would be ambiguous.
    #[error("chain '{chain_key}' has {} genesis records, expected exactly one", .claimants.len())]
    DuplicateGenesis {
        chain_key: String,
        /// Every record claiming the empty previous hash.
        claimants: Vec<Record>,
    },

    /// Exactly one record claims the empty previous hash, but it is not
    /// the record with the smallest sequence key.
    #[error("chain '{chain_key}' genesis mismatch: earliest record is '{earliest_hash}' but '{claimed_hash}' carries the empty previous hash")]
    GenesisMismatch {
        chain_key: String,
        earliest_hash: String,
        claimed_hash: String,
    },

    /// Invalid or incomplete configuration.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
