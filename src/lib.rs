//! Chainward: tamper-evidence verification for hash-chained audit logs.
//!
//! Re-exports the member crates under one roof. The verification core lives
//! in [`chainward_verify`]; store backends in [`chainward_store`]; shared
//! types in [`chainward_types`].

pub use chainward_store as store;
pub use chainward_types as types;
pub use chainward_verify as verify;
