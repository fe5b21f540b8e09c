//! Chain-integrity verification core.
//!
//! Proves (or disproves) that the records of one chain form exactly one
//! unbroken hash chain from genesis to head. Three collaborating pieces,
//! with data flowing one way:
//!
//! - [`locator`] finds the chain's endpoints: total count, genesis
//!   (earliest by sequence key), head (latest).
//! - [`walker`] walks the chain record by record, resolving each step by
//!   an indexed previous-hash lookup.
//! - [`judge`] compares the walk's terminal state against the endpoints
//!   and classifies the outcome.
//!
//! [`Verifier`] ties the three together behind a single
//! `verify(chain_key) -> Verdict` operation.

pub mod judge;
pub mod locator;
pub mod verifier;
pub mod walker;

pub use locator::Endpoints;
pub use verifier::{Verifier, VerifyOptions};
pub use walker::{ChainWalk, WalkOutcome};
