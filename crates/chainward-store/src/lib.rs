//! Store backends for hash-chained audit logs.
//!
//! The verification core consumes the minimal read-only [`ChainStore`]
//! capability defined here. Two implementations are provided: a
//! SQLite-backed store for real audit databases and an in-memory store
//! for tests and demos. [`provider::new_store`] builds a store from
//! configuration and enforces the read-consistency contract.

pub mod memory;
pub mod provider;
pub mod sqlite;
mod store;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::{ChainStore, Direction};
