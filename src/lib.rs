//! Single-node proof-of-work ledger.
//!
//! Transactions collect in a pending pool until a block is mined. Blocks
//! are linked by SHA-256 hashes and each carries a proof solving a puzzle
//! posed by its predecessor. Nodes reconcile by adopting the longest valid
//! chain among their peers.

pub mod api;
pub mod blockchain;
pub mod config;
pub mod consensus;
pub mod error;
pub mod peer;
pub mod transaction;

pub use error::{LedgerError, Result};
