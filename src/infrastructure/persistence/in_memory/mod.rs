//! # In-Memory Stores
//!
//! In-memory implementations for testing without a file on disk.
//!
//! ## Available Stores
//!
//! - [`InMemoryLedgerStore`]: Key-value ledger store
//!
//! ## Thread Safety
//!
//! All implementations use `Arc<RwLock<HashMap>>` for thread-safe access.

pub mod ledger_store;

pub use ledger_store::InMemoryLedgerStore;
