//! # Persistence Layer
//!
//! Store port, store adapters and the repositories built on them.
//!
//! ## Ports
//!
//! - [`LedgerStore`]: Key-value ledger store
//!
//! ## Repositories
//!
//! - [`KeyRegistry`]: Ordered key index per record class
//! - [`Repository`]: Generic create / merge / read for registry-backed records
//! - [`AccountRepository`]: Account records
//!
//! ## Stores
//!
//! - `in_memory`: In-memory store for tests and embedding
//! - `file_store`: JSON snapshot file
//! - `staged`: Per-invocation write overlay committed as one batch

pub mod accounts;
pub mod file_store;
pub mod in_memory;
pub mod records;
pub mod registry;
pub mod repository;
pub mod staged;
pub mod traits;

pub use accounts::{ACCOUNT_PREFIX, AccountRepository, account_key};
pub use file_store::FileLedgerStore;
pub use in_memory::InMemoryLedgerStore;
pub use records::{PAPER_PREFIX, find_paper, paper_key};
pub use registry::{KeyRegistry, RegistryClass};
pub use repository::{CreateOutcome, MergePolicy, Record, Repository};
pub use staged::StagedStore;
pub use traits::{
    LedgerStore, RepositoryError, RepositoryResult, StoreError, StoreResult,
};
