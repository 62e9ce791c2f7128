//! # paper-ledger
//!
//! State-transition engine of a commercial paper ledger over a key-value
//! store.
//!
//! The engine issues discounted commercial paper under deterministic CUSIP
//! identifiers, moves units between company accounts against cash, and keeps
//! a set of trade-finance and land-record documents. Every record class that
//! must be enumerable carries a key index in the store itself.
//!
//! ## Layers
//!
//! - [`domain`]: entities, value objects, settlement rules
//! - [`infrastructure`]: JSON codec, store port and adapters, repositories
//! - [`application`]: services, invocation dispatch, [`LedgerError`]
//!
//! ## Example
//!
//! ```
//! use paper_ledger::Ledger;
//! use paper_ledger::infrastructure::persistence::InMemoryLedgerStore;
//!
//! let ledger = Ledger::new(InMemoryLedgerStore::new());
//! ledger.invoke("init", &[] as &[&str]).unwrap();
//! ledger.invoke("createAccounts", &["2"]).unwrap();
//! ledger
//!     .invoke(
//!         "issueCommercialPaper",
//!         &[r#"{"ticker":"ACME","par":1000000,"qty":10,"discount":6,"maturity":30,
//!               "issuer":"company1","issueDate":"1456161763790"}"#],
//!     )
//!     .unwrap();
//! ledger
//!     .invoke(
//!         "transferPaper",
//!         &[r#"{"cusip":"10000ACP","fromCompany":"company1","toCompany":"company2","quantity":3}"#],
//!     )
//!     .unwrap();
//!
//! let paper = ledger.query(&["GetCP", "10000ACP"]).unwrap();
//! let paper: serde_json::Value = serde_json::from_slice(&paper).unwrap();
//! assert_eq!(paper["owner"][1]["quantity"], 3);
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;

pub use application::{Invocation, InvocationReceipt, Ledger, LedgerError, LedgerResult};
pub use config::LedgerConfig;
