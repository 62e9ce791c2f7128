//! # Application Layer
//!
//! Invocation dispatch, use-case services and the ledger error type.

pub mod dispatcher;
pub mod error;
pub mod services;

pub use dispatcher::{Invocation, InvocationReceipt, Ledger};
pub use error::{LedgerError, LedgerResult};
