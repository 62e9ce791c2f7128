//! # Application Services
//!
//! Services that orchestrate domain logic and persistence.
//!
//! This module provides:
//! - [`AccountService`]: Opening company accounts
//! - [`IssuanceService`]: Issuing commercial paper
//! - [`TransferService`]: Selling paper between accounts
//! - [`DocumentService`]: Recording registry-backed documents
//! - [`QueryService`]: Read-only queries

pub mod accounts;
pub mod documents;
pub mod issuance;
pub mod queries;
pub mod transfer;

pub use accounts::AccountService;
pub use documents::DocumentService;
pub use issuance::IssuanceService;
pub use queries::{Query, QueryService};
pub use transfer::{TransferReceipt, TransferService};
