//! # Domain Entities
//!
//! Records held on the ledger.
//!
//! ## Aggregates
//!
//! - [`CommercialPaper`]: Issued paper with its ownership breakdown
//! - [`Account`]: Company cash balance and asset history
//!
//! ## Documents
//!
//! - [`Quote`], [`Property`], [`Proposal`], [`SaleAgreement`], [`SaleDeed`],
//!   [`Notification`]: Registry-backed document records
//!
//! ## Payloads
//!
//! - [`TransferRequest`]: Input of an ownership transfer

pub mod account;
pub mod commercial_paper;
pub mod documents;
pub mod transfer_request;
mod wire;

pub use account::{Account, DEFAULT_INITIAL_BALANCE, PREFIX_SUFFIX};
pub use commercial_paper::{CommercialPaper, Owner};
pub use documents::{
    History, Litigation, Loan, Notification, Party, Property, Proposal, Quote, Registrar,
    SaleAgreement, SaleDeed, Settlement,
};
pub use transfer_request::TransferRequest;
