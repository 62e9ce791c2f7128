//! # Domain Layer
//!
//! Entities, value objects and pure business rules of the paper ledger.
//! Nothing in this layer touches storage.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
