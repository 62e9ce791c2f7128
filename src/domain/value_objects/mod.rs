//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`AccountId`]: Company or user account identifier
//! - [`Cusip`]: Ledger-local asset identifier
//!
//! ## Identifier Generation
//!
//! - [`cusip::generate_suffix`]: Maturity-derived two-character suffix
//!
//! ## Arithmetic
//!
//! - [`ArithmeticError`]: Error type for arithmetic failures
//! - [`CheckedArithmetic`]: Trait for safe arithmetic operations

pub mod arithmetic;
pub mod cusip;
pub mod ids;
pub mod timestamp;

pub use arithmetic::{ArithmeticError, ArithmeticResult, CheckedArithmetic};
pub use ids::{AccountId, Cusip};
pub use timestamp::Timestamp;
