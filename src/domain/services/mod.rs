//! # Domain Services
//!
//! Business logic spanning more than one entity.
//!
//! ## Services
//!
//! - [`settlement`]: Discount-yield pricing and the paper sale transition

pub mod settlement;

pub use settlement::{DAY_COUNT_BASIS, apply_transfer, settlement_amount};
