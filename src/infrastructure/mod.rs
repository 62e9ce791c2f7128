//! # Infrastructure Layer
//!
//! JSON codec and persistence adapters.

pub mod codec;
pub mod persistence;
