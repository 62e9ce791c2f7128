//! # Checked Arithmetic
//!
//! Overflow-aware arithmetic for ledger amounts and unit counts.
//!
//! Cash balances are [`Decimal`] and paper quantities are `u64`. Both go
//! through [`CheckedArithmetic`] so that a settlement or an issuance merge
//! can never wrap silently.
//!
//! # Examples
//!
//! ```
//! use paper_ledger::domain::value_objects::arithmetic::{ArithmeticError, CheckedArithmetic};
//! use rust_decimal::Decimal;
//!
//! let balance = Decimal::new(10_000_000, 0);
//! assert_eq!(balance.safe_sub(Decimal::new(15_000, 0)), Ok(Decimal::new(9_985_000, 0)));
//! assert_eq!(u64::MAX.safe_add(1), Err(ArithmeticError::Overflow));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Error type for arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// Arithmetic operation resulted in overflow.
    #[error("arithmetic overflow")]
    Overflow,

    /// Arithmetic operation resulted in underflow.
    #[error("arithmetic underflow")]
    Underflow,

    /// Division by zero attempted.
    #[error("division by zero")]
    DivisionByZero,
}

/// Result type for arithmetic operations.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Trait for checked arithmetic operations.
///
/// Every method returns `Err` instead of panicking or wrapping.
pub trait CheckedArithmetic: Sized {
    /// Safely add two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely subtract two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Underflow` if the result would underflow.
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely multiply two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely divide two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::DivisionByZero` if the divisor is zero.
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self>;
}

impl CheckedArithmetic for Decimal {
    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_sub(rhs).ok_or(ArithmeticError::Underflow)
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.checked_div(rhs).ok_or(ArithmeticError::Overflow)
    }
}

impl CheckedArithmetic for u64 {
    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_sub(rhs).ok_or(ArithmeticError::Underflow)
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_div(rhs).ok_or(ArithmeticError::DivisionByZero)
    }
}
