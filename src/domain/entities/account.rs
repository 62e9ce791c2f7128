//! # Account Entity
//!
//! A company's cash position and the list of assets it has been involved in.
//!
//! Accounts are created once and never deleted. The `prefix` assigned at
//! creation namespaces every CUSIP the account issues.
//!
//! # Examples
//!
//! ```
//! use paper_ledger::domain::entities::account::Account;
//! use rust_decimal::Decimal;
//!
//! let account = Account::numbered(1, Decimal::new(10_000_000, 0));
//! assert_eq!(account.id().as_str(), "company1");
//! assert_eq!(account.prefix(), "10000A");
//! ```

use super::wire::null_as_default;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{AccountId, CheckedArithmetic, Cusip};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fixed tail appended to every account prefix.
pub const PREFIX_SUFFIX: &str = "000A";

/// Cash balance granted to newly created accounts unless configured otherwise.
pub const DEFAULT_INITIAL_BALANCE: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

/// A ledger account.
///
/// # Invariants
///
/// - `cash_balance` never goes below zero through [`Account::debit`]
/// - `prefix` is fixed after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Company identifier.
    id: AccountId,
    /// CUSIP namespace for paper issued by this account.
    prefix: String,
    /// Available cash.
    #[serde(rename = "cashBalance", with = "rust_decimal::serde::float")]
    cash_balance: Decimal,
    /// Assets issued or sold by this account, in event order.
    #[serde(rename = "assetIds", default, deserialize_with = "null_as_default")]
    asset_ids: Vec<Cusip>,
}

impl Account {
    /// Creates an account for a named user with prefix `username + "000A"`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRecord` if the username is empty.
    pub fn named(username: AccountId, initial_balance: Decimal) -> DomainResult<Self> {
        if username.is_empty() {
            return Err(DomainError::invalid_record("account username must not be empty"));
        }
        let prefix = format!("{username}{PREFIX_SUFFIX}");
        Ok(Self {
            id: username,
            prefix,
            cash_balance: initial_balance,
            asset_ids: Vec::new(),
        })
    }

    /// Creates the `sequence`-th bulk account, `company{sequence}`.
    ///
    /// Sequence numbers below ten are padded with a `0` in the prefix, so
    /// account 1 gets `10000A` and account 10 gets `10000A` as well.
    #[must_use]
    pub fn numbered(sequence: u32, initial_balance: Decimal) -> Self {
        Self {
            id: AccountId::new(format!("company{sequence}")),
            prefix: numbered_prefix(sequence),
            cash_balance: initial_balance,
            asset_ids: Vec::new(),
        }
    }

    /// Overrides the cash balance.
    #[must_use]
    pub fn with_cash_balance(mut self, balance: Decimal) -> Self {
        self.cash_balance = balance;
        self
    }

    /// Returns the account identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &AccountId {
        &self.id
    }

    /// Returns the CUSIP prefix.
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the cash balance.
    #[inline]
    #[must_use]
    pub fn cash_balance(&self) -> Decimal {
        self.cash_balance
    }

    /// Returns the recorded asset identifiers, duplicates included.
    #[inline]
    #[must_use]
    pub fn asset_ids(&self) -> &[Cusip] {
        &self.asset_ids
    }

    /// Adds cash.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` on overflow.
    pub fn credit(&mut self, amount: Decimal) -> DomainResult<()> {
        self.cash_balance = self.cash_balance.safe_add(amount)?;
        Ok(())
    }

    /// Removes cash, refusing to go negative.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InsufficientFunds` if `amount` exceeds the balance.
    pub fn debit(&mut self, amount: Decimal) -> DomainResult<()> {
        self.ensure_funds(amount)?;
        self.cash_balance = self.cash_balance.safe_sub(amount)?;
        Ok(())
    }

    /// Checks that the balance covers `amount` without changing it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InsufficientFunds` if it does not.
    pub fn ensure_funds(&self, amount: Decimal) -> DomainResult<()> {
        if self.cash_balance < amount {
            return Err(DomainError::InsufficientFunds {
                company: self.id.to_string(),
                available: self.cash_balance,
                required: amount,
            });
        }
        Ok(())
    }

    /// Appends an asset identifier. Existing entries are not checked.
    pub fn record_asset(&mut self, cusip: Cusip) {
        self.asset_ids.push(cusip);
    }
}

fn numbered_prefix(sequence: u32) -> String {
    if sequence < 10 {
        format!("{sequence}0{PREFIX_SUFFIX}")
    } else {
        format!("{sequence}{PREFIX_SUFFIX}")
    }
}
