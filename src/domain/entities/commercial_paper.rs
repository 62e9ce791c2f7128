//! # Commercial Paper Entity
//!
//! A discounted short-term instrument and its ownership breakdown.
//!
//! Paper is created on first issuance, grows on repeated issuance under the
//! same CUSIP, and changes hands through transfers. It is never deleted.
//!
//! # Examples
//!
//! ```
//! use paper_ledger::domain::entities::commercial_paper::CommercialPaper;
//! use paper_ledger::domain::value_objects::{AccountId, Cusip};
//! use rust_decimal::Decimal;
//!
//! let mut paper = CommercialPaper::new(
//!     "ACME",
//!     Decimal::new(1_000_000, 0),
//!     10,
//!     Decimal::new(6, 0),
//!     30,
//!     AccountId::new("company1"),
//!     "1456161763790",
//! );
//! paper.assign_issuance(Cusip::new("10000ACP"));
//!
//! assert_eq!(paper.holding(&AccountId::new("company1")), Some(10));
//! assert!(paper.is_balanced());
//! ```

use super::wire::null_as_default;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{AccountId, CheckedArithmetic, Cusip};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A holding of some units of one paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Holding company.
    pub company: AccountId,
    /// Units held. Zero after a full sale; the entry is kept.
    pub quantity: u64,
}

impl Owner {
    /// Creates an owner entry.
    #[must_use]
    pub fn new(company: AccountId, quantity: u64) -> Self {
        Self { company, quantity }
    }
}

/// Commercial paper as stored on the ledger.
///
/// # Invariants
///
/// - The sum of `owners[*].quantity` equals `quantity`
/// - At most one owner entry per company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommercialPaper {
    /// Derived identifier. Ignored on input, assigned at issuance.
    #[serde(default)]
    cusip: Cusip,
    /// Free-form ticker.
    #[serde(default)]
    ticker: String,
    /// Face value per unit.
    #[serde(with = "rust_decimal::serde::float")]
    par: Decimal,
    /// Total units outstanding.
    #[serde(rename = "qty")]
    quantity: u64,
    /// Annual discount rate in percent.
    #[serde(with = "rust_decimal::serde::float")]
    discount: Decimal,
    /// Days from issue date to maturity.
    maturity: u32,
    /// Ownership breakdown.
    #[serde(rename = "owner", default, deserialize_with = "null_as_default")]
    owners: Vec<Owner>,
    /// Issuing account.
    issuer: AccountId,
    /// Epoch milliseconds as text.
    #[serde(rename = "issueDate")]
    issue_date: String,
}

impl CommercialPaper {
    /// Creates an unissued paper with no CUSIP and no owners.
    #[must_use]
    pub fn new(
        ticker: impl Into<String>,
        par: Decimal,
        quantity: u64,
        discount: Decimal,
        maturity: u32,
        issuer: AccountId,
        issue_date: impl Into<String>,
    ) -> Self {
        Self {
            cusip: Cusip::default(),
            ticker: ticker.into(),
            par,
            quantity,
            discount,
            maturity,
            owners: Vec::new(),
            issuer,
            issue_date: issue_date.into(),
        }
    }

    /// Returns the CUSIP.
    #[inline]
    #[must_use]
    pub fn cusip(&self) -> &Cusip {
        &self.cusip
    }

    /// Returns the ticker.
    #[inline]
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Returns the par value per unit.
    #[inline]
    #[must_use]
    pub fn par(&self) -> Decimal {
        self.par
    }

    /// Returns the total quantity.
    #[inline]
    #[must_use]
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Returns the discount rate in percent.
    #[inline]
    #[must_use]
    pub fn discount(&self) -> Decimal {
        self.discount
    }

    /// Returns the maturity in days.
    #[inline]
    #[must_use]
    pub fn maturity(&self) -> u32 {
        self.maturity
    }

    /// Returns the owner entries in insertion order.
    #[inline]
    #[must_use]
    pub fn owners(&self) -> &[Owner] {
        &self.owners
    }

    /// Returns the issuing account.
    #[inline]
    #[must_use]
    pub fn issuer(&self) -> &AccountId {
        &self.issuer
    }

    /// Returns the issue date text.
    #[inline]
    #[must_use]
    pub fn issue_date(&self) -> &str {
        &self.issue_date
    }

    /// Units held by `company`, or `None` if it has no entry.
    #[must_use]
    pub fn holding(&self, company: &AccountId) -> Option<u64> {
        self.owners
            .iter()
            .find(|owner| &owner.company == company)
            .map(|owner| owner.quantity)
    }

    /// Sum of all owner entries, `None` on overflow.
    #[must_use]
    pub fn owned_total(&self) -> Option<u64> {
        self.owners
            .iter()
            .try_fold(0u64, |acc, owner| acc.checked_add(owner.quantity))
    }

    /// Returns true if the owner entries add up to the total quantity.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.owned_total() == Some(self.quantity)
    }

    /// Stamps the CUSIP and makes the issuer the sole owner of every unit.
    ///
    /// Any owner list supplied with the issuance payload is discarded.
    pub fn assign_issuance(&mut self, cusip: Cusip) {
        self.cusip = cusip;
        self.owners = vec![Owner::new(self.issuer.clone(), self.quantity)];
    }

    /// Folds a repeated issuance into this paper: the total and the issuer's
    /// holding both grow by the incoming quantity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` on quantity overflow.
    pub fn absorb_issuance(&mut self, incoming: &CommercialPaper) -> DomainResult<()> {
        let added = incoming.quantity;
        self.quantity = self.quantity.safe_add(added)?;
        self.add_units(&incoming.issuer, added)
    }

    /// Moves `quantity` units from `from` to `to`.
    ///
    /// The seller's entry is decremented in place and kept even at zero; the
    /// buyer's entry is incremented or appended.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InsufficientQuantity` if `from` holds fewer
    /// than `quantity` units or no entry at all.
    pub fn move_units(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        quantity: u64,
    ) -> DomainResult<()> {
        self.ensure_holding(from, quantity)?;
        self.remove_units(from, quantity)?;
        self.add_units(to, quantity)
    }

    /// Checks that `company` holds at least `quantity` units.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InsufficientQuantity` otherwise.
    pub fn ensure_holding(&self, company: &AccountId, quantity: u64) -> DomainResult<()> {
        match self.holding(company) {
            Some(held) if held >= quantity => Ok(()),
            held => Err(DomainError::InsufficientQuantity {
                asset: self.cusip.to_string(),
                company: company.to_string(),
                held: held.unwrap_or(0),
                requested: quantity,
            }),
        }
    }

    fn remove_units(&mut self, company: &AccountId, quantity: u64) -> DomainResult<()> {
        if let Some(owner) = self.owners.iter_mut().find(|o| &o.company == company) {
            owner.quantity = owner.quantity.safe_sub(quantity)?;
        }
        Ok(())
    }

    fn add_units(&mut self, company: &AccountId, quantity: u64) -> DomainResult<()> {
        match self.owners.iter_mut().find(|o| &o.company == company) {
            Some(owner) => owner.quantity = owner.quantity.safe_add(quantity)?,
            None => self.owners.push(Owner::new(company.clone(), quantity)),
        }
        Ok(())
    }
}
