//! # Settlement Service
//!
//! Pricing and the in-memory state transition of a paper sale.
//!
//! The price is the simple discount-yield formula on a 360-day year:
//!
//! ```text
//! amount = quantity * par * (1 - discount/100 * maturity/360)
//! ```
//!
//! [`apply_transfer`] checks every precondition before touching any record,
//! so on error the three records are exactly as they were passed in.

use crate::domain::entities::{Account, CommercialPaper};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::CheckedArithmetic;
use rust_decimal::Decimal;

/// Days in the money-market year.
pub const DAY_COUNT_BASIS: u32 = 360;

/// Computes the settlement amount for `quantity` units.
///
/// Multiplications happen before the single division so that whole-day,
/// whole-percent inputs price exactly.
///
/// # Errors
///
/// Returns `DomainError::Arithmetic` on overflow and
/// `DomainError::InvalidRecord` if the discount exceeds the face value.
///
/// # Examples
///
/// ```
/// use paper_ledger::domain::services::settlement::settlement_amount;
/// use rust_decimal::Decimal;
///
/// let amount = settlement_amount(3, Decimal::new(1_000_000, 0), Decimal::new(6, 0), 30).unwrap();
/// assert_eq!(amount, Decimal::new(2_985_000, 0));
/// ```
pub fn settlement_amount(
    quantity: u64,
    par: Decimal,
    discount_percent: Decimal,
    maturity_days: u32,
) -> DomainResult<Decimal> {
    let face = Decimal::from(quantity).safe_mul(par)?;
    let divisor = Decimal::from(100u32 * DAY_COUNT_BASIS);
    let discount = face
        .safe_mul(discount_percent)?
        .safe_mul(Decimal::from(maturity_days))?
        .safe_div(divisor)?;
    let amount = face.safe_sub(discount)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(DomainError::invalid_record(format!(
            "discount {discount_percent}% over {maturity_days} days exceeds face value"
        )));
    }
    Ok(amount)
}

/// Sells `quantity` units of `paper` from `seller` to `buyer`.
///
/// Preconditions, first failure wins: the seller holds enough units, then
/// the buyer can pay. On success the buyer pays the seller, the owner list
/// moves the units, and the paper's CUSIP is appended to the seller's asset
/// list.
///
/// Returns the settlement amount.
///
/// # Errors
///
/// Returns `DomainError::InsufficientQuantity`, `DomainError::InsufficientFunds`,
/// or an arithmetic/pricing error.
pub fn apply_transfer(
    paper: &mut CommercialPaper,
    seller: &mut Account,
    buyer: &mut Account,
    quantity: u64,
) -> DomainResult<Decimal> {
    paper.ensure_holding(seller.id(), quantity)?;
    let amount = settlement_amount(quantity, paper.par(), paper.discount(), paper.maturity())?;
    buyer.ensure_funds(amount)?;

    buyer.debit(amount)?;
    seller.credit(amount)?;
    paper.move_units(seller.id(), buyer.id(), quantity)?;
    seller.record_asset(paper.cusip().clone());
    Ok(amount)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{AccountId, Cusip};
    use proptest::prelude::*;

    fn paper(quantity: u64, par: i64, discount: i64, maturity: u32) -> CommercialPaper {
        let mut paper = CommercialPaper::new(
            "ACME",
            Decimal::new(par, 0),
            quantity,
            Decimal::new(discount, 0),
            maturity,
            AccountId::new("company1"),
            "1456161763790",
        );
        paper.assign_issuance(Cusip::new("10000ACP"));
        paper
    }

    fn account(n: u32, balance: i64) -> Account {
        Account::numbered(n, Decimal::new(balance, 0))
    }

    mod pricing {
        use super::*;

        #[test]
        fn zero_discount_is_face_value() {
            let amount = settlement_amount(2, Decimal::new(500, 0), Decimal::ZERO, 90).unwrap();
            assert_eq!(amount, Decimal::new(1000, 0));
        }

        #[test]
        fn fractional_rate() {
            // 1 * 1000 * (1 - 0.075 * 180/360) = 962.5
            let amount =
                settlement_amount(1, Decimal::new(1000, 0), Decimal::new(75, 1), 180).unwrap();
            assert_eq!(amount, Decimal::new(9625, 1));
        }

        #[test]
        fn discount_beyond_face_is_rejected() {
            let err = settlement_amount(1, Decimal::new(100, 0), Decimal::new(200, 0), 360)
                .unwrap_err();
            assert!(matches!(err, DomainError::InvalidRecord(_)));
        }
    }

    mod transfer {
        use super::*;

        #[test]
        fn moves_cash_and_units() {
            let mut cp = paper(10, 1_000_000, 6, 30);
            let mut seller = account(1, 10_000_000);
            let mut buyer = account(2, 10_000_000);

            let amount = apply_transfer(&mut cp, &mut seller, &mut buyer, 3).unwrap();

            assert_eq!(amount, Decimal::new(2_985_000, 0));
            assert_eq!(seller.cash_balance(), Decimal::new(12_985_000, 0));
            assert_eq!(buyer.cash_balance(), Decimal::new(7_015_000, 0));
            assert_eq!(cp.holding(seller.id()), Some(7));
            assert_eq!(cp.holding(buyer.id()), Some(3));
            assert_eq!(seller.asset_ids(), &[Cusip::new("10000ACP")]);
            assert!(buyer.asset_ids().is_empty());
        }

        #[test]
        fn repeated_sales_duplicate_seller_asset_entry() {
            let mut cp = paper(10, 100, 0, 30);
            let mut seller = account(1, 0);
            let mut buyer = account(2, 10_000);
            apply_transfer(&mut cp, &mut seller, &mut buyer, 1).unwrap();
            apply_transfer(&mut cp, &mut seller, &mut buyer, 1).unwrap();
            assert_eq!(seller.asset_ids().len(), 2);
        }

        #[test]
        fn insufficient_quantity_leaves_state() {
            let mut cp = paper(5, 100, 0, 30);
            let mut seller = account(1, 0);
            let mut buyer = account(2, 1_000_000);
            let (cp0, s0, b0) = (cp.clone(), seller.clone(), buyer.clone());

            let err = apply_transfer(&mut cp, &mut seller, &mut buyer, 6).unwrap_err();

            assert!(matches!(err, DomainError::InsufficientQuantity { .. }));
            assert_eq!((cp, seller, buyer), (cp0, s0, b0));
        }

        #[test]
        fn insufficient_funds_leaves_state() {
            // 1 unit at par 150 with no discount costs 150
            let mut cp = paper(5, 150, 0, 30);
            let mut seller = account(1, 0);
            let mut buyer = account(2, 100);
            let (cp0, s0, b0) = (cp.clone(), seller.clone(), buyer.clone());

            let err = apply_transfer(&mut cp, &mut seller, &mut buyer, 1).unwrap_err();

            assert!(matches!(err, DomainError::InsufficientFunds { .. }));
            assert_eq!((cp, seller, buyer), (cp0, s0, b0));
        }

        #[test]
        fn quantity_checked_before_funds() {
            let mut cp = paper(5, 150, 0, 30);
            let mut seller = account(1, 0);
            let mut buyer = account(2, 0);
            let err = apply_transfer(&mut cp, &mut seller, &mut buyer, 6).unwrap_err();
            assert!(matches!(err, DomainError::InsufficientQuantity { .. }));
        }
    }

    proptest! {
        #[test]
        fn transfer_conserves_units_and_cash(
            issued in 1u64..10_000,
            sold_fraction in 0u64..=100,
            par in 1i64..1_000_000,
            discount in 0i64..20,
            maturity in 0u32..365,
            buyer_cash in 0i64..10_000_000_000,
        ) {
            let quantity = issued * sold_fraction / 100;
            let mut cp = paper(issued, par, discount, maturity);
            let mut seller = account(1, 0);
            let mut buyer = account(2, buyer_cash);
            let cash_before = seller.cash_balance() + buyer.cash_balance();

            if apply_transfer(&mut cp, &mut seller, &mut buyer, quantity).is_ok() {
                prop_assert_eq!(cp.owned_total(), Some(issued));
                prop_assert!(cp.is_balanced());
                prop_assert_eq!(seller.cash_balance() + buyer.cash_balance(), cash_before);
                prop_assert!(!buyer.cash_balance().is_sign_negative() || buyer.cash_balance().is_zero());
            }
        }
    }
}
