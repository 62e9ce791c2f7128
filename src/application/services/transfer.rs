//! # Transfer Service
//!
//! Sells units of a paper from one account to another at the paper's
//! discount price.
//!
//! Lookups happen in a fixed order and the first failure wins: asset,
//! seller, buyer, then the quantity and funds rules of
//! [`apply_transfer`]. Records are written only after every check passed:
//! buyer, seller, paper.

use crate::application::error::{LedgerError, LedgerResult};
use crate::domain::entities::{Account, CommercialPaper, TransferRequest};
use crate::domain::services::settlement::apply_transfer;
use crate::domain::value_objects::AccountId;
use crate::infrastructure::persistence::{
    AccountRepository, LedgerStore, Repository, find_paper,
};
use rust_decimal::Decimal;
use tracing::info;

/// Result of a completed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    /// Paper after the transfer.
    pub paper: CommercialPaper,
    /// Seller after the transfer.
    pub seller: Account,
    /// Buyer after the transfer.
    pub buyer: Account,
    /// Cash moved from buyer to seller.
    pub amount: Decimal,
}

/// Executes paper transfers.
#[derive(Debug)]
pub struct TransferService<'a, S: LedgerStore + ?Sized> {
    accounts: AccountRepository<'a, S>,
    papers: Repository<'a, S, CommercialPaper>,
}

impl<'a, S: LedgerStore + ?Sized> TransferService<'a, S> {
    /// Creates the service over `store`.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self {
            accounts: AccountRepository::new(store),
            papers: Repository::new(store),
        }
    }

    /// Executes `request`.
    ///
    /// # Errors
    ///
    /// - `LedgerError::InvalidRecord` for empty ids or a self-transfer
    /// - `LedgerError::AssetNotFound` if the paper does not exist
    /// - `LedgerError::AccountNotFound` for the seller, then the buyer
    /// - `LedgerError::InsufficientQuantity` / `InsufficientFunds`
    pub fn transfer(&self, request: &TransferRequest) -> LedgerResult<TransferReceipt> {
        request.validate()?;

        let mut paper = find_paper(&self.papers, request.cusip.as_str())?
            .ok_or_else(|| LedgerError::asset_not_found(&request.cusip))?;
        let mut seller = self.account(&request.from_company)?;
        let mut buyer = self.account(&request.to_company)?;

        let amount = apply_transfer(&mut paper, &mut seller, &mut buyer, request.quantity)?;

        self.accounts.save(&buyer)?;
        self.accounts.save(&seller)?;
        self.papers.save(&paper)?;

        info!(
            cusip = %request.cusip,
            from = %seller.id(),
            to = %buyer.id(),
            quantity = request.quantity,
            amount = %amount,
            "paper transferred"
        );
        Ok(TransferReceipt {
            paper,
            seller,
            buyer,
            amount,
        })
    }

    fn account(&self, id: &AccountId) -> LedgerResult<Account> {
        self.accounts
            .find(id)?
            .ok_or_else(|| LedgerError::account_not_found(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::Owner;
    use crate::domain::value_objects::Cusip;
    use crate::infrastructure::persistence::InMemoryLedgerStore;

    const CUSIP: &str = "10000ACP";

    fn seeded(seller_units: u64, par: i64, buyer_cash: i64) -> InMemoryLedgerStore {
        let store = InMemoryLedgerStore::new();
        let accounts = AccountRepository::new(&store);
        accounts
            .save(&Account::numbered(1, Decimal::new(10_000_000, 0)))
            .unwrap();
        accounts
            .save(&Account::numbered(2, Decimal::new(buyer_cash, 0)))
            .unwrap();
        let mut paper = CommercialPaper::new(
            "ACME",
            Decimal::new(par, 0),
            seller_units,
            Decimal::new(6, 0),
            30,
            AccountId::new("company1"),
            "1456161763790",
        );
        paper.assign_issuance(Cusip::new(CUSIP));
        Repository::<_, CommercialPaper>::new(&store)
            .create(paper)
            .unwrap();
        store
    }

    fn request(quantity: u64) -> TransferRequest {
        TransferRequest::new(
            Cusip::new(CUSIP),
            AccountId::new("company1"),
            AccountId::new("company2"),
            quantity,
        )
    }

    mod success {
        use super::*;

        #[test]
        fn moves_units_and_cash() {
            let store = seeded(10, 1_000_000, 10_000_000);

            let receipt = TransferService::new(&store).transfer(&request(3)).unwrap();

            assert_eq!(receipt.amount, Decimal::new(2_985_000, 0));
            assert_eq!(
                receipt.paper.owners(),
                &[
                    Owner::new(AccountId::new("company1"), 7),
                    Owner::new(AccountId::new("company2"), 3),
                ]
            );
            let accounts = AccountRepository::new(&store);
            let seller = accounts.get(&AccountId::new("company1")).unwrap();
            let buyer = accounts.get(&AccountId::new("company2")).unwrap();
            assert_eq!(seller.cash_balance(), Decimal::new(12_985_000, 0));
            assert_eq!(buyer.cash_balance(), Decimal::new(7_015_000, 0));
            assert_eq!(seller.asset_ids(), &[Cusip::new(CUSIP)]);
        }

        #[test]
        fn full_sale_keeps_zero_entry() {
            let store = seeded(2, 100, 1_000);
            let receipt = TransferService::new(&store).transfer(&request(2)).unwrap();
            assert_eq!(receipt.paper.holding(&AccountId::new("company1")), Some(0));
            assert!(receipt.paper.is_balanced());
        }

        #[test]
        fn cp_prefixed_id_is_accepted() {
            let store = seeded(10, 100, 10_000);
            let mut req = request(1);
            req.cusip = Cusip::new(format!("cp:{CUSIP}"));
            assert!(TransferService::new(&store).transfer(&req).is_ok());
        }
    }

    mod refusal {
        use super::*;

        fn snapshot(store: &InMemoryLedgerStore) -> Vec<Option<Vec<u8>>> {
            store.keys().iter().map(|k| store.get(k).unwrap()).collect()
        }

        #[test]
        fn unknown_asset() {
            let store = seeded(10, 100, 10_000);
            let mut req = request(1);
            req.cusip = Cusip::new("NOPE");
            let err = TransferService::new(&store).transfer(&req).unwrap_err();
            assert_eq!(err, LedgerError::AssetNotFound("NOPE".into()));
        }

        #[test]
        fn seller_checked_before_buyer() {
            let store = seeded(10, 100, 10_000);
            let req = TransferRequest::new(
                Cusip::new(CUSIP),
                AccountId::new("ghost1"),
                AccountId::new("ghost2"),
                1,
            );
            let err = TransferService::new(&store).transfer(&req).unwrap_err();
            assert_eq!(err, LedgerError::AccountNotFound("ghost1".into()));
        }

        #[test]
        fn insufficient_quantity_changes_nothing() {
            let store = seeded(5, 100, 10_000);
            let before = snapshot(&store);
            let err = TransferService::new(&store).transfer(&request(6)).unwrap_err();
            assert_eq!(err.kind(), "InsufficientQuantity");
            assert_eq!(snapshot(&store), before);
        }

        #[test]
        fn insufficient_funds_changes_nothing() {
            // discount 6% over 30 days on par 150 is 149.25 per unit
            let store = seeded(5, 150, 100);
            let before = snapshot(&store);
            let err = TransferService::new(&store).transfer(&request(1)).unwrap_err();
            assert_eq!(err.kind(), "InsufficientFunds");
            assert_eq!(snapshot(&store), before);
        }

        #[test]
        fn self_transfer_is_invalid() {
            let store = seeded(5, 100, 10_000);
            let req = TransferRequest::new(
                Cusip::new(CUSIP),
                AccountId::new("company1"),
                AccountId::new("company1"),
                1,
            );
            let err = TransferService::new(&store).transfer(&req).unwrap_err();
            assert!(err.is_invalid_input());
        }
    }
}
