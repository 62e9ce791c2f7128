//! # Account Service
//!
//! Opening company accounts, one by name or a numbered batch.

use crate::application::error::{LedgerError, LedgerResult};
use crate::domain::entities::Account;
use crate::domain::value_objects::AccountId;
use crate::infrastructure::persistence::{AccountRepository, LedgerStore};
use rust_decimal::Decimal;
use tracing::info;

/// Opens accounts with a fixed starting balance.
#[derive(Debug)]
pub struct AccountService<'a, S: LedgerStore + ?Sized> {
    accounts: AccountRepository<'a, S>,
    initial_balance: Decimal,
}

impl<'a, S: LedgerStore + ?Sized> AccountService<'a, S> {
    /// Creates the service over `store`.
    #[must_use]
    pub fn new(store: &'a S, initial_balance: Decimal) -> Self {
        Self {
            accounts: AccountRepository::new(store),
            initial_balance,
        }
    }

    /// Opens an account for `username` with prefix `username + "000A"`.
    ///
    /// A zero-length stored value under the account key is treated as no
    /// account and initialized.
    ///
    /// # Errors
    ///
    /// - `LedgerError::InvalidRecord` for an empty username
    /// - `LedgerError::AccountExists` if the account is already there
    /// - `LedgerError::CorruptRecord` if the stored value is not an account
    pub fn create_account(&self, username: &str) -> LedgerResult<Account> {
        let account = Account::named(AccountId::new(username), self.initial_balance)?;
        if self.accounts.find(account.id())?.is_some() {
            return Err(LedgerError::account_exists(account.id()));
        }
        self.accounts.save(&account)?;
        info!(account = %account.id(), prefix = account.prefix(), "account created");
        Ok(account)
    }

    /// Writes `company1..=company{count}`, overwriting whatever is stored.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::StoreFailure` on a backend failure.
    pub fn create_accounts(&self, count: u32) -> LedgerResult<Vec<AccountId>> {
        let mut created = Vec::with_capacity(count as usize);
        for sequence in 1..=count {
            let account = Account::numbered(sequence, self.initial_balance);
            self.accounts.save(&account)?;
            created.push(account.id().clone());
        }
        info!(count, "accounts created");
        Ok(created)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::DEFAULT_INITIAL_BALANCE;
    use crate::infrastructure::persistence::InMemoryLedgerStore;

    fn service(store: &InMemoryLedgerStore) -> AccountService<'_, InMemoryLedgerStore> {
        AccountService::new(store, DEFAULT_INITIAL_BALANCE)
    }

    mod named {
        use super::*;

        #[test]
        fn creates_with_default_balance_and_prefix() {
            let store = InMemoryLedgerStore::new();
            let account = service(&store).create_account("alice").unwrap();
            assert_eq!(account.prefix(), "alice000A");
            assert_eq!(account.cash_balance(), Decimal::new(10_000_000, 0));
            assert!(account.asset_ids().is_empty());
            assert!(store.get("acct:alice").unwrap().is_some());
        }

        #[test]
        fn existing_account_is_refused() {
            let store = InMemoryLedgerStore::new();
            service(&store).create_account("alice").unwrap();
            let err = service(&store).create_account("alice").unwrap_err();
            assert_eq!(err, LedgerError::AccountExists("alice".into()));
        }

        #[test]
        fn empty_stored_value_is_initialized() {
            let store = InMemoryLedgerStore::new();
            store.put("acct:bob", Vec::new()).unwrap();
            let account = service(&store).create_account("bob").unwrap();
            assert_eq!(account.id().as_str(), "bob");
        }

        #[test]
        fn corrupt_stored_value_is_reported() {
            let store = InMemoryLedgerStore::new();
            store.put("acct:bob", b"[1,2]".to_vec()).unwrap();
            let err = service(&store).create_account("bob").unwrap_err();
            assert!(err.is_corruption());
        }

        #[test]
        fn configured_balance_is_used() {
            let store = InMemoryLedgerStore::new();
            let account = AccountService::new(&store, Decimal::new(250, 0))
                .create_account("carol")
                .unwrap();
            assert_eq!(account.cash_balance(), Decimal::new(250, 0));
        }
    }

    mod numbered {
        use super::*;

        #[test]
        fn creates_sequence_and_overwrites() {
            let store = InMemoryLedgerStore::new();
            let repo = AccountRepository::new(&store);
            repo.save(&Account::numbered(2, Decimal::ZERO)).unwrap();

            let ids = service(&store).create_accounts(3).unwrap();

            assert_eq!(ids.len(), 3);
            let second = repo.get(&AccountId::new("company2")).unwrap();
            assert_eq!(second.cash_balance(), DEFAULT_INITIAL_BALANCE);
            assert_eq!(second.prefix(), "20000A");
        }

        #[test]
        fn zero_count_writes_nothing() {
            let store = InMemoryLedgerStore::new();
            assert!(service(&store).create_accounts(0).unwrap().is_empty());
            assert!(store.is_empty());
        }
    }
}
