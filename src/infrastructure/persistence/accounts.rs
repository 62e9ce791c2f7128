//! # Account Repository
//!
//! Accounts live under `acct:` + id and are not enumerable, so they bypass
//! the registry.

use crate::domain::entities::Account;
use crate::domain::value_objects::AccountId;
use crate::infrastructure::codec;
use crate::infrastructure::persistence::traits::{
    LedgerStore, RepositoryError, RepositoryResult,
};

/// Store key prefix of accounts.
pub const ACCOUNT_PREFIX: &str = "acct:";

/// Store key of an account.
#[must_use]
pub fn account_key(id: &AccountId) -> String {
    format!("{ACCOUNT_PREFIX}{id}")
}

/// Account persistence over a store.
#[derive(Debug)]
pub struct AccountRepository<'a, S: LedgerStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: LedgerStore + ?Sized> AccountRepository<'a, S> {
    /// Creates an account repository over `store`.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Reads an account. A zero-length stored value counts as absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::CorruptRecord` if the stored value is not
    /// an account.
    pub fn find(&self, id: &AccountId) -> RepositoryResult<Option<Account>> {
        let key = account_key(id);
        codec::decode_stored(&key, self.store.get(&key)?)
    }

    /// Reads an account that must exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if absent, otherwise as
    /// [`AccountRepository::find`].
    pub fn get(&self, id: &AccountId) -> RepositoryResult<Account> {
        self.find(id)?
            .ok_or_else(|| RepositoryError::not_found("account", account_key(id)))
    }

    /// Writes an account, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` on a backend failure.
    pub fn save(&self, account: &Account) -> RepositoryResult<()> {
        self.store
            .put(&account_key(account.id()), codec::encode(account)?)?;
        Ok(())
    }
}
