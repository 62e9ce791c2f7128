//! # Entity Repository
//!
//! One generic create / read / enumerate component for every registry-backed
//! record class. A class plugs in through [`Record`]: its key prefix, its
//! registry index and its merge policy.
//!
//! | Policy | On an existing key |
//! |--------|--------------------|
//! | [`MergePolicy::Additive`] | the stored record absorbs the incoming one |
//! | [`MergePolicy::Replace`]  | the incoming record overwrites the stored one |

use crate::domain::errors::{DomainError, DomainResult};
use crate::infrastructure::codec;
use crate::infrastructure::persistence::registry::{KeyRegistry, RegistryClass};
use crate::infrastructure::persistence::traits::{
    LedgerStore, RepositoryError, RepositoryResult,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tracing::debug;

/// What happens when a record is created under a key that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Quantities accumulate into the stored record.
    Additive,
    /// Last write wins.
    Replace,
}

/// A record class stored under `KEY_PREFIX + identifier` and enumerable
/// through a registry index.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Human-readable class name used in errors and logs.
    const ENTITY: &'static str;
    /// Prefix of the store key.
    const KEY_PREFIX: &'static str;
    /// Registry index listing every key of the class.
    const REGISTRY: RegistryClass;
    /// Merge policy on an existing key.
    const MERGE: MergePolicy;

    /// Identifying field the key is built from.
    fn identifier(&self) -> &str;

    /// Folds `incoming` into `self`. Only called for additive classes.
    ///
    /// # Errors
    ///
    /// Returns the domain error that refused the merge.
    fn absorb(&mut self, _incoming: &Self) -> DomainResult<()> {
        Ok(())
    }

    /// Store key of this record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRecord` if the identifier is empty.
    fn store_key(&self) -> DomainResult<String> {
        let id = self.identifier();
        if id.is_empty() {
            return Err(DomainError::invalid_record(format!(
                "{} has an empty identifier",
                Self::ENTITY
            )));
        }
        Ok(format!("{}{id}", Self::KEY_PREFIX))
    }
}

/// Result of [`Repository::create`], carrying the record as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome<R> {
    /// The key was new and has been registered.
    Created(R),
    /// The key existed and the record was merged per the class policy.
    Merged(R),
}

impl<R> CreateOutcome<R> {
    /// Returns true if the record was new.
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// The record as written.
    #[must_use]
    pub fn record(&self) -> &R {
        match self {
            Self::Created(r) | Self::Merged(r) => r,
        }
    }

    /// Consumes the outcome, returning the record as written.
    #[must_use]
    pub fn into_record(self) -> R {
        match self {
            Self::Created(r) | Self::Merged(r) => r,
        }
    }
}

/// Repository for one record class over a store.
#[derive(Debug)]
pub struct Repository<'a, S: LedgerStore + ?Sized, R> {
    store: &'a S,
    _record: PhantomData<fn() -> R>,
}

impl<'a, S: LedgerStore + ?Sized, R: Record> Repository<'a, S, R> {
    /// Creates a repository over `store`.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Creates the record, or merges it into the existing one.
    ///
    /// A new key is registered before the record is written, so a corrupt
    /// index aborts the call with nothing written.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::Domain` for an empty identifier or a refused merge
    /// - `RepositoryError::CorruptRecord` if the stored record is undecodable
    /// - `RepositoryError::CorruptIndex` if the class index is undecodable
    /// - `RepositoryError::Store` on a backend failure
    pub fn create(&self, record: R) -> RepositoryResult<CreateOutcome<R>> {
        let key = record.store_key()?;
        let existing: Option<R> = codec::decode_stored(&key, self.store.get(&key)?)?;

        let outcome = match existing {
            None => {
                KeyRegistry::new(self.store).add_key(R::REGISTRY, &key)?;
                CreateOutcome::Created(record)
            }
            Some(mut stored) => match R::MERGE {
                MergePolicy::Additive => {
                    stored.absorb(&record)?;
                    CreateOutcome::Merged(stored)
                }
                MergePolicy::Replace => CreateOutcome::Merged(record),
            },
        };

        self.store.put(&key, codec::encode(outcome.record())?)?;
        debug!(
            entity = R::ENTITY,
            key = %key,
            created = outcome.is_created(),
            "record written"
        );
        Ok(outcome)
    }

    /// Overwrites an already registered record with its updated state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Domain` for an empty identifier and
    /// `RepositoryError::Store` on a backend failure.
    pub fn save(&self, record: &R) -> RepositoryResult<()> {
        let key = record.store_key()?;
        self.store.put(&key, codec::encode(record)?)?;
        Ok(())
    }

    /// Reads the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if absent and
    /// `RepositoryError::CorruptRecord` if undecodable.
    pub fn get_by_key(&self, key: &str) -> RepositoryResult<R> {
        self.find_by_key(key)?
            .ok_or_else(|| RepositoryError::not_found(R::ENTITY, key))
    }

    /// Reads the record stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::CorruptRecord` if undecodable and
    /// `RepositoryError::Store` on a backend failure.
    pub fn find_by_key(&self, key: &str) -> RepositoryResult<Option<R>> {
        codec::decode_stored(key, self.store.get(key)?)
    }

    /// Reads the record with the given identifier.
    ///
    /// # Errors
    ///
    /// Same as [`Repository::get_by_key`].
    pub fn get(&self, identifier: &str) -> RepositoryResult<R> {
        self.get_by_key(&format!("{}{identifier}", R::KEY_PREFIX))
    }

    /// Reads every registered record, in registration order.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::CorruptIndex` if the class index is undecodable
    /// - `RepositoryError::NotFound` for a registered key with no record
    /// - `RepositoryError::CorruptRecord` for an undecodable record
    pub fn list_all(&self) -> RepositoryResult<Vec<R>> {
        let keys = KeyRegistry::new(self.store).list_keys(R::REGISTRY)?;
        keys.iter().map(|key| self.get_by_key(key)).collect()
    }
}
