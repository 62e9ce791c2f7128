//! # Query Service
//!
//! Read-only requests against the ledger. Every answer is JSON bytes except
//! a raw-key read, which returns the stored value untouched.
//!
//! | `args[0]` | Answer |
//! |-----------|--------|
//! | `GetAllCPs` | every paper |
//! | `GetCP <id>` | one paper, by bare CUSIP or `cp:` key |
//! | `GetCompany <id>` | one account |
//! | `GetAllProperties` | every property |
//! | `GetAllproposal` | every proposal |
//! | `GetAllQuotes` | every quote |
//! | `GetAllAgreement` | every sale agreement |
//! | `GetAllDeed` | every sale deed |
//! | `GetAllNotifications` | every notification |
//! | anything else | the raw value stored under that key |

use crate::application::error::{LedgerError, LedgerResult};
use crate::application::services::documents::DocumentService;
use crate::domain::entities::{
    Account, CommercialPaper, Notification, Property, Proposal, Quote, SaleAgreement, SaleDeed,
};
use crate::domain::value_objects::AccountId;
use crate::infrastructure::codec;
use crate::infrastructure::persistence::{
    AccountRepository, LedgerStore, Record, Repository, RepositoryError, find_paper,
    paper_key,
};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// A parsed read request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// `GetAllCPs`
    AllPapers,
    /// `GetCP <id>`
    Paper(String),
    /// `GetCompany <id>`
    Company(AccountId),
    /// `GetAllProperties`
    AllProperties,
    /// `GetAllproposal`
    AllProposals,
    /// `GetAllQuotes`
    AllQuotes,
    /// `GetAllAgreement`
    AllAgreements,
    /// `GetAllDeed`
    AllDeeds,
    /// `GetAllNotifications`
    AllNotifications,
    /// Any other first argument, read as a store key.
    RawKey(String),
}

impl Query {
    /// Parses query arguments.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidRecord` for empty arguments or a
    /// missing identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use paper_ledger::application::services::queries::Query;
    ///
    /// assert_eq!(Query::parse(&["GetCP", "10000ACP"]).unwrap(), Query::Paper("10000ACP".into()));
    /// assert_eq!(Query::parse(&["PaperKeys"]).unwrap(), Query::RawKey("PaperKeys".into()));
    /// ```
    pub fn parse<A: AsRef<str>>(args: &[A]) -> LedgerResult<Self> {
        let Some(name): Option<&str> = args.first().map(|a| a.as_ref()) else {
            return Err(LedgerError::invalid_record("query needs at least one argument"));
        };
        let id = || {
            args.get(1)
                .map(|a| a.as_ref().to_string())
                .ok_or_else(|| LedgerError::invalid_record(format!("{name} needs an identifier")))
        };
        Ok(match name {
            "GetAllCPs" => Self::AllPapers,
            "GetCP" => Self::Paper(id()?),
            "GetCompany" => Self::Company(AccountId::new(id()?)),
            "GetAllProperties" => Self::AllProperties,
            "GetAllproposal" => Self::AllProposals,
            "GetAllQuotes" => Self::AllQuotes,
            "GetAllAgreement" => Self::AllAgreements,
            "GetAllDeed" => Self::AllDeeds,
            "GetAllNotifications" => Self::AllNotifications,
            key => Self::RawKey(key.to_string()),
        })
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllPapers => f.write_str("GetAllCPs"),
            Self::Paper(id) => write!(f, "GetCP {id}"),
            Self::Company(id) => write!(f, "GetCompany {id}"),
            Self::AllProperties => f.write_str("GetAllProperties"),
            Self::AllProposals => f.write_str("GetAllproposal"),
            Self::AllQuotes => f.write_str("GetAllQuotes"),
            Self::AllAgreements => f.write_str("GetAllAgreement"),
            Self::AllDeeds => f.write_str("GetAllDeed"),
            Self::AllNotifications => f.write_str("GetAllNotifications"),
            Self::RawKey(key) => f.write_str(key),
        }
    }
}

/// Answers queries from a store.
#[derive(Debug)]
pub struct QueryService<'a, S: LedgerStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: LedgerStore + ?Sized> QueryService<'a, S> {
    /// Creates the service over `store`.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Answers `query`.
    ///
    /// # Errors
    ///
    /// - `LedgerError::RecordNotFound` for a missing paper
    /// - `LedgerError::AccountNotFound` for a missing company
    /// - `LedgerError::KeyNotFound` for a missing raw key
    /// - `LedgerError::CorruptIndex` / `CorruptRecord` on undecodable state
    pub fn execute(&self, query: &Query) -> LedgerResult<Vec<u8>> {
        debug!(query = %query, "executing query");
        match query {
            Query::AllPapers => self.list::<CommercialPaper>(),
            Query::Paper(id) => {
                let papers = Repository::<S, CommercialPaper>::new(self.store);
                let paper = find_paper(&papers, id)?.ok_or_else(|| {
                    RepositoryError::not_found(CommercialPaper::ENTITY, paper_key(id))
                })?;
                encode(&paper)
            }
            Query::Company(id) => encode(&self.company(id)?),
            Query::AllProperties => self.list::<Property>(),
            Query::AllProposals => self.list::<Proposal>(),
            Query::AllQuotes => self.list::<Quote>(),
            Query::AllAgreements => self.list::<SaleAgreement>(),
            Query::AllDeeds => self.list::<SaleDeed>(),
            Query::AllNotifications => self.list::<Notification>(),
            Query::RawKey(key) => self
                .store
                .get(key)?
                .ok_or_else(|| LedgerError::key_not_found(key.as_str())),
        }
    }

    fn list<R: Record>(&self) -> LedgerResult<Vec<u8>> {
        encode(&DocumentService::new(self.store).list::<R>()?)
    }

    fn company(&self, id: &AccountId) -> LedgerResult<Account> {
        AccountRepository::new(self.store)
            .find(id)?
            .ok_or_else(|| LedgerError::account_not_found(id))
    }
}

fn encode<T: Serialize>(value: &T) -> LedgerResult<Vec<u8>> {
    Ok(codec::encode(value)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::{InMemoryLedgerStore, KeyRegistry};
    use rust_decimal::Decimal;

    mod parse {
        use super::*;

        #[test]
        fn named_queries() {
            assert_eq!(Query::parse(&["GetAllCPs"]).unwrap(), Query::AllPapers);
            assert_eq!(Query::parse(&["GetAllproposal"]).unwrap(), Query::AllProposals);
            assert_eq!(
                Query::parse(&["GetCompany", "company1"]).unwrap(),
                Query::Company(AccountId::new("company1"))
            );
        }

        #[test]
        fn missing_identifier_is_invalid() {
            let err = Query::parse(&["GetCP"]).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidRecord(_)));
        }

        #[test]
        fn empty_args_are_invalid() {
            let args: [&str; 0] = [];
            assert!(Query::parse(&args).is_err());
        }

        #[test]
        fn unknown_name_is_raw_key() {
            assert_eq!(
                Query::parse(&["acct:company1"]).unwrap(),
                Query::RawKey("acct:company1".into())
            );
        }
    }

    mod execute {
        use super::*;

        #[test]
        fn empty_lists_are_json_arrays() {
            let store = InMemoryLedgerStore::new();
            KeyRegistry::new(&store).bootstrap().unwrap();
            let out = QueryService::new(&store).execute(&Query::AllDeeds).unwrap();
            assert_eq!(out, b"[]");
        }

        #[test]
        fn company_by_id() {
            let store = InMemoryLedgerStore::new();
            AccountRepository::new(&store)
                .save(&Account::numbered(4, Decimal::new(7, 0)))
                .unwrap();
            let out = QueryService::new(&store)
                .execute(&Query::Company(AccountId::new("company4")))
                .unwrap();
            let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
            assert_eq!(json["prefix"], "40000A");
        }

        #[test]
        fn missing_company() {
            let store = InMemoryLedgerStore::new();
            let err = QueryService::new(&store)
                .execute(&Query::Company(AccountId::new("nobody")))
                .unwrap_err();
            assert_eq!(err, LedgerError::AccountNotFound("nobody".into()));
        }

        #[test]
        fn missing_paper_is_record_not_found() {
            let store = InMemoryLedgerStore::new();
            let err = QueryService::new(&store)
                .execute(&Query::Paper("NONE".into()))
                .unwrap_err();
            assert!(matches!(err, LedgerError::RecordNotFound { ref key, .. } if key == "cp:NONE"));

            let err = QueryService::new(&store)
                .execute(&Query::Paper("cp:NONE".into()))
                .unwrap_err();
            assert!(err.is_not_found());
        }

        #[test]
        fn raw_key_returns_bytes_verbatim() {
            let store = InMemoryLedgerStore::new();
            store.put("anything", b"\x01raw".to_vec()).unwrap();
            let service = QueryService::new(&store);
            assert_eq!(
                service.execute(&Query::RawKey("anything".into())).unwrap(),
                b"\x01raw"
            );
            let err = service.execute(&Query::RawKey("nothing".into())).unwrap_err();
            assert_eq!(err, LedgerError::KeyNotFound("nothing".into()));
        }

        #[test]
        fn corrupt_index_surfaces() {
            let store = InMemoryLedgerStore::new();
            store.put("QuoteKeys", b"{".to_vec()).unwrap();
            let err = QueryService::new(&store).execute(&Query::AllQuotes).unwrap_err();
            assert!(err.is_corruption());
        }
    }
}
