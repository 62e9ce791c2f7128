//! # Document Service
//!
//! Records quotes, properties, proposals, sale agreements, sale deeds and
//! notifications. Every class goes through the same generic repository;
//! the class's [`Record`] binding decides whether a repeated identifier
//! accumulates or replaces.

use crate::application::error::LedgerResult;
use crate::infrastructure::persistence::{CreateOutcome, LedgerStore, Record, Repository};
use tracing::info;

/// Writes registry-backed document records.
#[derive(Debug)]
pub struct DocumentService<'a, S: LedgerStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: LedgerStore + ?Sized> DocumentService<'a, S> {
    /// Creates the service over `store`.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Creates or merges `record`.
    ///
    /// # Errors
    ///
    /// - `LedgerError::InvalidRecord` for an empty identifier or a quote
    ///   quantity that is not an integer
    /// - `LedgerError::CorruptIndex` / `CorruptRecord` on undecodable state
    pub fn record<R: Record>(&self, record: R) -> LedgerResult<CreateOutcome<R>> {
        let outcome = Repository::<S, R>::new(self.store).create(record)?;
        info!(
            entity = R::ENTITY,
            id = outcome.record().identifier(),
            created = outcome.is_created(),
            "document recorded"
        );
        Ok(outcome)
    }

    /// Lists every record of class `R` in registration order.
    ///
    /// # Errors
    ///
    /// - `LedgerError::CorruptIndex` if the class index is undecodable
    /// - `LedgerError::RecordNotFound` for a dangling registered key
    /// - `LedgerError::CorruptRecord` for an undecodable record
    pub fn list<R: Record>(&self) -> LedgerResult<Vec<R>> {
        Ok(Repository::<S, R>::new(self.store).list_all()?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::error::LedgerError;
    use crate::domain::entities::{Notification, Proposal, Quote};
    use crate::infrastructure::persistence::InMemoryLedgerStore;

    #[test]
    fn quote_reissue_adds_quantity() {
        let store = InMemoryLedgerStore::new();
        let service = DocumentService::new(&store);
        let quote = |qty: &str| Quote {
            quote_no: "Q7".into(),
            qty: qty.into(),
            ..Quote::default()
        };

        assert!(service.record(quote("3")).unwrap().is_created());
        let merged = service.record(quote("4")).unwrap();

        assert_eq!(merged.record().qty, "7");
        assert_eq!(service.list::<Quote>().unwrap().len(), 1);
    }

    #[test]
    fn proposal_replaces() {
        let store = InMemoryLedgerStore::new();
        let service = DocumentService::new(&store);
        let proposal = |price: &str| Proposal {
            proposal_no: "PR1".into(),
            proposed_price: price.into(),
            ..Proposal::default()
        };
        service.record(proposal("100")).unwrap();
        service.record(proposal("120")).unwrap();
        let all = service.list::<Proposal>().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].proposed_price, "120");
    }

    #[test]
    fn empty_notification_id_is_invalid() {
        let store = InMemoryLedgerStore::new();
        let err = DocumentService::new(&store)
            .record(Notification::default())
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRecord(_)));
    }
}
