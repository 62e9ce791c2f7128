//! # Record Classes
//!
//! [`Record`] bindings for every registry-backed entity.
//!
//! | Entity | Key prefix | Index | Merge |
//! |--------|-----------|-------|-------|
//! | [`CommercialPaper`] | `cp:` | `PaperKeys` | additive |
//! | [`Quote`] | `qt:` | `QuoteKeys` | additive |
//! | [`Property`] | `pt:` | `PropertyKeys` | replace |
//! | [`Proposal`] | `pr:` | `ProposalKeys` | replace |
//! | [`SaleAgreement`] | `ag:` | `AgreementKeys` | replace |
//! | [`SaleDeed`] | `de:` | `DeedKeys` | replace |
//! | [`Notification`] | `nt:` | `NotificationKeys` | replace |

use crate::domain::entities::{
    CommercialPaper, Notification, Property, Proposal, Quote, SaleAgreement, SaleDeed,
};
use crate::domain::errors::DomainResult;
use crate::infrastructure::persistence::registry::RegistryClass;
use crate::infrastructure::persistence::repository::{MergePolicy, Record, Repository};
use crate::infrastructure::persistence::traits::{LedgerStore, RepositoryResult};
use tracing::warn;

/// Store key prefix of commercial paper.
pub const PAPER_PREFIX: &str = "cp:";

/// Store key of the paper with CUSIP `cusip`.
#[must_use]
pub fn paper_key(cusip: &str) -> String {
    format!("{PAPER_PREFIX}{cusip}")
}

/// Resolves a paper given either its CUSIP or its full `cp:` key.
///
/// `id` is tried as a CUSIP first. A CUSIP may itself start with `cp:`
/// (issuer username `cp:corp`), so the key reading is only the fallback.
///
/// # Errors
///
/// Returns `RepositoryError::CorruptRecord` if a candidate record is
/// undecodable and `RepositoryError::Store` on a backend failure.
pub fn find_paper<S: LedgerStore + ?Sized>(
    papers: &Repository<'_, S, CommercialPaper>,
    id: &str,
) -> RepositoryResult<Option<CommercialPaper>> {
    if let Some(paper) = papers.find_by_key(&paper_key(id))? {
        return Ok(Some(paper));
    }
    if id.starts_with(PAPER_PREFIX) {
        return papers.find_by_key(id);
    }
    Ok(None)
}

impl Record for CommercialPaper {
    const ENTITY: &'static str = "commercial paper";
    const KEY_PREFIX: &'static str = PAPER_PREFIX;
    const REGISTRY: RegistryClass = RegistryClass::Paper;
    const MERGE: MergePolicy = MergePolicy::Additive;

    fn identifier(&self) -> &str {
        self.cusip().as_str()
    }

    fn absorb(&mut self, incoming: &Self) -> DomainResult<()> {
        // Same issuer prefix and same maturity month/day yield the same CUSIP.
        if self.ticker() != incoming.ticker() || self.issue_date() != incoming.issue_date() {
            warn!(
                cusip = %self.cusip(),
                stored_ticker = self.ticker(),
                incoming_ticker = incoming.ticker(),
                stored_issue_date = self.issue_date(),
                incoming_issue_date = incoming.issue_date(),
                "merging distinct issuances under one cusip"
            );
        }
        self.absorb_issuance(incoming)
    }
}

impl Record for Quote {
    const ENTITY: &'static str = "quote";
    const KEY_PREFIX: &'static str = "qt:";
    const REGISTRY: RegistryClass = RegistryClass::Quote;
    const MERGE: MergePolicy = MergePolicy::Additive;

    fn identifier(&self) -> &str {
        &self.quote_no
    }

    fn absorb(&mut self, incoming: &Self) -> DomainResult<()> {
        self.add_quantity(incoming)
    }
}

impl Record for Property {
    const ENTITY: &'static str = "property";
    const KEY_PREFIX: &'static str = "pt:";
    const REGISTRY: RegistryClass = RegistryClass::Property;
    const MERGE: MergePolicy = MergePolicy::Replace;

    fn identifier(&self) -> &str {
        &self.prop_id
    }
}

impl Record for Proposal {
    const ENTITY: &'static str = "proposal";
    const KEY_PREFIX: &'static str = "pr:";
    const REGISTRY: RegistryClass = RegistryClass::Proposal;
    const MERGE: MergePolicy = MergePolicy::Replace;

    fn identifier(&self) -> &str {
        &self.proposal_no
    }
}

impl Record for SaleAgreement {
    const ENTITY: &'static str = "sale agreement";
    const KEY_PREFIX: &'static str = "ag:";
    const REGISTRY: RegistryClass = RegistryClass::Agreement;
    const MERGE: MergePolicy = MergePolicy::Replace;

    fn identifier(&self) -> &str {
        &self.agreement_no
    }
}

impl Record for SaleDeed {
    const ENTITY: &'static str = "sale deed";
    const KEY_PREFIX: &'static str = "de:";
    const REGISTRY: RegistryClass = RegistryClass::Deed;
    const MERGE: MergePolicy = MergePolicy::Replace;

    fn identifier(&self) -> &str {
        &self.deed_no
    }
}

impl Record for Notification {
    const ENTITY: &'static str = "notification";
    const KEY_PREFIX: &'static str = "nt:";
    const REGISTRY: RegistryClass = RegistryClass::Notification;
    const MERGE: MergePolicy = MergePolicy::Replace;

    fn identifier(&self) -> &str {
        &self.notification_id
    }
}
