//! # Issuance Service
//!
//! Issues commercial paper under the issuer's CUSIP namespace.
//!
//! # Flow
//!
//! ```text
//! payload ─► issuer account ─► CUSIP = prefix + suffix(issueDate, maturity)
//!         ─► owners = [{issuer, qty}] ─► create or merge ─► issuer.assetIds
//! ```

use crate::application::error::{LedgerError, LedgerResult};
use crate::domain::entities::CommercialPaper;
use crate::domain::value_objects::Cusip;
use crate::domain::value_objects::cusip::generate_suffix;
use crate::infrastructure::persistence::{
    AccountRepository, CreateOutcome, LedgerStore, Repository,
};
use tracing::info;

/// Issues and re-issues commercial paper.
#[derive(Debug)]
pub struct IssuanceService<'a, S: LedgerStore + ?Sized> {
    accounts: AccountRepository<'a, S>,
    papers: Repository<'a, S, CommercialPaper>,
}

impl<'a, S: LedgerStore + ?Sized> IssuanceService<'a, S> {
    /// Creates the service over `store`.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self {
            accounts: AccountRepository::new(store),
            papers: Repository::new(store),
        }
    }

    /// Issues `paper`.
    ///
    /// The CUSIP is derived, never taken from the payload, and the issuer
    /// becomes the sole owner of the issued units. Issuing an existing CUSIP
    /// adds to its quantity and to the issuer's holding. Only a first
    /// issuance records the CUSIP in the issuer's asset list.
    ///
    /// # Errors
    ///
    /// - `LedgerError::AccountNotFound` if the issuer has no account
    /// - `LedgerError::InvalidTimestamp` if `issueDate` is not epoch millis
    /// - `LedgerError::CorruptIndex` / `CorruptRecord` on undecodable state
    pub fn issue(&self, mut paper: CommercialPaper) -> LedgerResult<CreateOutcome<CommercialPaper>> {
        let mut issuer = self
            .accounts
            .find(paper.issuer())?
            .ok_or_else(|| LedgerError::account_not_found(paper.issuer()))?;

        let suffix = generate_suffix(paper.issue_date(), paper.maturity())?;
        let cusip = Cusip::compose(issuer.prefix(), &suffix);
        paper.assign_issuance(cusip.clone());

        let outcome = self.papers.create(paper)?;
        if outcome.is_created() {
            issuer.record_asset(cusip.clone());
            self.accounts.save(&issuer)?;
        }

        info!(
            cusip = %cusip,
            issuer = %issuer.id(),
            total = outcome.record().quantity(),
            created = outcome.is_created(),
            "commercial paper issued"
        );
        Ok(outcome)
    }
}
