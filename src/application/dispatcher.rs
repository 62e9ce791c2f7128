//! # Invocation Dispatcher
//!
//! Entry point of the ledger: named invocations that mutate state and
//! queries that read it.
//!
//! Every invocation runs against a [`StagedStore`]. Its writes reach the
//! backing store in one [`LedgerStore::put_all`] batch only if the whole
//! invocation succeeded; a failed invocation leaves the store untouched.
//!
//! # Examples
//!
//! ```
//! use paper_ledger::Ledger;
//! use paper_ledger::infrastructure::persistence::InMemoryLedgerStore;
//!
//! let ledger = Ledger::new(InMemoryLedgerStore::new());
//! ledger.invoke("init", &[] as &[&str]).unwrap();
//! ledger.invoke("createAccounts", &["2"]).unwrap();
//!
//! let company = ledger.query(&["GetCompany", "company2"]).unwrap();
//! assert!(String::from_utf8(company).unwrap().contains("20000A"));
//! ```

use crate::application::error::{LedgerError, LedgerResult};
use crate::application::services::{
    AccountService, DocumentService, IssuanceService, Query, QueryService, TransferService,
};
use crate::domain::entities::{
    CommercialPaper, DEFAULT_INITIAL_BALANCE, Notification, Property, Proposal, Quote,
    SaleAgreement, SaleDeed, TransferRequest,
};
use crate::infrastructure::codec::decode_payload;
use crate::infrastructure::persistence::{KeyRegistry, LedgerStore, StagedStore};
use rust_decimal::Decimal;
use std::fmt;
use tracing::{info, info_span, warn};
use uuid::Uuid;

/// A parsed state-changing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// `init`: reset every registry index to empty.
    Init,
    /// `createAccount <username>`
    CreateAccount(String),
    /// `createAccounts <n>`
    CreateAccounts(u32),
    /// `issueCommercialPaper <json>`
    IssueCommercialPaper(CommercialPaper),
    /// `transferPaper <json>`
    TransferPaper(TransferRequest),
    /// `issueQuote <json>`
    IssueQuote(Quote),
    /// `addProperty <json>`
    AddProperty(Property),
    /// `issueProposal <json>`
    IssueProposal(Proposal),
    /// `issueSaleAgreement <json>`
    IssueSaleAgreement(SaleAgreement),
    /// `issueSaleDeeds <json>`
    IssueSaleDeeds(SaleDeed),
    /// `addNotification <json>`
    AddNotification(Notification),
}

impl Invocation {
    /// Parses a function name and its arguments.
    ///
    /// `init` ignores its arguments; every other function takes exactly one.
    ///
    /// # Errors
    ///
    /// - `LedgerError::UnknownFunction` for an unrecognised name
    /// - `LedgerError::InvalidRecord` for a wrong argument count, a
    ///   malformed payload or a non-numeric account count
    pub fn parse<A: AsRef<str>>(function: &str, args: &[A]) -> LedgerResult<Self> {
        if function == "init" {
            return Ok(Self::Init);
        }
        let arg = || single_arg(function, args);
        Ok(match function {
            "createAccount" => Self::CreateAccount(arg()?.to_string()),
            "createAccounts" => {
                let raw = arg()?;
                let count = raw.trim().parse().map_err(|_| {
                    LedgerError::invalid_record(format!(
                        "createAccounts expects a non-negative integer, got {raw:?}"
                    ))
                })?;
                Self::CreateAccounts(count)
            }
            "issueCommercialPaper" => {
                Self::IssueCommercialPaper(decode_payload("commercial paper", arg()?)?)
            }
            "transferPaper" => Self::TransferPaper(decode_payload("transfer", arg()?)?),
            "issueQuote" => Self::IssueQuote(decode_payload("quote", arg()?)?),
            "addProperty" => Self::AddProperty(decode_payload("property", arg()?)?),
            "issueProposal" => Self::IssueProposal(decode_payload("proposal", arg()?)?),
            "issueSaleAgreement" => {
                Self::IssueSaleAgreement(decode_payload("sale agreement", arg()?)?)
            }
            "issueSaleDeeds" => Self::IssueSaleDeeds(decode_payload("sale deed", arg()?)?),
            "addNotification" => {
                Self::AddNotification(decode_payload("notification", arg()?)?)
            }
            other => return Err(LedgerError::unknown_function(other)),
        })
    }

    /// Function name as invoked.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::CreateAccount(_) => "createAccount",
            Self::CreateAccounts(_) => "createAccounts",
            Self::IssueCommercialPaper(_) => "issueCommercialPaper",
            Self::TransferPaper(_) => "transferPaper",
            Self::IssueQuote(_) => "issueQuote",
            Self::AddProperty(_) => "addProperty",
            Self::IssueProposal(_) => "issueProposal",
            Self::IssueSaleAgreement(_) => "issueSaleAgreement",
            Self::IssueSaleDeeds(_) => "issueSaleDeeds",
            Self::AddNotification(_) => "addNotification",
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn single_arg<'a, A: AsRef<str>>(function: &str, args: &'a [A]) -> LedgerResult<&'a str> {
    match args {
        [only] => Ok(only.as_ref()),
        _ => Err(LedgerError::invalid_record(format!(
            "{function} expects 1 argument, got {}",
            args.len()
        ))),
    }
}

/// Summary of a committed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationReceipt {
    /// Transaction id recorded on the invocation's tracing span.
    pub tx_id: Uuid,
    /// Function that ran.
    pub function: &'static str,
    /// Number of store keys written.
    pub writes: usize,
}

/// The ledger over a backing store.
#[derive(Debug)]
pub struct Ledger<S: LedgerStore> {
    store: S,
    initial_balance: Decimal,
}

impl<S: LedgerStore> Ledger<S> {
    /// Creates a ledger granting new accounts the default balance.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            initial_balance: DEFAULT_INITIAL_BALANCE,
        }
    }

    /// Sets the cash balance of newly created accounts.
    #[must_use]
    pub fn with_initial_balance(mut self, balance: Decimal) -> Self {
        self.initial_balance = balance;
        self
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Parses and executes a named invocation.
    ///
    /// # Errors
    ///
    /// Returns the parse error or the first error raised while executing.
    /// On error nothing is written.
    pub fn invoke<A: AsRef<str>>(
        &self,
        function: &str,
        args: &[A],
    ) -> LedgerResult<InvocationReceipt> {
        self.execute(Invocation::parse(function, args)?)
    }

    /// Executes a parsed invocation as one all-or-nothing write set.
    ///
    /// # Errors
    ///
    /// Returns the first error raised. On error nothing is written.
    pub fn execute(&self, invocation: Invocation) -> LedgerResult<InvocationReceipt> {
        let tx_id = Uuid::new_v4();
        let function = invocation.name();
        let span = info_span!("invoke", %tx_id, function);
        let _entered = span.enter();

        let staged = StagedStore::new(&self.store);
        if let Err(err) = self.apply(&staged, invocation) {
            warn!(kind = err.kind(), error = %err, "invocation rejected");
            return Err(err);
        }
        let writes = staged.commit()?;
        info!(writes, "invocation committed");
        Ok(InvocationReceipt {
            tx_id,
            function,
            writes,
        })
    }

    /// Answers a query.
    ///
    /// # Errors
    ///
    /// See [`QueryService::execute`].
    pub fn query<A: AsRef<str>>(&self, args: &[A]) -> LedgerResult<Vec<u8>> {
        QueryService::new(&self.store).execute(&Query::parse(args)?)
    }

    fn apply(&self, store: &StagedStore<'_, S>, invocation: Invocation) -> LedgerResult<()> {
        let documents = DocumentService::new(store);
        match invocation {
            Invocation::Init => {
                KeyRegistry::new(store).bootstrap()?;
                info!("registries reset");
            }
            Invocation::CreateAccount(username) => {
                AccountService::new(store, self.initial_balance).create_account(&username)?;
            }
            Invocation::CreateAccounts(count) => {
                AccountService::new(store, self.initial_balance).create_accounts(count)?;
            }
            Invocation::IssueCommercialPaper(paper) => {
                IssuanceService::new(store).issue(paper)?;
            }
            Invocation::TransferPaper(request) => {
                TransferService::new(store).transfer(&request)?;
            }
            Invocation::IssueQuote(quote) => {
                documents.record(quote)?;
            }
            Invocation::AddProperty(property) => {
                documents.record(property)?;
            }
            Invocation::IssueProposal(proposal) => {
                documents.record(proposal)?;
            }
            Invocation::IssueSaleAgreement(agreement) => {
                documents.record(agreement)?;
            }
            Invocation::IssueSaleDeeds(deed) => {
                documents.record(deed)?;
            }
            Invocation::AddNotification(notification) => {
                documents.record(notification)?;
            }
        }
        Ok(())
    }
}
