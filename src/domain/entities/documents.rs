//! # Document Records
//!
//! Trade-finance and land-record documents kept alongside the paper ledger:
//! quotes, properties, proposals, sale agreements, sale deeds and
//! notifications.
//!
//! These are plain records. Every field is text on the wire and missing
//! fields decode as empty, matching what existing ledgers already hold.
//! Only [`Quote`] carries behavior: repeated issuance adds to its quantity.

use super::wire::null_as_default;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::CheckedArithmetic;
use serde::{Deserialize, Serialize};

/// A trade-finance quotation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Quote {
    /// Quotation number, the record key.
    #[serde(rename = "quoteno")]
    pub quote_no: String,
    /// Quoted item.
    pub item: String,
    /// Integer quantity carried as text.
    pub qty: String,
    /// Shipping terms.
    #[serde(rename = "shipterm")]
    pub ship_term: String,
    /// Shipping date.
    #[serde(rename = "shipdate")]
    pub ship_date: String,
    /// Item details.
    #[serde(rename = "itemdetails")]
    pub item_details: String,
    /// Workflow status.
    pub status: String,
    /// Issuing party.
    pub issuer: String,
    /// Issue date.
    #[serde(rename = "issueDate")]
    pub issue_date: String,
    /// Last modification date.
    #[serde(rename = "modifiedon")]
    pub modified_on: String,
    /// Requesting organisation.
    #[serde(rename = "requesterorg")]
    pub requester_org: String,
    /// Country.
    pub country: String,
    /// Free-form slot 1.
    pub parameter1: String,
    /// Free-form slot 2.
    pub parameter2: String,
    /// Free-form slot 3.
    pub parameter3: String,
    /// Free-form slot 4.
    pub parameter4: String,
    /// Free-form slot 5.
    pub parameter5: String,
}

impl Quote {
    /// Adds the incoming quote's quantity to this one.
    ///
    /// An empty quantity counts as zero.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRecord` if either quantity is not a
    /// non-negative integer, `DomainError::Arithmetic` on overflow.
    pub fn add_quantity(&mut self, incoming: &Quote) -> DomainResult<()> {
        let current = parse_qty(&self.qty, &self.quote_no)?;
        let added = parse_qty(&incoming.qty, &incoming.quote_no)?;
        self.qty = current.safe_add(added)?.to_string();
        Ok(())
    }
}

fn parse_qty(qty: &str, quote_no: &str) -> DomainResult<u64> {
    let trimmed = qty.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(|_| {
        DomainError::invalid_record(format!("quote {quote_no} has non-integer qty {qty:?}"))
    })
}

/// A previous holder of a property.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct History {
    /// Holder during the period.
    pub owner: String,
    /// Location recorded for the holder.
    pub location: String,
    /// Start of the holding.
    pub from: String,
    /// End of the holding.
    pub to: String,
}

/// A litigation note attached to a property.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Litigation {
    /// Free-form litigation text.
    pub data: String,
}

/// A land record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Property {
    /// Property identifier, the record key.
    #[serde(rename = "propid")]
    pub prop_id: String,
    /// Current owner.
    pub owner: String,
    /// Tax reference.
    pub tax: String,
    /// Property type.
    #[serde(rename = "proptype")]
    pub prop_type: String,
    // the misspelled keys are what stored records use
    /// Area.
    #[serde(rename = "mesaure")]
    pub measure: String,
    /// Area as displayed, with unit.
    #[serde(rename = "mesauredisp")]
    pub measure_display: String,
    /// Postal address.
    pub address: String,
    /// Locality.
    pub location: String,
    /// Latitude.
    pub latitude: String,
    /// Longitude.
    pub longitude: String,
    /// Ownership history.
    #[serde(rename = "history", deserialize_with = "null_as_default")]
    pub histories: Vec<History>,
    /// Pending or past litigation.
    #[serde(deserialize_with = "null_as_default")]
    pub litigations: Vec<Litigation>,
    /// Free-form slot 1.
    pub parameter1: String,
    /// Free-form slot 2.
    pub parameter2: String,
    /// Free-form slot 3.
    pub parameter3: String,
    /// Free-form slot 4.
    pub parameter4: String,
    /// Free-form slot 5.
    pub parameter5: String,
    /// Free-form slot 6.
    pub parameter6: String,
}

/// A purchase proposal for a property.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Proposal {
    /// Proposal number, the record key.
    #[serde(rename = "proposalNo")]
    pub proposal_no: String,
    /// Property the proposal is for.
    #[serde(rename = "propid")]
    pub prop_id: String,
    /// Proposing party.
    #[serde(rename = "proposedby")]
    pub proposed_by: String,
    /// Offered price.
    #[serde(rename = "proposedprice")]
    pub proposed_price: String,
    /// Date of the offer.
    #[serde(rename = "proposeddate")]
    pub proposed_date: String,
    /// Free-form slot 1.
    pub parameter1: String,
    /// Free-form slot 2.
    pub parameter2: String,
    /// Free-form slot 3.
    pub parameter3: String,
    /// Free-form slot 4.
    pub parameter4: String,
    /// Free-form slot 5.
    pub parameter5: String,
    /// Free-form slot 6.
    pub parameter6: String,
}

/// A party to a sale agreement.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Party {
    /// Full name.
    pub name: String,
    /// Date of birth.
    pub dob: String,
    /// Kind of identity document.
    #[serde(rename = "idtype")]
    pub id_type: String,
    /// Identity document number.
    #[serde(rename = "idnumber")]
    pub id_number: String,
    /// Postal address.
    pub address: String,
    /// Role in the agreement.
    #[serde(rename = "type")]
    pub party_type: String,
}

/// Financing attached to a sale agreement.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Loan {
    /// Lending bank.
    pub bank: String,
    /// Lending branch.
    pub branch: String,
    /// Principal.
    pub amount: String,
    /// Loan product.
    #[serde(rename = "type")]
    pub loan_type: String,
    /// Share of the price financed.
    pub percentage: String,
    /// Rate of interest.
    pub roi: String,
    /// Term.
    pub tenure: String,
    /// Approval date.
    #[serde(rename = "aprovedon")]
    pub approved_on: String,
    /// Application date.
    #[serde(rename = "appliedon")]
    pub applied_on: String,
}

/// An agreement to sell a property.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SaleAgreement {
    /// Agreement number, the record key.
    #[serde(rename = "agreementno")]
    pub agreement_no: String,
    /// Property being sold.
    #[serde(rename = "propid")]
    pub prop_id: String,
    /// Buying parties.
    #[serde(rename = "buyer", deserialize_with = "null_as_default")]
    pub parties: Vec<Party>,
    /// Buyer financing.
    pub loan: Loan,
    /// Free-form slot 1.
    pub parameter1: String,
    /// Free-form slot 2.
    pub parameter2: String,
    /// Free-form slot 3.
    pub parameter3: String,
    /// Free-form slot 4.
    pub parameter4: String,
    /// Free-form slot 5.
    pub parameter5: String,
    /// Free-form slot 6.
    pub parameter6: String,
    /// Signing date.
    #[serde(rename = "signedon")]
    pub signed_on: String,
}

/// Registrar that recorded a deed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Registrar {
    /// Registrar name.
    pub name: String,
    /// Registry office.
    pub location: String,
}

/// One payment made to settle a deed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settlement {
    /// Payment method.
    #[serde(rename = "type")]
    pub settlement_type: String,
    /// Amount paid.
    pub amount: String,
    /// Payment reference.
    #[serde(rename = "ref")]
    pub reference: String,
    /// Payment date.
    pub date: String,
}

/// A registered sale deed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SaleDeed {
    /// Deed number, the record key.
    #[serde(rename = "deedno")]
    pub deed_no: String,
    /// Agreement the deed executes.
    #[serde(rename = "agreementno")]
    pub agreement_no: String,
    /// Recording registrar.
    pub registrar: Registrar,
    /// Payments made.
    #[serde(rename = "settlement", deserialize_with = "null_as_default")]
    pub settlements: Vec<Settlement>,
    /// Signing date.
    #[serde(rename = "signedon")]
    pub signed_on: String,
}

/// A free-form notification with ten parameter slots.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Notification {
    /// Notification identifier, the record key.
    #[serde(rename = "notificationId")]
    pub notification_id: String,
    /// Free-form slot 1.
    pub parameter1: String,
    /// Free-form slot 2.
    pub parameter2: String,
    /// Free-form slot 3.
    pub parameter3: String,
    /// Free-form slot 4.
    pub parameter4: String,
    /// Free-form slot 5.
    pub parameter5: String,
    /// Free-form slot 6.
    pub parameter6: String,
    /// Free-form slot 7.
    pub parameter7: String,
    /// Free-form slot 8.
    pub parameter8: String,
    /// Free-form slot 9.
    pub parameter9: String,
    /// Free-form slot 10.
    pub parameter10: String,
}
