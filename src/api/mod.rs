//! Endpoint groups for the Monnify API domains.
//!
//! Each group holds a shared handle to the request core and maps one
//! method to one gateway endpoint. Groups are reached through the fields
//! of [`MonnifyClient`](crate::MonnifyClient).

pub mod collections;
pub mod disbursements;
pub mod invoices;
pub mod settlements;
pub mod sub_accounts;
pub mod transactions;
pub mod verification;
pub mod wallets;

pub use collections::CollectionsApi;
pub use disbursements::DisbursementsApi;
pub use invoices::InvoicesApi;
pub use settlements::SettlementsApi;
pub use sub_accounts::SubAccountsApi;
pub use transactions::TransactionsApi;
pub use verification::VerificationApi;
pub use wallets::WalletsApi;

use crate::{MonnifyError, Result};

/// Serializes a typed request into the JSON body handed to the core.
pub(crate) fn encode_body<T: serde::Serialize>(value: &T) -> Result<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|err| MonnifyError::Decode(format!("request body encoding failed: {err}")))
}
