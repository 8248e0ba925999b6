//! Wallets: merchant sub-wallets, balances and statements.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::encode_body;
use crate::http::HttpClient;
use crate::types::{ApiResponse, Metadata, Pagination};
use crate::Result;

/// Wallets endpoint group.
#[derive(Clone)]
pub struct WalletsApi {
    http: Arc<HttpClient>,
}

impl WalletsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Creates a wallet. The merchant contract code is attached from the
    /// client configuration.
    pub async fn create_wallet(
        &self,
        request: &CreateWalletRequest,
    ) -> Result<ApiResponse<WalletResponse>> {
        let mut body = encode_body(request)?;
        self.http.inject_contract_code(&mut body);
        self.http
            .post("/api/v1/wallets/create", body)
            .await?
            .decode()
    }

    /// Lists wallets, paged.
    pub async fn get_wallets(
        &self,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<JsonValue>> {
        self.http
            .get(
                "/api/v1/wallets",
                &[
                    ("pageSize", Some(page_size.to_string())),
                    ("pageNumber", Some(page_number.to_string())),
                ],
            )
            .await?
            .decode()
    }

    /// Fetches the current balance of one wallet.
    pub async fn get_wallet_balance(
        &self,
        wallet_reference: &str,
    ) -> Result<ApiResponse<WalletBalanceResponse>> {
        self.http
            .get(&format!("/api/v1/wallets/{wallet_reference}/balance"), &[])
            .await?
            .decode()
    }

    /// Fetches a wallet's transaction statement for an optional date range.
    pub async fn get_wallet_statement(
        &self,
        request: &WalletStatementRequest,
    ) -> Result<ApiResponse<WalletStatementResponse>> {
        self.http
            .get(
                &format!(
                    "/api/v1/wallets/{}/statement",
                    request.wallet_reference
                ),
                &[
                    ("fromDate", request.from_date.clone()),
                    ("toDate", request.to_date.clone()),
                    ("pageSize", request.page_size.map(|v| v.to_string())),
                    ("pageNumber", request.page_number.map(|v| v.to_string())),
                ],
            )
            .await?
            .decode()
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletRequest {
    pub wallet_reference: String,
    pub wallet_name: String,
    pub customer_email: String,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletResponse {
    pub wallet_reference: String,
    pub wallet_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub currency_code: String,
    pub contract_code: String,
    pub status: String,
    pub created_on: String,
    #[serde(default)]
    pub updated_on: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalanceResponse {
    pub wallet_reference: String,
    #[serde(default)]
    pub wallet_name: Option<String>,
    pub balance: f64,
    pub currency_code: String,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct WalletStatementRequest {
    pub wallet_reference: String,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub page_size: Option<u32>,
    pub page_number: Option<u32>,
}

/// Direction of a wallet statement entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WalletEntryType {
    Credit,
    Debit,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletStatementEntry {
    pub reference: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub entry_type: WalletEntryType,
    #[serde(default)]
    pub narration: Option<String>,
    /// Wallet balance after this entry.
    pub balance: f64,
    pub created_on: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletStatementResponse {
    pub wallet_reference: String,
    pub transactions: Vec<WalletStatementEntry>,
    pub pagination: Pagination,
}
