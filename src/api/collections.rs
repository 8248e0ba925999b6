//! Collections: checkout transactions and customer reserved accounts.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::encode_body;
use crate::http::HttpClient;
use crate::types::{ApiResponse, Metadata};
use crate::Result;

/// Collections endpoint group.
#[derive(Clone)]
pub struct CollectionsApi {
    http: Arc<HttpClient>,
}

impl CollectionsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Initializes a checkout transaction. The merchant contract code is
    /// attached from the client configuration.
    pub async fn initialize_transaction(
        &self,
        request: &InitializeTransactionRequest,
    ) -> Result<ApiResponse<InitializeTransactionResponse>> {
        let mut body = encode_body(request)?;
        self.http.inject_contract_code(&mut body);
        self.http
            .post("/api/v1/merchant/transactions/init-transaction", body)
            .await?
            .decode()
    }

    /// Looks up a transaction's payment status by reference.
    pub async fn get_transaction_status(
        &self,
        transaction_reference: &str,
    ) -> Result<ApiResponse<TransactionStatusResponse>> {
        self.http
            .get(
                "/api/v1/merchant/transactions/query",
                &[(
                    "transactionReference",
                    Some(transaction_reference.to_owned()),
                )],
            )
            .await?
            .decode()
    }

    /// Lists transactions for the merchant, paged.
    pub async fn get_all_transactions(
        &self,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<JsonValue>> {
        self.http
            .get(
                "/api/v1/merchant/transactions/list",
                &[
                    ("pageSize", Some(page_size.to_string())),
                    ("pageNumber", Some(page_number.to_string())),
                ],
            )
            .await?
            .decode()
    }

    /// Fetches the event log of one transaction.
    pub async fn get_transaction_logs(
        &self,
        transaction_reference: &str,
    ) -> Result<ApiResponse<JsonValue>> {
        self.http
            .get(
                "/api/v1/merchant/transactions/transaction-log",
                &[(
                    "transactionReference",
                    Some(transaction_reference.to_owned()),
                )],
            )
            .await?
            .decode()
    }

    /// Creates a dedicated virtual account reserved for one customer.
    pub async fn create_reserved_account(
        &self,
        request: &ReservedAccountRequest,
    ) -> Result<ApiResponse<ReservedAccountResponse>> {
        let mut body = encode_body(request)?;
        self.http.inject_contract_code(&mut body);
        self.http
            .post("/api/v1/bank-transfer/reserved-accounts/create", body)
            .await?
            .decode()
    }

    /// Lists reserved accounts, paged.
    pub async fn get_reserved_accounts(
        &self,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<JsonValue>> {
        self.http
            .get(
                "/api/v1/bank-transfer/reserved-accounts",
                &[
                    ("pageSize", Some(page_size.to_string())),
                    ("pageNumber", Some(page_number.to_string())),
                ],
            )
            .await?
            .decode()
    }

    /// Lists incoming transfers received by a reserved account.
    pub async fn get_reserved_account_transactions(
        &self,
        account_reference: &str,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<JsonValue>> {
        self.http
            .get(
                "/api/v1/bank-transfer/reserved-accounts/transactions",
                &[
                    ("accountReference", Some(account_reference.to_owned())),
                    ("pageSize", Some(page_size.to_string())),
                    ("pageNumber", Some(page_number.to_string())),
                ],
            )
            .await?
            .decode()
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeTransactionRequest {
    pub amount: f64,
    pub customer_name: String,
    pub customer_email: String,
    pub payment_reference: String,
    pub payment_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_methods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeTransactionResponse {
    pub transaction_reference: String,
    pub payment_reference: String,
    pub merchant_name: String,
    pub api_key: String,
    pub enabled_payment_method: Vec<String>,
    pub checkout_url: String,
    pub amount: f64,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub contract_code: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub payment_description: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub payment_methods: Option<Vec<String>>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatusResponse {
    pub transaction_reference: String,
    pub payment_reference: String,
    pub amount_paid: f64,
    pub paid_on: String,
    pub transaction_status: String,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub transaction_type: Option<String>,
    pub currency_code: String,
    pub payment_method: String,
    pub customer: TransactionCustomer,
    #[serde(default, rename = "metaData")]
    pub meta_data: Option<Metadata>,
}

/// Customer block as returned on collection transactions.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCustomer {
    pub email: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservedAccountRequest {
    pub account_reference: String,
    pub account_name: String,
    pub customer_email: String,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_bvn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get_all_available_banks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_banks: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservedAccountResponse {
    pub account_reference: String,
    pub account_number: String,
    pub account_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub currency_code: String,
    pub contract_code: String,
    pub bank_code: String,
    pub bank_name: String,
    pub status: String,
    pub created_on: String,
    #[serde(default)]
    pub get_all_available_banks: Option<bool>,
    #[serde(default)]
    pub preferred_banks: Option<Vec<String>>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}
