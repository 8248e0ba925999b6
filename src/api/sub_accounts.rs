//! Sub-accounts: split-settlement accounts under the merchant.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::encode_body;
use crate::http::HttpClient;
use crate::types::{ApiResponse, Metadata, Page};
use crate::Result;

/// Sub-accounts endpoint group.
#[derive(Clone)]
pub struct SubAccountsApi {
    http: Arc<HttpClient>,
}

impl SubAccountsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Creates a sub-account. The merchant contract code is attached from
    /// the client configuration.
    pub async fn create_sub_account(
        &self,
        request: &CreateSubAccountRequest,
    ) -> Result<ApiResponse<SubAccountDetails>> {
        let mut body = encode_body(request)?;
        self.http.inject_contract_code(&mut body);
        self.http
            .post("/api/v1/subaccounts/create", body)
            .await?
            .decode()
    }

    /// Updates an existing sub-account.
    pub async fn update_sub_account(
        &self,
        request: &UpdateSubAccountRequest,
    ) -> Result<ApiResponse<SubAccountDetails>> {
        self.http
            .put(
                &format!("/api/v1/subaccounts/{}/update", request.sub_account_code),
                encode_body(request)?,
            )
            .await?
            .decode()
    }

    /// Fetches one sub-account by code.
    pub async fn get_sub_account_details(
        &self,
        sub_account_code: &str,
    ) -> Result<ApiResponse<SubAccountDetails>> {
        self.http
            .get(&format!("/api/v1/subaccounts/{sub_account_code}"), &[])
            .await?
            .decode()
    }

    /// Lists sub-accounts with optional code/status filters.
    pub async fn get_sub_accounts(
        &self,
        request: &SubAccountListRequest,
    ) -> Result<ApiResponse<Page<SubAccountDetails>>> {
        self.http
            .get(
                "/api/v1/subaccounts",
                &[
                    ("pageSize", Some(request.page_size.unwrap_or(10).to_string())),
                    (
                        "pageNumber",
                        Some(request.page_number.unwrap_or(1).to_string()),
                    ),
                    ("subAccountCode", request.sub_account_code.clone()),
                    ("status", request.status.clone()),
                ],
            )
            .await?
            .decode()
    }

    /// Lists transactions settled into one sub-account.
    pub async fn get_sub_account_transactions(
        &self,
        request: &SubAccountTransactionRequest,
    ) -> Result<ApiResponse<Page<SubAccountTransaction>>> {
        self.http
            .get(
                &format!(
                    "/api/v1/subaccounts/{}/transactions",
                    request.sub_account_code
                ),
                &[
                    ("pageSize", Some(request.page_size.unwrap_or(10).to_string())),
                    (
                        "pageNumber",
                        Some(request.page_number.unwrap_or(1).to_string()),
                    ),
                    ("fromDate", request.from_date.clone()),
                    ("toDate", request.to_date.clone()),
                ],
            )
            .await?
            .decode()
    }

    /// Lists settlements paid out to one sub-account.
    pub async fn get_sub_account_settlements(
        &self,
        request: &SubAccountSettlementRequest,
    ) -> Result<ApiResponse<Page<SubAccountSettlement>>> {
        self.http
            .get(
                &format!(
                    "/api/v1/subaccounts/{}/settlements",
                    request.sub_account_code
                ),
                &[
                    ("pageSize", Some(request.page_size.unwrap_or(10).to_string())),
                    (
                        "pageNumber",
                        Some(request.page_number.unwrap_or(1).to_string()),
                    ),
                    ("fromDate", request.from_date.clone()),
                    ("toDate", request.to_date.clone()),
                ],
            )
            .await?
            .decode()
    }

    /// Fetches the available and ledger balances of one sub-account.
    pub async fn get_sub_account_balance(
        &self,
        sub_account_code: &str,
    ) -> Result<ApiResponse<SubAccountBalanceResponse>> {
        self.http
            .get(
                &format!("/api/v1/subaccounts/{sub_account_code}/balance"),
                &[],
            )
            .await?
            .decode()
    }

    /// Deactivates a sub-account; settlements to it stop until reactivation.
    pub async fn deactivate_sub_account(
        &self,
        request: &DeactivateSubAccountRequest,
    ) -> Result<ApiResponse<DeactivateSubAccountResponse>> {
        self.http
            .put(
                &format!(
                    "/api/v1/subaccounts/{}/deactivate",
                    request.sub_account_code
                ),
                encode_body(request)?,
            )
            .await?
            .decode()
    }

    /// Reactivates a previously deactivated sub-account.
    pub async fn reactivate_sub_account(
        &self,
        sub_account_code: &str,
    ) -> Result<ApiResponse<SubAccountDetails>> {
        self.http
            .put(
                &format!("/api/v1/subaccounts/{sub_account_code}/reactivate"),
                json!({}),
            )
            .await?
            .decode()
    }
}

/// How collection amounts are split into a sub-account.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SplitType {
    Percentage,
    Fixed,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubAccountRequest {
    pub sub_account_code: String,
    pub sub_account_name: String,
    pub email: String,
    pub mobile_number: String,
    pub split_percentage: f64,
    pub fee_percentage: f64,
    pub fee_bearer: bool,
    pub split_type: SplitType,
    pub currency_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubAccountRequest {
    pub sub_account_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_bearer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_type: Option<SplitType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubAccountDetails {
    pub sub_account_code: String,
    pub sub_account_name: String,
    pub email: String,
    #[serde(default)]
    pub mobile_number: Option<String>,
    pub split_percentage: f64,
    #[serde(default)]
    pub fee_percentage: Option<f64>,
    #[serde(default)]
    pub fee_bearer: Option<bool>,
    #[serde(default)]
    pub split_type: Option<String>,
    pub currency_code: String,
    pub contract_code: String,
    #[serde(default)]
    pub account_reference: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub bank_code: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    pub status: String,
    pub created_on: String,
    #[serde(default)]
    pub updated_on: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Clone, Debug, Default)]
pub struct SubAccountListRequest {
    pub page_size: Option<u32>,
    pub page_number: Option<u32>,
    pub sub_account_code: Option<String>,
    pub status: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct SubAccountTransactionRequest {
    pub sub_account_code: String,
    pub page_size: Option<u32>,
    pub page_number: Option<u32>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubAccountTransaction {
    pub transaction_reference: String,
    pub payment_reference: String,
    pub amount_paid: f64,
    pub total_payable: f64,
    #[serde(default)]
    pub settlement_amount: Option<f64>,
    pub paid_on: String,
    pub payment_status: String,
    #[serde(default)]
    pub payment_description: Option<String>,
    pub currency: String,
    pub payment_method: String,
    pub customer: crate::api::collections::TransactionCustomer,
    #[serde(default, rename = "metaData")]
    pub meta_data: Option<Metadata>,
}

#[derive(Clone, Debug, Default)]
pub struct SubAccountSettlementRequest {
    pub sub_account_code: String,
    pub page_size: Option<u32>,
    pub page_number: Option<u32>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubAccountSettlement {
    pub settlement_reference: String,
    pub sub_account_code: String,
    #[serde(default)]
    pub sub_account_name: Option<String>,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub settlement_date: Option<String>,
    pub created_on: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubAccountBalanceResponse {
    pub sub_account_code: String,
    #[serde(default)]
    pub sub_account_name: Option<String>,
    pub available_balance: f64,
    pub ledger_balance: f64,
    pub currency: String,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeactivateSubAccountRequest {
    pub sub_account_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeactivateSubAccountResponse {
    pub sub_account_code: String,
    pub status: String,
    pub deactivated_on: String,
    #[serde(default)]
    pub reason: Option<String>,
}
