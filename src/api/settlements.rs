//! Settlements: payout batches, configurations and payout status.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::encode_body;
use crate::http::HttpClient;
use crate::types::{ApiResponse, Metadata, Page, Period};
use crate::Result;

/// Settlements endpoint group.
#[derive(Clone)]
pub struct SettlementsApi {
    http: Arc<HttpClient>,
}

impl SettlementsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Lists settlements with optional status/reference/date filters.
    pub async fn get_settlements(
        &self,
        request: &SettlementListRequest,
    ) -> Result<ApiResponse<Page<SettlementDetails>>> {
        self.http
            .get(
                "/api/v1/settlements",
                &[
                    ("pageSize", Some(request.page_size.unwrap_or(10).to_string())),
                    (
                        "pageNumber",
                        Some(request.page_number.unwrap_or(1).to_string()),
                    ),
                    ("fromDate", request.from_date.clone()),
                    ("toDate", request.to_date.clone()),
                    ("status", request.status.clone()),
                    ("settlementReference", request.settlement_reference.clone()),
                ],
            )
            .await?
            .decode()
    }

    /// Fetches one settlement, including its member transactions.
    pub async fn get_settlement_details(
        &self,
        settlement_reference: &str,
    ) -> Result<ApiResponse<SettlementDetailsResponse>> {
        self.http
            .get(&format!("/api/v1/settlements/{settlement_reference}"), &[])
            .await?
            .decode()
    }

    /// Aggregated settlement totals for an optional date range and status.
    pub async fn get_settlement_summary(
        &self,
        request: &SettlementSummaryRequest,
    ) -> Result<ApiResponse<SettlementSummaryResponse>> {
        self.http
            .get(
                "/api/v1/settlements/summary",
                &[
                    ("fromDate", request.from_date.clone()),
                    ("toDate", request.to_date.clone()),
                    ("status", request.status.clone()),
                ],
            )
            .await?
            .decode()
    }

    /// Lists the transactions contained in one settlement, paged.
    pub async fn get_settlement_transactions(
        &self,
        request: &SettlementTransactionsRequest,
    ) -> Result<ApiResponse<Page<SettlementTransaction>>> {
        self.http
            .get(
                &format!(
                    "/api/v1/settlements/{}/transactions",
                    request.settlement_reference
                ),
                &[
                    ("pageSize", Some(request.page_size.unwrap_or(10).to_string())),
                    (
                        "pageNumber",
                        Some(request.page_number.unwrap_or(1).to_string()),
                    ),
                ],
            )
            .await?
            .decode()
    }

    /// Updates the processing status of one settlement.
    pub async fn update_settlement_status(
        &self,
        request: &SettlementStatusUpdateRequest,
    ) -> Result<ApiResponse<SettlementStatusUpdateResponse>> {
        self.http
            .put(
                &format!(
                    "/api/v1/settlements/{}/status",
                    request.settlement_reference
                ),
                encode_body(request)?,
            )
            .await?
            .decode()
    }

    /// Registers a settlement destination account.
    pub async fn create_settlement_configuration(
        &self,
        request: &SettlementConfigurationRequest,
    ) -> Result<ApiResponse<SettlementConfiguration>> {
        self.http
            .post(
                "/api/v1/settlements/configuration/create",
                encode_body(request)?,
            )
            .await?
            .decode()
    }

    /// Lists settlement destination accounts, paged.
    pub async fn get_settlement_configurations(
        &self,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<Page<SettlementConfiguration>>> {
        self.http
            .get(
                "/api/v1/settlements/configuration",
                &[
                    ("pageSize", Some(page_size.to_string())),
                    ("pageNumber", Some(page_number.to_string())),
                ],
            )
            .await?
            .decode()
    }

    /// Updates a settlement destination account.
    pub async fn update_settlement_configuration(
        &self,
        request: &UpdateSettlementConfigurationRequest,
    ) -> Result<ApiResponse<SettlementConfiguration>> {
        self.http
            .put(
                &format!(
                    "/api/v1/settlements/configuration/{}/update",
                    request.configuration_id
                ),
                encode_body(request)?,
            )
            .await?
            .decode()
    }

    /// Removes a settlement destination account.
    pub async fn delete_settlement_configuration(
        &self,
        configuration_id: &str,
    ) -> Result<ApiResponse<DeleteSettlementConfigurationResponse>> {
        self.http
            .delete(&format!(
                "/api/v1/settlements/configuration/{configuration_id}/delete"
            ))
            .await?
            .decode()
    }

    /// Pays out one settlement to a bank account or wallet.
    pub async fn initiate_settlement_payout(
        &self,
        request: &SettlementPayoutRequest,
    ) -> Result<ApiResponse<SettlementPayoutStatus>> {
        self.http
            .post("/api/v1/settlements/payout", encode_body(request)?)
            .await?
            .decode()
    }

    /// Looks up the status of a settlement payout.
    pub async fn get_settlement_payout_status(
        &self,
        payout_reference: &str,
    ) -> Result<ApiResponse<SettlementPayoutStatus>> {
        self.http
            .get(
                &format!("/api/v1/settlements/payout/{payout_reference}"),
                &[],
            )
            .await?
            .decode()
    }

    /// Lists settlements inside an explicit date range, paged.
    pub async fn get_settlements_by_date_range(
        &self,
        from_date: &str,
        to_date: &str,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<Page<SettlementDetails>>> {
        self.http
            .get(
                "/api/v1/settlements/date-range",
                &[
                    ("fromDate", Some(from_date.to_owned())),
                    ("toDate", Some(to_date.to_owned())),
                    ("pageSize", Some(page_size.to_string())),
                    ("pageNumber", Some(page_number.to_string())),
                ],
            )
            .await?
            .decode()
    }

    /// Lists settlements that have not yet been processed, paged.
    pub async fn get_pending_settlements(
        &self,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<Page<SettlementDetails>>> {
        self.http
            .get(
                "/api/v1/settlements/pending",
                &[
                    ("pageSize", Some(page_size.to_string())),
                    ("pageNumber", Some(page_number.to_string())),
                ],
            )
            .await?
            .decode()
    }

    /// Lists fully processed settlements, paged.
    pub async fn get_completed_settlements(
        &self,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<Page<SettlementDetails>>> {
        self.http
            .get(
                "/api/v1/settlements/completed",
                &[
                    ("pageSize", Some(page_size.to_string())),
                    ("pageNumber", Some(page_number.to_string())),
                ],
            )
            .await?
            .decode()
    }
}

#[derive(Clone, Debug, Default)]
pub struct SettlementListRequest {
    pub page_size: Option<u32>,
    pub page_number: Option<u32>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub status: Option<String>,
    pub settlement_reference: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementDetails {
    pub settlement_reference: String,
    #[serde(default)]
    pub settlement_id: Option<String>,
    pub total_amount: f64,
    pub total_fee: f64,
    pub net_amount: f64,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub settlement_date: Option<String>,
    pub created_on: String,
    #[serde(default)]
    pub updated_on: Option<String>,
    #[serde(default)]
    pub bank_code: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub transaction_count: Option<u64>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementTransaction {
    pub transaction_reference: String,
    pub payment_reference: String,
    pub amount: f64,
    pub fee: f64,
    pub net_amount: f64,
    pub currency: String,
    pub status: String,
    pub paid_on: String,
    pub payment_method: String,
    pub customer: crate::api::collections::TransactionCustomer,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

/// Settlement details including the settled transactions.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementDetailsResponse {
    #[serde(flatten)]
    pub details: SettlementDetails,
    #[serde(default)]
    pub transactions: Vec<SettlementTransaction>,
}

#[derive(Clone, Debug, Default)]
pub struct SettlementSummaryRequest {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub status: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementStatusBreakdown {
    pub pending: u64,
    pub processing: u64,
    pub completed: u64,
    pub failed: u64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementAmountBreakdown {
    pub pending: f64,
    pub processing: f64,
    pub completed: f64,
    pub failed: f64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementSummaryResponse {
    pub total_settlements: u64,
    pub total_amount: f64,
    pub total_fee: f64,
    pub net_amount: f64,
    pub currency: String,
    pub period: Period,
    pub status_breakdown: SettlementStatusBreakdown,
    pub amount_breakdown: SettlementAmountBreakdown,
}

#[derive(Clone, Debug, Default)]
pub struct SettlementTransactionsRequest {
    pub settlement_reference: String,
    pub page_size: Option<u32>,
    pub page_number: Option<u32>,
}

/// Processing states a settlement batch moves through.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettlementStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementStatusUpdateRequest {
    pub settlement_reference: String,
    pub status: SettlementStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementStatusUpdateResponse {
    pub settlement_reference: String,
    pub status: String,
    pub updated_on: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementConfigurationRequest {
    pub bank_code: String,
    pub account_number: String,
    pub account_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementConfiguration {
    pub configuration_id: String,
    pub bank_code: String,
    #[serde(default)]
    pub bank_name: Option<String>,
    pub account_number: String,
    pub account_name: String,
    pub is_default: bool,
    pub status: String,
    pub created_on: String,
    #[serde(default)]
    pub updated_on: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettlementConfigurationRequest {
    pub configuration_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSettlementConfigurationResponse {
    pub configuration_id: String,
    pub deleted: bool,
    pub deleted_on: String,
}

/// Destination kind for a settlement payout.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayoutMethod {
    BankTransfer,
    Wallet,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementPayoutRequest {
    pub settlement_reference: String,
    pub payout_method: PayoutMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_bank_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementPayoutStatus {
    pub payout_reference: String,
    pub settlement_reference: String,
    pub payout_method: String,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub initiated_on: String,
    #[serde(default)]
    pub completed_on: Option<String>,
    #[serde(default)]
    pub failure_reason: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}
