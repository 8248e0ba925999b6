//! Disbursements: single and bulk transfers out of the merchant account.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::encode_body;
use crate::http::HttpClient;
use crate::types::{ApiResponse, Metadata};
use crate::Result;

/// Disbursements endpoint group.
#[derive(Clone)]
pub struct DisbursementsApi {
    http: Arc<HttpClient>,
}

impl DisbursementsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Initiates one transfer to a bank account.
    pub async fn initiate_single_transfer(
        &self,
        request: &SingleTransferRequest,
    ) -> Result<ApiResponse<TransferResponse>> {
        self.http
            .post("/api/v1/disbursements/single", encode_body(request)?)
            .await?
            .decode()
    }

    /// Initiates a batch of transfers processed as one unit.
    pub async fn initiate_bulk_transfer(
        &self,
        request: &BulkTransferRequest,
    ) -> Result<ApiResponse<BulkTransferResponse>> {
        self.http
            .post("/api/v1/disbursements/bulk", encode_body(request)?)
            .await?
            .decode()
    }

    /// Looks up a transfer by its reference.
    pub async fn get_transfer_status(
        &self,
        reference: &str,
    ) -> Result<ApiResponse<TransferResponse>> {
        self.http
            .get(&format!("/api/v1/disbursements/{reference}"), &[])
            .await?
            .decode()
    }

    /// Lists disbursement activity, paged.
    pub async fn get_transfer_logs(
        &self,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<JsonValue>> {
        self.http
            .get(
                "/api/v1/disbursements/logs",
                &[
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
pub struct SingleTransferRequest {
    pub amount: f64,
    pub reference: String,
    pub narration: String,
    pub destination_bank_code: String,
    pub destination_account_number: String,
    pub destination_account_name: String,
    pub currency: String,
    pub source_account_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Behavior when one entry of a bulk batch fails validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnValidationFailure {
    Continue,
    Stop,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkTransferRequest {
    pub title: String,
    pub batch_reference: String,
    pub narration: String,
    pub source_account_number: String,
    pub currency: String,
    pub on_validation_failure: OnValidationFailure,
    pub notification_interval: u32,
    pub transactions: Vec<BulkTransferItem>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkTransferItem {
    pub amount: f64,
    pub reference: String,
    pub narration: String,
    pub destination_bank_code: String,
    pub destination_account_number: String,
    pub destination_account_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    pub reference: String,
    pub amount: f64,
    pub status: String,
    #[serde(default)]
    pub narration: Option<String>,
    pub destination_bank_code: String,
    pub destination_account_number: String,
    #[serde(default)]
    pub destination_account_name: Option<String>,
    pub currency: String,
    #[serde(default)]
    pub source_account_number: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    pub created_on: String,
    #[serde(default)]
    pub updated_on: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkTransferResponse {
    pub batch_reference: String,
    pub total_amount: f64,
    pub total_fee: f64,
    pub total_count: u32,
    pub successful_count: u32,
    pub failed_count: u32,
    pub pending_count: u32,
    pub status: String,
    pub created_on: String,
    #[serde(default)]
    pub updated_on: Option<String>,
    #[serde(default)]
    pub transactions: Vec<TransferResponse>,
}
