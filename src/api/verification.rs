//! Verification value-added services: BVN, bank account and phone number.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::encode_body;
use crate::http::HttpClient;
use crate::types::ApiResponse;
use crate::Result;

/// Verification endpoint group.
#[derive(Clone)]
pub struct VerificationApi {
    http: Arc<HttpClient>,
}

impl VerificationApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Verifies a Bank Verification Number.
    pub async fn verify_bvn(
        &self,
        request: &BvnVerificationRequest,
    ) -> Result<ApiResponse<BvnVerificationResponse>> {
        self.http
            .post("/api/v1/vas/bvn-verification", encode_body(request)?)
            .await?
            .decode()
    }

    /// Resolves a bank account number to its account name.
    pub async fn verify_bank_account(
        &self,
        request: &BankAccountVerificationRequest,
    ) -> Result<ApiResponse<BankAccountVerificationResponse>> {
        self.http
            .post(
                "/api/v1/vas/bank-account-verification",
                encode_body(request)?,
            )
            .await?
            .decode()
    }

    /// Validates a phone number and resolves its carrier.
    pub async fn verify_phone_number(
        &self,
        request: &PhoneNumberVerificationRequest,
    ) -> Result<ApiResponse<PhoneNumberVerificationResponse>> {
        self.http
            .post(
                "/api/v1/vas/phone-number-verification",
                encode_body(request)?,
            )
            .await?
            .decode()
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BvnVerificationRequest {
    pub bvn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BvnVerificationResponse {
    pub bvn: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub date_of_birth: String,
    pub phone_number: String,
    #[serde(default)]
    pub registration_date: Option<String>,
    #[serde(default)]
    pub enrollment_bank: Option<String>,
    #[serde(default)]
    pub enrollment_branch: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub level_of_account: Option<String>,
    #[serde(default)]
    pub lga_of_origin: Option<String>,
    #[serde(default)]
    pub lga_of_residence: Option<String>,
    #[serde(default)]
    pub marital_status: Option<String>,
    #[serde(default)]
    pub nin: Option<String>,
    #[serde(default)]
    pub name_on_card: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub state_of_origin: Option<String>,
    #[serde(default)]
    pub state_of_residence: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub watch_listed: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountVerificationRequest {
    pub account_number: String,
    pub bank_code: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountVerificationResponse {
    pub account_number: String,
    pub account_name: String,
    pub bank_code: String,
    #[serde(default)]
    pub bank_name: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumberVerificationRequest {
    pub phone_number: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumberVerificationResponse {
    pub phone_number: String,
    pub is_valid: bool,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
}
