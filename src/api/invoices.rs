//! Invoices: hosted invoice creation, lifecycle and payment tracking.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::encode_body;
use crate::http::HttpClient;
use crate::types::{ApiResponse, Customer, Metadata, Page, Period};
use crate::Result;

/// Invoices endpoint group.
#[derive(Clone)]
pub struct InvoicesApi {
    http: Arc<HttpClient>,
}

impl InvoicesApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Creates an invoice. The merchant contract code is attached from the
    /// client configuration.
    pub async fn create_invoice(
        &self,
        request: &CreateInvoiceRequest,
    ) -> Result<ApiResponse<InvoiceDetails>> {
        let mut body = encode_body(request)?;
        self.http.inject_contract_code(&mut body);
        self.http
            .post("/api/v1/merchant/invoices/create", body)
            .await?
            .decode()
    }

    /// Fetches one invoice by reference.
    pub async fn get_invoice_details(
        &self,
        invoice_reference: &str,
    ) -> Result<ApiResponse<InvoiceDetails>> {
        self.http
            .get(
                &format!("/api/v1/merchant/invoices/{invoice_reference}"),
                &[],
            )
            .await?
            .decode()
    }

    /// Lists invoices with optional reference/status/date filters.
    pub async fn get_invoices(
        &self,
        request: &InvoiceListRequest,
    ) -> Result<ApiResponse<Page<InvoiceDetails>>> {
        self.http
            .get(
                "/api/v1/merchant/invoices",
                &[
                    ("pageSize", Some(request.page_size.unwrap_or(10).to_string())),
                    (
                        "pageNumber",
                        Some(request.page_number.unwrap_or(1).to_string()),
                    ),
                    ("invoiceReference", request.invoice_reference.clone()),
                    ("status", request.status.clone()),
                    ("fromDate", request.from_date.clone()),
                    ("toDate", request.to_date.clone()),
                ],
            )
            .await?
            .decode()
    }

    /// Updates a pending invoice.
    pub async fn update_invoice(
        &self,
        request: &UpdateInvoiceRequest,
    ) -> Result<ApiResponse<InvoiceDetails>> {
        self.http
            .put(
                &format!(
                    "/api/v1/merchant/invoices/{}/update",
                    request.invoice_reference
                ),
                encode_body(request)?,
            )
            .await?
            .decode()
    }

    /// Cancels an invoice so it can no longer be paid.
    pub async fn cancel_invoice(
        &self,
        request: &CancelInvoiceRequest,
    ) -> Result<ApiResponse<CancelInvoiceResponse>> {
        self.http
            .put(
                &format!(
                    "/api/v1/merchant/invoices/{}/cancel",
                    request.invoice_reference
                ),
                encode_body(request)?,
            )
            .await?
            .decode()
    }

    /// Fetches the payment status of one invoice.
    pub async fn get_invoice_payment_status(
        &self,
        invoice_reference: &str,
    ) -> Result<ApiResponse<InvoicePaymentStatusResponse>> {
        self.http
            .get(
                &format!("/api/v1/merchant/invoices/{invoice_reference}/payment-status"),
                &[],
            )
            .await?
            .decode()
    }

    /// Lists payments made against one invoice.
    pub async fn get_invoice_transactions(
        &self,
        request: &InvoiceTransactionRequest,
    ) -> Result<ApiResponse<Page<InvoiceTransaction>>> {
        self.http
            .get(
                &format!(
                    "/api/v1/merchant/invoices/{}/transactions",
                    request.invoice_reference
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

    /// Aggregated invoice counts and amounts for an optional date range.
    pub async fn get_invoice_summary(
        &self,
        from_date: Option<&str>,
        to_date: Option<&str>,
    ) -> Result<ApiResponse<InvoiceSummaryResponse>> {
        self.http
            .get(
                "/api/v1/merchant/invoices/summary",
                &[
                    ("fromDate", from_date.map(str::to_owned)),
                    ("toDate", to_date.map(str::to_owned)),
                ],
            )
            .await?
            .decode()
    }

    /// Sends a payment reminder to the invoice customer.
    pub async fn send_invoice_reminder(
        &self,
        request: &SendInvoiceReminderRequest,
    ) -> Result<ApiResponse<SendInvoiceReminderResponse>> {
        self.http
            .post(
                &format!(
                    "/api/v1/merchant/invoices/{}/reminder",
                    request.invoice_reference
                ),
                encode_body(request)?,
            )
            .await?
            .decode()
    }

    /// Re-sends the original invoice notification.
    pub async fn resend_invoice_notification(
        &self,
        invoice_reference: &str,
    ) -> Result<ApiResponse<ResendInvoiceNotificationResponse>> {
        self.http
            .post(
                &format!("/api/v1/merchant/invoices/{invoice_reference}/resend"),
                json!({}),
            )
            .await?
            .decode()
    }

    /// Fetches one invoice by its gateway-assigned number.
    pub async fn get_invoice_by_number(
        &self,
        invoice_number: &str,
    ) -> Result<ApiResponse<InvoiceDetails>> {
        self.http
            .get(
                &format!("/api/v1/merchant/invoices/number/{invoice_number}"),
                &[],
            )
            .await?
            .decode()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub item_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity: u32,
    pub unit_price: f64,
    pub sub_total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_amount: Option<f64>,
    pub total_amount: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub invoice_reference: String,
    pub description: String,
    pub amount: f64,
    pub currency_code: String,
    pub customer_email: String,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_methods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_items: Option<Vec<InvoiceItem>>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetails {
    pub invoice_reference: String,
    pub invoice_number: String,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: f64,
    pub currency_code: String,
    pub contract_code: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone_number: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub payment_methods: Option<Vec<String>>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub invoice_logo: Option<String>,
    #[serde(default)]
    pub invoice_description: Option<String>,
    #[serde(default)]
    pub invoice_title: Option<String>,
    #[serde(default)]
    pub invoice_footer: Option<String>,
    #[serde(default)]
    pub invoice_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub invoice_items: Option<Vec<InvoiceItem>>,
    pub checkout_url: String,
    pub status: String,
    pub created_on: String,
    #[serde(default)]
    pub updated_on: Option<String>,
    #[serde(default)]
    pub paid_on: Option<String>,
    #[serde(default)]
    pub payment_reference: Option<String>,
    #[serde(default)]
    pub transaction_reference: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct InvoiceListRequest {
    pub page_size: Option<u32>,
    pub page_number: Option<u32>,
    pub invoice_reference: Option<String>,
    pub status: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoiceRequest {
    pub invoice_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_methods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_items: Option<Vec<InvoiceItem>>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelInvoiceRequest {
    pub invoice_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelInvoiceResponse {
    pub invoice_reference: String,
    pub status: String,
    pub cancelled_on: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePaymentStatusResponse {
    pub invoice_reference: String,
    pub invoice_number: String,
    pub amount: f64,
    pub currency_code: String,
    pub status: String,
    pub payment_status: String,
    #[serde(default)]
    pub paid_on: Option<String>,
    #[serde(default)]
    pub payment_reference: Option<String>,
    #[serde(default)]
    pub transaction_reference: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    pub customer: Customer,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Clone, Debug, Default)]
pub struct InvoiceTransactionRequest {
    pub invoice_reference: String,
    pub page_size: Option<u32>,
    pub page_number: Option<u32>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTransaction {
    pub transaction_reference: String,
    pub payment_reference: String,
    pub amount_paid: f64,
    pub total_payable: f64,
    pub paid_on: String,
    pub payment_status: String,
    #[serde(default)]
    pub payment_description: Option<String>,
    pub currency: String,
    pub payment_method: String,
    pub customer: Customer,
    #[serde(default, rename = "metaData")]
    pub meta_data: Option<Metadata>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummaryResponse {
    pub total_invoices: u64,
    pub total_amount: f64,
    pub paid_invoices: u64,
    pub paid_amount: f64,
    pub pending_invoices: u64,
    pub pending_amount: f64,
    pub cancelled_invoices: u64,
    pub cancelled_amount: f64,
    pub currency: String,
    pub period: Period,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendInvoiceReminderRequest {
    pub invoice_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendInvoiceReminderResponse {
    pub invoice_reference: String,
    pub reminder_sent: bool,
    pub sent_on: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendInvoiceNotificationResponse {
    pub success: bool,
    pub message: String,
}
