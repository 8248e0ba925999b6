//! Transactions: querying, refunds, verification and reporting.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::encode_body;
use crate::http::HttpClient;
use crate::types::{ApiResponse, Metadata, Period};
use crate::Result;

/// Transactions endpoint group.
#[derive(Clone)]
pub struct TransactionsApi {
    http: Arc<HttpClient>,
}

impl TransactionsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Looks up the full details of one transaction.
    pub async fn get_transaction_status(
        &self,
        transaction_reference: &str,
    ) -> Result<ApiResponse<TransactionDetails>> {
        self.http
            .post(
                "/api/v1/merchant/transactions/query",
                json!({ "transactionReference": transaction_reference }),
            )
            .await?
            .decode()
    }

    /// Lists transactions with optional filters.
    pub async fn get_all_transactions(
        &self,
        request: &TransactionListRequest,
    ) -> Result<ApiResponse<TransactionPage<TransactionDetails>>> {
        self.http
            .get("/api/v1/merchant/transactions/list", &list_query(request))
            .await?
            .decode()
    }

    /// Lists transaction log entries with optional filters.
    pub async fn get_transaction_logs(
        &self,
        request: &TransactionLogRequest,
    ) -> Result<ApiResponse<TransactionPage<TransactionLogEntry>>> {
        self.http
            .get(
                "/api/v1/merchant/transactions/transaction-log",
                &[
                    ("pageSize", request.page_size.map(|v| v.to_string())),
                    ("pageNumber", request.page_number.map(|v| v.to_string())),
                    ("fromDate", request.from_date.clone()),
                    ("toDate", request.to_date.clone()),
                    (
                        "transactionReference",
                        request.transaction_reference.clone(),
                    ),
                    ("status", request.status.map(|s| s.as_str().to_owned())),
                ],
            )
            .await?
            .decode()
    }

    /// Refunds a transaction in full.
    pub async fn refund_transaction(
        &self,
        request: &RefundTransactionRequest,
    ) -> Result<ApiResponse<RefundResponse>> {
        self.http
            .post(
                "/api/v1/merchant/transactions/refund",
                encode_body(request)?,
            )
            .await?
            .decode()
    }

    /// Refunds part of a transaction's amount.
    pub async fn partial_refund_transaction(
        &self,
        request: &PartialRefundRequest,
    ) -> Result<ApiResponse<RefundResponse>> {
        self.http
            .post(
                "/api/v1/merchant/transactions/partial-refund",
                encode_body(request)?,
            )
            .await?
            .decode()
    }

    /// Verifies a transaction, optionally checking the paid amount.
    pub async fn verify_transaction(
        &self,
        request: &TransactionVerificationRequest,
    ) -> Result<ApiResponse<TransactionDetails>> {
        self.http
            .post(
                "/api/v1/merchant/transactions/verify",
                encode_body(request)?,
            )
            .await?
            .decode()
    }

    /// Aggregated transaction counts and amounts for an optional date range.
    pub async fn get_transaction_summary(
        &self,
        from_date: Option<&str>,
        to_date: Option<&str>,
    ) -> Result<ApiResponse<TransactionSummary>> {
        self.http
            .get(
                "/api/v1/merchant/transactions/summary",
                &[
                    ("fromDate", from_date.map(str::to_owned)),
                    ("toDate", to_date.map(str::to_owned)),
                ],
            )
            .await?
            .decode()
    }

    /// Volume, success-rate and breakdown analytics for an optional range.
    pub async fn get_transaction_analytics(
        &self,
        from_date: Option<&str>,
        to_date: Option<&str>,
    ) -> Result<ApiResponse<TransactionAnalytics>> {
        self.http
            .get(
                "/api/v1/merchant/transactions/analytics",
                &[
                    ("fromDate", from_date.map(str::to_owned)),
                    ("toDate", to_date.map(str::to_owned)),
                ],
            )
            .await?
            .decode()
    }

    /// Lists transactions in one status, paged.
    pub async fn get_transactions_by_status(
        &self,
        status: TransactionStatus,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<TransactionPage<TransactionDetails>>> {
        self.get_all_transactions(&TransactionListRequest {
            status: Some(status),
            page_size: Some(page_size),
            page_number: Some(page_number),
            ..Default::default()
        })
        .await
    }

    /// Lists transactions paid with one payment method, paged.
    pub async fn get_transactions_by_payment_method(
        &self,
        payment_method: TransactionPaymentMethod,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<TransactionPage<TransactionDetails>>> {
        self.get_all_transactions(&TransactionListRequest {
            payment_method: Some(payment_method),
            page_size: Some(page_size),
            page_number: Some(page_number),
            ..Default::default()
        })
        .await
    }

    /// Lists transactions created inside a date range, paged.
    pub async fn get_transactions_by_date_range(
        &self,
        from_date: &str,
        to_date: &str,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<TransactionPage<TransactionDetails>>> {
        self.get_all_transactions(&TransactionListRequest {
            from_date: Some(from_date.to_owned()),
            to_date: Some(to_date.to_owned()),
            page_size: Some(page_size),
            page_number: Some(page_number),
            ..Default::default()
        })
        .await
    }

    /// Lists transactions belonging to one customer email, paged.
    pub async fn get_transactions_by_customer_email(
        &self,
        customer_email: &str,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<TransactionPage<TransactionDetails>>> {
        self.get_all_transactions(&TransactionListRequest {
            customer_email: Some(customer_email.to_owned()),
            page_size: Some(page_size),
            page_number: Some(page_number),
            ..Default::default()
        })
        .await
    }

    /// Lists transactions of one exact amount, paged.
    pub async fn get_transactions_by_amount(
        &self,
        amount: f64,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<TransactionPage<TransactionDetails>>> {
        self.get_all_transactions(&TransactionListRequest {
            amount: Some(amount),
            page_size: Some(page_size),
            page_number: Some(page_number),
            ..Default::default()
        })
        .await
    }

    /// Shorthand for [`Self::get_transactions_by_status`] with `PAID`.
    pub async fn get_successful_transactions(
        &self,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<TransactionPage<TransactionDetails>>> {
        self.get_transactions_by_status(TransactionStatus::Paid, page_size, page_number)
            .await
    }

    /// Shorthand for [`Self::get_transactions_by_status`] with `FAILED`.
    pub async fn get_failed_transactions(
        &self,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<TransactionPage<TransactionDetails>>> {
        self.get_transactions_by_status(TransactionStatus::Failed, page_size, page_number)
            .await
    }

    /// Shorthand for [`Self::get_transactions_by_status`] with `PENDING`.
    pub async fn get_pending_transactions(
        &self,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<TransactionPage<TransactionDetails>>> {
        self.get_transactions_by_status(TransactionStatus::Pending, page_size, page_number)
            .await
    }

    /// Shorthand for [`Self::get_transactions_by_status`] with `CANCELLED`.
    pub async fn get_cancelled_transactions(
        &self,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<TransactionPage<TransactionDetails>>> {
        self.get_transactions_by_status(TransactionStatus::Cancelled, page_size, page_number)
            .await
    }

    /// Shorthand for [`Self::get_transactions_by_status`] with `OVERPAID`.
    pub async fn get_overpaid_transactions(
        &self,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<TransactionPage<TransactionDetails>>> {
        self.get_transactions_by_status(TransactionStatus::Overpaid, page_size, page_number)
            .await
    }

    /// Shorthand for [`Self::get_transactions_by_status`] with `PARTIALLY_PAID`.
    pub async fn get_partially_paid_transactions(
        &self,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<TransactionPage<TransactionDetails>>> {
        self.get_transactions_by_status(TransactionStatus::PartiallyPaid, page_size, page_number)
            .await
    }

    /// Shorthand for [`Self::get_transactions_by_status`] with `REVERSED`.
    pub async fn get_reversed_transactions(
        &self,
        page_size: u32,
        page_number: u32,
    ) -> Result<ApiResponse<TransactionPage<TransactionDetails>>> {
        self.get_transactions_by_status(TransactionStatus::Reversed, page_size, page_number)
            .await
    }
}

fn list_query(request: &TransactionListRequest) -> Vec<(&'static str, Option<String>)> {
    vec![
        ("pageSize", request.page_size.map(|v| v.to_string())),
        ("pageNumber", request.page_number.map(|v| v.to_string())),
        ("fromDate", request.from_date.clone()),
        ("toDate", request.to_date.clone()),
        ("status", request.status.map(|s| s.as_str().to_owned())),
        (
            "paymentMethod",
            request.payment_method.map(|m| m.as_str().to_owned()),
        ),
        ("customerEmail", request.customer_email.clone()),
        ("customerName", request.customer_name.clone()),
        ("amount", request.amount.map(|v| v.to_string())),
        ("currency", request.currency.clone()),
    ]
}

/// Lifecycle states of a collection transaction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Paid,
    Overpaid,
    PartiallyPaid,
    Cancelled,
    Failed,
    Reversed,
}

impl TransactionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Overpaid => "OVERPAID",
            Self::PartiallyPaid => "PARTIALLY_PAID",
            Self::Cancelled => "CANCELLED",
            Self::Failed => "FAILED",
            Self::Reversed => "REVERSED",
        }
    }
}

/// Payment channels accepted by the gateway.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionPaymentMethod {
    Card,
    AccountTransfer,
    Ussd,
    QrCode,
    BankTransfer,
}

impl TransactionPaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Card => "CARD",
            Self::AccountTransfer => "ACCOUNT_TRANSFER",
            Self::Ussd => "USSD",
            Self::QrCode => "QR_CODE",
            Self::BankTransfer => "BANK_TRANSFER",
        }
    }
}

/// Upstream processors a transaction may route through.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentProvider {
    Flutterwave,
    Paystack,
    Monnify,
    Interswitch,
}

#[derive(Clone, Debug, Default)]
pub struct TransactionListRequest {
    pub page_size: Option<u32>,
    pub page_number: Option<u32>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub status: Option<TransactionStatus>,
    pub payment_method: Option<TransactionPaymentMethod>,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct TransactionLogRequest {
    pub page_size: Option<u32>,
    pub page_number: Option<u32>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub transaction_reference: Option<String>,
    pub status: Option<TransactionStatus>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundTransactionRequest {
    pub transaction_reference: String,
    pub refund_amount: f64,
    pub refund_reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_note: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialRefundRequest {
    pub transaction_reference: String,
    pub refund_amount: f64,
    pub refund_reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_note: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionVerificationRequest {
    pub transaction_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// Customer block as returned on transaction details.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCustomer {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Product a payment was made against.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionProduct {
    #[serde(rename = "type")]
    pub product_type: String,
    pub reference: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub card_type: String,
    pub last4: String,
    pub exp_month: String,
    pub exp_year: String,
    #[serde(default)]
    pub country_code: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetails {
    pub account_number: String,
    pub account_name: String,
    pub bank_code: String,
    #[serde(default)]
    pub bank_name: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    pub transaction_reference: String,
    pub payment_reference: String,
    /// Monetary strings as reported by the gateway, kobo-precision.
    pub amount_paid: String,
    pub total_payable: String,
    #[serde(default)]
    pub settlement_amount: Option<String>,
    #[serde(default)]
    pub paid_on: Option<String>,
    pub payment_status: TransactionStatus,
    #[serde(default)]
    pub payment_description: Option<String>,
    pub currency: String,
    #[serde(default)]
    pub payment_method: Option<TransactionPaymentMethod>,
    pub customer: TransactionCustomer,
    #[serde(default, rename = "metaData")]
    pub meta_data: Option<Metadata>,
    #[serde(default)]
    pub payment_provider: Option<PaymentProvider>,
    #[serde(default)]
    pub product: Option<TransactionProduct>,
    #[serde(default)]
    pub card_details: Option<CardDetails>,
    #[serde(default)]
    pub account_details: Option<AccountDetails>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub fee: Option<f64>,
    #[serde(default)]
    pub fee_bearer: Option<bool>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub completed_on: Option<String>,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub updated_on: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLogEntry {
    pub id: String,
    pub transaction_reference: String,
    pub amount: f64,
    #[serde(default)]
    pub payment_method: Option<TransactionPaymentMethod>,
    #[serde(default)]
    pub payment_provider: Option<PaymentProvider>,
    pub status: TransactionStatus,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub created_on: String,
    #[serde(default)]
    pub updated_on: Option<String>,
    #[serde(default)]
    pub completed_on: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub currency: String,
    #[serde(default)]
    pub fee: Option<f64>,
    #[serde(default)]
    pub fee_bearer: Option<bool>,
    #[serde(default, rename = "metaData")]
    pub meta_data: Option<Metadata>,
}

/// Sort flags inside the gateway's pageable listing shape.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSort {
    pub sorted: bool,
    pub unsorted: bool,
    pub empty: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pageable {
    pub sort: PageSort,
    pub page_number: u32,
    pub page_size: u32,
    pub offset: u64,
    pub paged: bool,
    pub unpaged: bool,
}

/// Pageable listing shape used by the transaction list and log endpoints.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage<T> {
    pub content: Vec<T>,
    pub pageable: Pageable,
    pub total_elements: u64,
    pub total_pages: u32,
    pub last: bool,
    pub first: bool,
    pub number_of_elements: u32,
    pub size: u32,
    pub number: u32,
    pub empty: bool,
}

/// Refund lifecycle states.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundResponse {
    pub transaction_reference: String,
    #[serde(default)]
    pub payment_reference: Option<String>,
    pub amount: f64,
    pub refund_amount: f64,
    #[serde(default)]
    pub total_refunded: Option<f64>,
    pub refund_reference: String,
    pub refund_status: RefundStatus,
    #[serde(default)]
    pub refund_reason: Option<String>,
    #[serde(default)]
    pub customer_note: Option<String>,
    #[serde(default)]
    pub refunded_on: Option<String>,
    pub created_on: String,
    #[serde(default)]
    pub updated_on: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub total_transactions: u64,
    pub total_amount: f64,
    pub total_fees: f64,
    pub total_refunds: f64,
    pub successful_transactions: u64,
    pub failed_transactions: u64,
    pub pending_transactions: u64,
    pub cancelled_transactions: u64,
    pub currency: String,
    pub period: Period,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodShare {
    pub method: TransactionPaymentMethod,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProviderShare {
    pub provider: PaymentProvider,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyVolume {
    pub date: String,
    pub count: u64,
    pub volume: f64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionAnalytics {
    pub total_volume: f64,
    pub total_count: u64,
    pub average_transaction_value: f64,
    pub success_rate: f64,
    pub failure_rate: f64,
    pub refund_rate: f64,
    pub top_payment_methods: Vec<PaymentMethodShare>,
    pub top_payment_providers: Vec<PaymentProviderShare>,
    pub daily_breakdown: Vec<DailyVolume>,
    pub currency: String,
    pub period: Period,
}

#[cfg(test)]
mod tests {
    use super::{TransactionPaymentMethod, TransactionStatus};

    #[test]
    fn status_wire_names_match_serde_rename() {
        for status in [
            TransactionStatus::Pending,
            TransactionStatus::Paid,
            TransactionStatus::Overpaid,
            TransactionStatus::PartiallyPaid,
            TransactionStatus::Cancelled,
            TransactionStatus::Failed,
            TransactionStatus::Reversed,
        ] {
            let wire = serde_json::to_value(status).expect("status must serialize");
            assert_eq!(wire, status.as_str());
        }
    }

    #[test]
    fn payment_method_wire_names_match_serde_rename() {
        for method in [
            TransactionPaymentMethod::Card,
            TransactionPaymentMethod::AccountTransfer,
            TransactionPaymentMethod::Ussd,
            TransactionPaymentMethod::QrCode,
            TransactionPaymentMethod::BankTransfer,
        ] {
            let wire = serde_json::to_value(method).expect("method must serialize");
            assert_eq!(wire, method.as_str());
        }
    }
}
