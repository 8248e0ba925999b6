use serde::{Deserialize, Serialize};

/// Arbitrary merchant-supplied metadata attached to gateway objects.
pub type Metadata = serde_json::Value;

/// The gateway's standard response envelope.
///
/// Every endpoint wraps its payload in this shape; `response_body` is
/// absent on declined requests.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub request_successful: bool,
    pub response_message: String,
    pub response_code: String,
    pub response_body: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Extracts the payload, or the gateway's decline message when
    /// `request_successful` is false or the body is missing.
    pub fn into_body(self) -> crate::Result<T> {
        if !self.request_successful {
            return Err(crate::MonnifyError::Decode(format!(
                "gateway declined request: {} ({})",
                self.response_message, self.response_code
            )));
        }
        self.response_body.ok_or_else(|| {
            crate::MonnifyError::Decode(format!(
                "successful response without a body ({})",
                self.response_code
            ))
        })
    }
}

/// Customer identity attached to payments and invoices.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bvn: Option<String>,
}

/// Paged listing shape shared by invoices, settlements and sub-accounts.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_size: u32,
    pub page_number: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub first: bool,
    pub last: bool,
}

/// Reporting window echoed by summary endpoints.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub from_date: String,
    pub to_date: String,
}

/// Pagination block used by wallet statements.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_size: u32,
    pub page_number: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::ApiResponse;

    #[test]
    fn envelope_decodes_gateway_wire_names() {
        let envelope: ApiResponse<serde_json::Value> = serde_json::from_value(json!({
            "requestSuccessful": true,
            "responseMessage": "success",
            "responseCode": "0",
            "responseBody": {"checkoutUrl": "https://sandbox.sdk.monnify.com/checkout/abc"}
        }))
        .expect("envelope must decode");

        assert!(envelope.request_successful);
        assert_eq!(envelope.response_code, "0");
        let body = envelope.into_body().expect("body must be present");
        assert_eq!(
            body["checkoutUrl"],
            "https://sandbox.sdk.monnify.com/checkout/abc"
        );
    }

    #[test]
    fn envelope_tolerates_null_body_on_decline() {
        let envelope: ApiResponse<serde_json::Value> = serde_json::from_value(json!({
            "requestSuccessful": false,
            "responseMessage": "Invalid contract code",
            "responseCode": "99",
            "responseBody": null
        }))
        .expect("decline envelope must decode");

        assert!(!envelope.request_successful);
        let err = envelope.into_body().expect_err("decline has no body");
        assert!(err.to_string().contains("Invalid contract code"));
    }
}
