use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json, Router,
};
use monnify::{
    api::collections::InitializeTransactionRequest,
    api::invoices::InvoiceListRequest,
    MonnifyClient, MonnifyConfig, MonnifyError,
};
use serde_json::{json, Value as JsonValue};

#[derive(Clone)]
struct MockResponse {
    status: StatusCode,
    body: JsonValue,
    delay: Duration,
}

impl MockResponse {
    fn json(status: StatusCode, body: JsonValue) -> Self {
        Self {
            status,
            body,
            delay: Duration::from_millis(0),
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone, Debug)]
struct CapturedRequest {
    method: String,
    path_and_query: String,
    authorization: Option<String>,
    body: Option<JsonValue>,
}

#[derive(Clone)]
struct MockState {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

async fn gateway_handler(State(state): State<MockState>, request: Request) -> impl IntoResponse {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();

    state
        .requests
        .lock()
        .expect("capture mutex must not be poisoned")
        .push(CapturedRequest {
            method: parts.method.to_string(),
            path_and_query: parts
                .uri
                .path_and_query()
                .map(|pq| pq.to_string())
                .unwrap_or_default(),
            authorization: parts
                .headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(ToOwned::to_owned),
            body: if bytes.is_empty() {
                None
            } else {
                serde_json::from_slice(&bytes).ok()
            },
        });

    let response = {
        let mut queue = state
            .responses
            .lock()
            .expect("response queue mutex must not be poisoned");
        queue.pop_front().unwrap_or_else(|| {
            MockResponse::json(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "no mock response available"}),
            )
        })
    };

    if !response.delay.is_zero() {
        tokio::time::sleep(response.delay).await;
    }

    (response.status, Json(response.body))
}

struct TestServer {
    base_url: String,
    state: MockState,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl TestServer {
    fn hits(&self) -> usize {
        self.state
            .requests
            .lock()
            .expect("capture mutex must not be poisoned")
            .len()
    }

    fn requests(&self) -> Vec<CapturedRequest> {
        self.state
            .requests
            .lock()
            .expect("capture mutex must not be poisoned")
            .clone()
    }
}

async fn spawn_server(responses: Vec<MockResponse>) -> TestServer {
    let state = MockState {
        responses: Arc::new(Mutex::new(responses.into())),
        requests: Arc::new(Mutex::new(Vec::new())),
    };

    let app = Router::new().fallback(gateway_handler).with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("must bind test listener");
    let address = listener.local_addr().expect("must have local addr");
    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("mock server must run");
    });

    TestServer {
        base_url: format!("http://{address}"),
        state,
        task,
    }
}

fn client_for(server: &TestServer) -> MonnifyClient {
    MonnifyClient::new(
        MonnifyConfig::new("sk_test_secret", "pk_test_public", "100693167467")
            .with_base_url(server.base_url.clone())
            .with_timeout_ms(1_000)
            .with_retries(0, 1, 10),
    )
}

fn envelope(body: JsonValue) -> JsonValue {
    json!({
        "requestSuccessful": true,
        "responseMessage": "success",
        "responseCode": "0",
        "responseBody": body
    })
}

fn init_transaction_body() -> JsonValue {
    envelope(json!({
        "transactionReference": "MNFY|20230815|000001",
        "paymentReference": "pay-001",
        "merchantName": "Acme Stores",
        "apiKey": "MK_TEST_KEY",
        "enabledPaymentMethod": ["CARD", "ACCOUNT_TRANSFER"],
        "checkoutUrl": "https://sandbox.sdk.monnify.com/checkout/MNFY|20230815|000001",
        "amount": 2500.0
    }))
}

fn init_transaction_request() -> InitializeTransactionRequest {
    InitializeTransactionRequest {
        amount: 2500.0,
        customer_name: "Kit Adeyemi".to_owned(),
        customer_email: "kit@example.com".to_owned(),
        payment_reference: "pay-001".to_owned(),
        payment_description: "Order 001".to_owned(),
        currency_code: Some("NGN".to_owned()),
        redirect_url: None,
        payment_methods: None,
        metadata: None,
    }
}

fn wallet_balance_body() -> JsonValue {
    envelope(json!({
        "walletReference": "wallet-001",
        "balance": 1250.5,
        "currencyCode": "NGN"
    }))
}

#[tokio::test]
async fn initialize_transaction_decodes_envelope_and_injects_contract_code() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::OK,
        init_transaction_body(),
    )])
    .await;
    let client = client_for(&server);

    let response = client
        .collections
        .initialize_transaction(&init_transaction_request())
        .await
        .expect("initialize must succeed");

    assert!(response.request_successful);
    assert_eq!(response.response_code, "0");
    let body = response.response_body.expect("payload must be present");
    assert_eq!(body.transaction_reference, "MNFY|20230815|000001");
    assert_eq!(
        body.checkout_url,
        "https://sandbox.sdk.monnify.com/checkout/MNFY|20230815|000001"
    );

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(
        requests[0].path_and_query,
        "/api/v1/merchant/transactions/init-transaction"
    );
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some("Bearer sk_test_secret")
    );
    let sent = requests[0].body.as_ref().expect("body must be captured");
    assert_eq!(sent["contractCode"], "100693167467");
    assert_eq!(sent["customerEmail"], "kit@example.com");
}

#[tokio::test]
async fn retries_on_server_error_and_replays_the_identical_request() {
    let server = spawn_server(vec![
        MockResponse::json(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "boom"})),
        MockResponse::json(StatusCode::OK, init_transaction_body()),
    ])
    .await;
    let client = MonnifyClient::new(
        MonnifyConfig::new("sk_test_secret", "pk_test_public", "100693167467")
            .with_base_url(server.base_url.clone())
            .with_timeout_ms(1_000)
            .with_retries(1, 1, 10),
    );

    let response = client
        .collections
        .initialize_transaction(&init_transaction_request())
        .await
        .expect("second attempt must succeed");

    assert!(response.request_successful);
    assert_eq!(server.hits(), 2);

    let requests = server.requests();
    assert_eq!(requests[0].method, requests[1].method);
    assert_eq!(requests[0].path_and_query, requests[1].path_and_query);
    assert_eq!(requests[0].authorization, requests[1].authorization);
    assert_eq!(requests[0].body, requests[1].body);
}

#[tokio::test]
async fn client_errors_fail_fast_without_retry() {
    let server = spawn_server(vec![
        MockResponse::json(
            StatusCode::BAD_REQUEST,
            json!({
                "requestSuccessful": false,
                "responseMessage": "Invalid payment reference",
                "responseCode": "99",
                "responseBody": null
            }),
        ),
        MockResponse::json(StatusCode::OK, init_transaction_body()),
    ])
    .await;
    let client = MonnifyClient::new(
        MonnifyConfig::new("sk_test_secret", "pk_test_public", "100693167467")
            .with_base_url(server.base_url.clone())
            .with_timeout_ms(1_000)
            .with_retries(3, 1, 10),
    );

    let err = client
        .collections
        .initialize_transaction(&init_transaction_request())
        .await
        .expect_err("400 must fail");

    match err {
        MonnifyError::Http { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("Invalid payment reference"));
        }
        other => panic!("expected http error, got {other:?}"),
    }
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn exhaustion_surfaces_the_final_status() {
    let server = spawn_server(vec![
        MockResponse::json(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "a"})),
        MockResponse::json(StatusCode::BAD_GATEWAY, json!({"error": "b"})),
        MockResponse::json(StatusCode::SERVICE_UNAVAILABLE, json!({"error": "c"})),
    ])
    .await;
    let client = MonnifyClient::new(
        MonnifyConfig::new("sk_test_secret", "pk_test_public", "100693167467")
            .with_base_url(server.base_url.clone())
            .with_timeout_ms(1_000)
            .with_retries(2, 1, 10),
    );

    let err = client
        .wallets
        .get_wallet_balance("wallet-001")
        .await
        .expect_err("all attempts must fail");

    match err {
        MonnifyError::Http { status, .. } => assert_eq!(status, 503),
        other => panic!("expected http error, got {other:?}"),
    }
    assert_eq!(server.hits(), 3);
}

#[tokio::test]
async fn slow_responses_are_classified_as_timeouts() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::OK,
        wallet_balance_body(),
    )
    .with_delay(Duration::from_millis(200))])
    .await;
    let client = MonnifyClient::new(
        MonnifyConfig::new("sk_test_secret", "pk_test_public", "100693167467")
            .with_base_url(server.base_url.clone())
            .with_timeout_ms(20)
            .with_retries(0, 1, 10),
    );

    let err = client
        .wallets
        .get_wallet_balance("wallet-001")
        .await
        .expect_err("request must time out");

    match err {
        MonnifyError::Timeout { deadline_ms } => assert_eq!(deadline_ms, 20),
        other => panic!("expected timeout error, got {other:?}"),
    }
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn unreachable_gateway_is_a_transport_error() {
    // Bind and immediately drop a listener so the port is closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("must bind probe listener");
    let address = listener.local_addr().expect("must have local addr");
    drop(listener);

    let client = MonnifyClient::new(
        MonnifyConfig::new("sk_test_secret", "pk_test_public", "100693167467")
            .with_base_url(format!("http://{address}"))
            .with_timeout_ms(1_000)
            .with_retries(0, 1, 10),
    );

    let err = client
        .wallets
        .get_wallet_balance("wallet-001")
        .await
        .expect_err("connection must be refused");

    match &err {
        MonnifyError::Transport(_) => assert!(err.is_retryable()),
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn list_queries_include_defaults_and_skip_absent_filters() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::OK,
        envelope(json!({
            "content": [],
            "pageSize": 10,
            "pageNumber": 1,
            "totalElements": 0,
            "totalPages": 0,
            "first": true,
            "last": true
        })),
    )])
    .await;
    let client = client_for(&server);

    let response = client
        .invoices
        .get_invoices(&InvoiceListRequest::default())
        .await
        .expect("listing must succeed");
    assert!(response.request_successful);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let path = &requests[0].path_and_query;
    assert!(path.starts_with("/api/v1/merchant/invoices?"));
    assert!(path.contains("pageSize=10"));
    assert!(path.contains("pageNumber=1"));
    assert!(!path.contains("status="));
    assert!(!path.contains("fromDate="));
}

#[tokio::test]
async fn path_parameters_are_substituted() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::OK,
        envelope(json!({
            "subAccountCode": "SUB_123",
            "availableBalance": 900.0,
            "ledgerBalance": 1000.0,
            "currency": "NGN"
        })),
    )])
    .await;
    let client = client_for(&server);

    let response = client
        .sub_accounts
        .get_sub_account_balance("SUB_123")
        .await
        .expect("balance lookup must succeed");
    let body = response.response_body.expect("payload must be present");
    assert_eq!(body.available_balance, 900.0);

    let requests = server.requests();
    assert_eq!(
        requests[0].path_and_query,
        "/api/v1/subaccounts/SUB_123/balance"
    );
    assert_eq!(requests[0].method, "GET");
}

#[tokio::test]
async fn gateway_decline_with_ok_status_passes_through_the_envelope() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::OK,
        json!({
            "requestSuccessful": false,
            "responseMessage": "Insufficient wallet balance",
            "responseCode": "D01",
            "responseBody": null
        }),
    )])
    .await;
    let client = client_for(&server);

    let response = client
        .wallets
        .get_wallet_balance("wallet-001")
        .await
        .expect("2xx decline is not a transport failure");

    assert!(!response.request_successful);
    assert_eq!(response.response_code, "D01");
    assert!(response.response_body.is_none());
    let err = response.into_body().expect_err("decline has no body");
    assert!(err.to_string().contains("Insufficient wallet balance"));
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::OK,
        json!({"unexpected": "shape"}),
    )])
    .await;
    let client = client_for(&server);

    let err = client
        .wallets
        .get_wallet_balance("wallet-001")
        .await
        .expect_err("envelope shape mismatch must fail");

    match err {
        MonnifyError::Decode(message) => assert!(message.contains("shape mismatch")),
        other => panic!("expected decode error, got {other:?}"),
    }
    assert_eq!(server.hits(), 1);
}
