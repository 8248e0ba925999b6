use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tokio::time::sleep;

use crate::{MonnifyConfig, MonnifyError, Result};

/// Lower bound on the per-attempt deadline. A zero deadline must still
/// time the call out instead of disabling the timeout.
const MIN_DEADLINE: Duration = Duration::from_millis(1);

/// One fully-formed outbound request.
///
/// Built once per logical call and borrowed unchanged by every attempt of
/// that call, so retries replay the identical method, URL, headers and body.
#[derive(Clone, Debug)]
pub struct RequestSpec {
    pub method: Method,
    /// Absolute URL, query string included.
    pub url: String,
    pub headers: HeaderMap,
    /// JSON body, absent for GET/DELETE.
    pub body: Option<JsonValue>,
    /// Per-attempt deadline.
    pub deadline: Duration,
}

impl RequestSpec {
    fn effective_deadline(&self) -> Duration {
        self.deadline.max(MIN_DEADLINE)
    }
}

/// Bounded exponential-backoff schedule.
///
/// `max_retries` counts retries after the initial attempt, so a policy with
/// `max_retries = 3` performs at most four attempts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    /// Backoff before the first retry.
    pub base_delay: Duration,
    /// Upper bound on any single backoff wait.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Backoff before retry `attempt` (0-based): `base_delay * 2^attempt`,
    /// capped at `max_delay`. The cap applies even when a policy is
    /// constructed with `max_delay < base_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = attempt.min(16);
        let multiplier = 1u64 << exp;
        let delay_ms = (self.base_delay.as_millis() as u64).saturating_mul(multiplier);
        Duration::from_millis(delay_ms).min(self.max_delay)
    }
}

/// Decoded success outcome of one attempt.
#[derive(Clone, Debug)]
pub struct Response {
    pub status: u16,
    pub headers: HeaderMap,
    /// Parsed JSON payload — for Monnify endpoints, the response envelope.
    pub body: JsonValue,
}

impl Response {
    /// Deserializes the payload into a typed shape.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(self.body)
            .map_err(|err| MonnifyError::Decode(format!("response shape mismatch: {err}")))
    }
}

/// Drives repeated attempts of one operation until success, a terminal
/// error, or retry exhaustion.
///
/// The final error is always the most recent attempt's error; earlier
/// failures are discarded. Non-retryable errors (see
/// [`MonnifyError::is_retryable`]) propagate without any further attempt.
pub(crate) async fn run_with_retry<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_retryable() || attempt >= policy.max_retries {
                    return Err(err);
                }
                let delay = policy.delay_for(attempt);

                #[cfg(feature = "tracing")]
                tracing::debug!(
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "retrying request"
                );

                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// Shared request core: owns the transport and executes single attempts
/// beneath the retry loop. One instance serves every endpoint group.
pub(crate) struct HttpClient {
    http: reqwest::Client,
    config: MonnifyConfig,
}

impl HttpClient {
    pub(crate) fn new(config: MonnifyConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub(crate) fn config(&self) -> &MonnifyConfig {
        &self.config
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.config.max_retries,
            base_delay: Duration::from_millis(self.config.retry_delay_ms),
            max_delay: Duration::from_millis(self.config.max_retry_delay_ms),
        }
    }

    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let authorization = format!("Bearer {}", self.config.secret_key);
        let authorization = HeaderValue::from_str(&authorization).map_err(|_| {
            MonnifyError::Config(
                "secret key contains characters not valid in a header value".to_owned(),
            )
        })?;
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Joins the configured base URL with an endpoint path and appends the
    /// query parameters that are present. Absent parameters are omitted
    /// entirely rather than serialized as empty values.
    fn build_url(&self, path: &str, query: &[(&str, Option<String>)]) -> Result<String> {
        let raw = format!("{}{}", self.config.resolved_base_url(), path);
        let mut url =
            Url::parse(&raw).map_err(|err| MonnifyError::Url(format!("{raw}: {err}")))?;
        if query.iter().any(|(_, value)| value.is_some()) {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                if let Some(value) = value {
                    pairs.append_pair(name, value);
                }
            }
        }
        Ok(url.into())
    }

    fn spec(&self, method: Method, url: String, body: Option<JsonValue>) -> Result<RequestSpec> {
        Ok(RequestSpec {
            method,
            url,
            headers: self.default_headers()?,
            body,
            deadline: Duration::from_millis(self.config.timeout_ms),
        })
    }

    /// Inserts the merchant contract code into a JSON object payload,
    /// overwriting any caller-supplied value.
    pub(crate) fn inject_contract_code(&self, body: &mut JsonValue) {
        if let JsonValue::Object(map) = body {
            map.insert(
                "contractCode".to_owned(),
                JsonValue::String(self.config.contract_code.clone()),
            );
        }
    }

    pub(crate) async fn get(&self, path: &str, query: &[(&str, Option<String>)]) -> Result<Response> {
        let url = self.build_url(path, query)?;
        let spec = self.spec(Method::GET, url, None)?;
        self.run(&spec, &self.retry_policy()).await
    }

    pub(crate) async fn post(&self, path: &str, body: JsonValue) -> Result<Response> {
        let url = self.build_url(path, &[])?;
        let spec = self.spec(Method::POST, url, Some(body))?;
        self.run(&spec, &self.retry_policy()).await
    }

    pub(crate) async fn put(&self, path: &str, body: JsonValue) -> Result<Response> {
        let url = self.build_url(path, &[])?;
        let spec = self.spec(Method::PUT, url, Some(body))?;
        self.run(&spec, &self.retry_policy()).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Response> {
        let url = self.build_url(path, &[])?;
        let spec = self.spec(Method::DELETE, url, None)?;
        self.run(&spec, &self.retry_policy()).await
    }

    /// Runs one logical call: the retry loop over [`HttpClient::execute`]
    /// with the same spec replayed on every attempt.
    pub(crate) async fn run(&self, spec: &RequestSpec, policy: &RetryPolicy) -> Result<Response> {
        run_with_retry(policy, || self.execute(spec)).await
    }

    /// Performs exactly one network attempt and classifies its outcome.
    ///
    /// Never retries; retry is the caller's responsibility.
    pub(crate) async fn execute(&self, spec: &RequestSpec) -> Result<Response> {
        let deadline = spec.effective_deadline();
        let mut request = self
            .http
            .request(spec.method.clone(), &spec.url)
            .headers(spec.headers.clone())
            .timeout(deadline);
        if let Some(body) = &spec.body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => return Err(classify_transport(err, deadline)),
        };

        let status = response.status();
        let headers = response.headers().clone();
        // Body read can still hit the deadline or drop the connection.
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => return Err(classify_transport(err, deadline)),
        };

        if !status.is_success() {
            return Err(MonnifyError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let body = serde_json::from_str(&text).map_err(|err| {
            MonnifyError::Decode(format!("invalid response JSON: {err}; body: {text}"))
        })?;

        Ok(Response {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}

fn classify_transport(err: reqwest::Error, deadline: Duration) -> MonnifyError {
    if err.is_timeout() {
        MonnifyError::Timeout {
            deadline_ms: deadline.as_millis() as u64,
        }
    } else {
        MonnifyError::Transport(err)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use serde_json::json;

    use super::{run_with_retry, Response, RetryPolicy};
    use crate::MonnifyError;

    fn policy(max_retries: u32, base_ms: u64, max_ms: u64) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay: Duration::from_millis(base_ms),
            max_delay: Duration::from_millis(max_ms),
        }
    }

    fn http_error(status: u16, body: &str) -> MonnifyError {
        MonnifyError::Http {
            status,
            body: body.to_owned(),
        }
    }

    fn ok_response() -> Response {
        Response {
            status: 200,
            headers: Default::default(),
            body: json!({"ok": true}),
        }
    }

    /// Drives the retry loop with a scripted sequence of outcomes and
    /// counts how often the operation runs.
    async fn run_scripted(
        policy: &RetryPolicy,
        outcomes: Vec<crate::Result<Response>>,
    ) -> (crate::Result<Response>, u32) {
        let calls = Arc::new(AtomicU32::new(0));
        let queue = Arc::new(Mutex::new(VecDeque::from(outcomes)));
        let result = run_with_retry(policy, || {
            let calls = Arc::clone(&calls);
            let queue = Arc::clone(&queue);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                queue
                    .lock()
                    .expect("outcome queue mutex must not be poisoned")
                    .pop_front()
                    .expect("more attempts than scripted outcomes")
            }
        })
        .await;
        (result, calls.load(Ordering::SeqCst))
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = policy(5, 1_000, 10_000);
        assert_eq!(policy.delay_for(0), Duration::from_millis(1_000));
        assert_eq!(policy.delay_for(1), Duration::from_millis(2_000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(4_000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(8_000));
        assert_eq!(policy.delay_for(4), Duration::from_millis(10_000));
        assert_eq!(policy.delay_for(5), Duration::from_millis(10_000));
    }

    #[test]
    fn backoff_caps_even_below_base_delay() {
        let policy = policy(3, 5_000, 1_000);
        assert_eq!(policy.delay_for(0), Duration::from_millis(1_000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(1_000));
    }

    #[test]
    fn backoff_survives_large_attempt_indices() {
        let policy = policy(3, 1_000, 10_000);
        assert_eq!(policy.delay_for(64), Duration::from_millis(10_000));
        assert_eq!(policy.delay_for(u32::MAX), Duration::from_millis(10_000));
    }

    #[tokio::test(start_paused = true)]
    async fn success_on_first_attempt_runs_exactly_once() {
        let started = tokio::time::Instant::now();
        let (result, calls) = run_scripted(&policy(3, 1_000, 10_000), vec![Ok(ok_response())]).await;

        assert_eq!(result.expect("must succeed").status, 200);
        assert_eq!(calls, 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_surfaces_the_last_attempt_error() {
        let (result, calls) = run_scripted(
            &policy(2, 1, 10),
            vec![
                Err(http_error(500, "err-0")),
                Err(http_error(502, "err-1")),
                Err(http_error(503, "err-2")),
            ],
        )
        .await;

        assert_eq!(calls, 3);
        match result.expect_err("must exhaust retries") {
            MonnifyError::Http { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "err-2");
            }
            other => panic!("expected http error, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn recovery_mid_sequence_sleeps_once_per_failure() {
        let started = tokio::time::Instant::now();
        let (result, calls) = run_scripted(
            &policy(5, 100, 1_000),
            vec![
                Err(http_error(500, "boom")),
                Err(http_error(500, "boom")),
                Ok(ok_response()),
            ],
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(calls, 3);
        // Two failures: backoff of 100 ms then 200 ms, nothing more.
        assert_eq!(started.elapsed(), Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn scenario_two_failures_then_success() {
        let started = tokio::time::Instant::now();
        let (result, calls) = run_scripted(
            &policy(2, 100, 1_000),
            vec![
                Err(http_error(500, "outage")),
                Err(http_error(500, "outage")),
                Ok(ok_response()),
            ],
        )
        .await;

        let response = result.expect("third attempt must win");
        assert_eq!(response.status, 200);
        assert_eq!(response.body, json!({"ok": true}));
        assert_eq!(calls, 3);
        assert_eq!(started.elapsed(), Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_retry_policy_fails_immediately() {
        let started = tokio::time::Instant::now();
        let (result, calls) = run_scripted(
            &policy(0, 1_000, 10_000),
            vec![Err(MonnifyError::Timeout { deadline_ms: 30_000 })],
        )
        .await;

        assert!(matches!(
            result,
            Err(MonnifyError::Timeout { deadline_ms: 30_000 })
        ));
        assert_eq!(calls, 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn client_errors_are_not_retried() {
        let (result, calls) = run_scripted(
            &policy(3, 1, 10),
            vec![Err(http_error(400, "bad request")), Ok(ok_response())],
        )
        .await;

        assert!(matches!(
            result,
            Err(MonnifyError::Http { status: 400, .. })
        ));
        assert_eq!(calls, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn every_attempt_observes_the_same_spec() {
        use reqwest::Method;

        let spec = super::RequestSpec {
            method: Method::POST,
            url: "https://sandbox-api.monnify.com/api/v1/merchant/transactions/init-transaction"
                .to_owned(),
            headers: Default::default(),
            body: Some(json!({"amount": 100.0})),
            deadline: Duration::from_millis(30_000),
        };
        let observed: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let attempts = Arc::new(AtomicU32::new(0));

        let result: crate::Result<Response> = run_with_retry(&policy(2, 1, 10), || {
            let observed = Arc::clone(&observed);
            let attempts = Arc::clone(&attempts);
            let spec = &spec;
            async move {
                observed
                    .lock()
                    .expect("observation mutex must not be poisoned")
                    .push(format!("{spec:?}"));
                if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(http_error(500, "boom"))
                } else {
                    Ok(ok_response())
                }
            }
        })
        .await;

        assert!(result.is_ok());
        let observed = observed.lock().expect("observation mutex must not be poisoned");
        assert_eq!(observed.len(), 3);
        assert!(observed.iter().all(|snapshot| snapshot == &observed[0]));
    }
}
