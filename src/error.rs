/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum MonnifyError {
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// The attempt did not complete within its configured deadline.
    #[error("request timed out after {deadline_ms} ms")]
    Timeout {
        /// Per-attempt deadline that elapsed, in milliseconds.
        deadline_ms: u64,
    },
    /// Non-success HTTP status code with raw response body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// Response decoding or envelope-shape validation error.
    #[error("decode error: {0}")]
    Decode(String),
    /// A request URL could not be assembled from the configured base URL.
    #[error("invalid request URL: {0}")]
    Url(String),
    /// Missing or empty construction-time configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl MonnifyError {
    /// Whether a retry can plausibly change the outcome.
    ///
    /// Transport failures and timeouts are transient. HTTP statuses retry
    /// only on 429 and 5xx; other 4xx responses describe a request the
    /// gateway has already rejected and will reject again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout { .. } => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            Self::Decode(_) | Self::Url(_) | Self::Config(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MonnifyError;

    #[test]
    fn server_errors_and_throttling_are_retryable() {
        for status in [429, 500, 502, 503, 504] {
            let err = MonnifyError::Http {
                status,
                body: String::new(),
            };
            assert!(err.is_retryable(), "status {status} must be retryable");
        }
    }

    #[test]
    fn client_errors_are_terminal() {
        for status in [400, 401, 403, 404, 409, 422] {
            let err = MonnifyError::Http {
                status,
                body: String::new(),
            };
            assert!(!err.is_retryable(), "status {status} must not be retried");
        }
    }

    #[test]
    fn timeouts_are_retryable() {
        let err = MonnifyError::Timeout { deadline_ms: 30_000 };
        assert!(err.is_retryable());
    }

    #[test]
    fn timeout_message_includes_deadline() {
        let err = MonnifyError::Timeout { deadline_ms: 250 };
        assert!(err.to_string().contains("250 ms"));
    }

    #[test]
    fn decode_and_config_errors_are_terminal() {
        assert!(!MonnifyError::Decode("bad json".to_owned()).is_retryable());
        assert!(!MonnifyError::Config("missing key".to_owned()).is_retryable());
        assert!(!MonnifyError::Url("not a url".to_owned()).is_retryable());
    }
}
