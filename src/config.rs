use std::fmt;

/// Monnify API environment.
///
/// Selects the default base URL; an explicit
/// [`MonnifyConfig::base_url`] override always wins.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Environment {
    /// Sandbox environment for integration testing.
    #[default]
    Sandbox,
    /// Live environment.
    Production,
}

impl Environment {
    /// Default API base URL for this environment.
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => "https://sandbox-api.monnify.com",
            Self::Production => "https://api.monnify.com",
        }
    }
}

/// Configures credentials, environment and HTTP retry behavior.
#[derive(Clone)]
pub struct MonnifyConfig {
    /// Merchant secret key, sent as the bearer authorization value.
    pub secret_key: String,
    /// Merchant public (API) key.
    pub public_key: String,
    /// Merchant contract code, injected into payloads that require it.
    pub contract_code: String,
    /// Explicit base URL override. When unset, the environment decides.
    pub base_url: Option<String>,
    /// Target environment.
    pub environment: Environment,
    /// Per-attempt deadline in milliseconds.
    pub timeout_ms: u64,
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Base retry backoff in milliseconds (exponential strategy).
    pub retry_delay_ms: u64,
    /// Upper bound on a single backoff wait, in milliseconds.
    pub max_retry_delay_ms: u64,
}

impl MonnifyConfig {
    /// Creates a sandbox configuration with default timeout and retry
    /// settings (30 s deadline, 3 retries, 1 s base delay capped at 10 s).
    pub fn new(
        secret_key: impl Into<String>,
        public_key: impl Into<String>,
        contract_code: impl Into<String>,
    ) -> Self {
        Self {
            secret_key: secret_key.into(),
            public_key: public_key.into(),
            contract_code: contract_code.into(),
            base_url: None,
            environment: Environment::Sandbox,
            timeout_ms: 30_000,
            max_retries: 3,
            retry_delay_ms: 1_000,
            max_retry_delay_ms: 10_000,
        }
    }

    /// Creates a configuration from environment variables.
    ///
    /// Reads:
    /// - `MONNIFY_SECRET_KEY` — merchant secret key
    /// - `MONNIFY_PUBLIC_KEY` — merchant public key
    /// - `MONNIFY_CONTRACT_CODE` — merchant contract code
    /// - `MONNIFY_ENVIRONMENT` — optional, `sandbox` (default) or `production`
    /// - `MONNIFY_BASE_URL` — optional explicit base URL override
    ///
    /// Returns an error if any required variable is missing or empty.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use monnify::MonnifyConfig;
    ///
    /// let config = MonnifyConfig::from_env().expect("missing MONNIFY_* env vars");
    /// ```
    pub fn from_env() -> crate::Result<Self> {
        let secret_key = require_env("MONNIFY_SECRET_KEY")?;
        let public_key = require_env("MONNIFY_PUBLIC_KEY")?;
        let contract_code = require_env("MONNIFY_CONTRACT_CODE")?;

        let mut config = Self::new(secret_key, public_key, contract_code);

        if let Ok(environment) = std::env::var("MONNIFY_ENVIRONMENT") {
            config.environment = match environment.trim().to_ascii_lowercase().as_str() {
                "" | "sandbox" => Environment::Sandbox,
                "production" | "live" => Environment::Production,
                other => {
                    return Err(crate::MonnifyError::Config(format!(
                        "unknown MONNIFY_ENVIRONMENT value '{other}'"
                    )))
                }
            };
        }
        if let Ok(base_url) = std::env::var("MONNIFY_BASE_URL") {
            if !base_url.trim().is_empty() {
                config.base_url = Some(base_url);
            }
        }

        Ok(config)
    }

    /// Switches the target environment.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Overrides the API base URL regardless of environment.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Overrides the per-attempt deadline.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Overrides the retry schedule.
    pub fn with_retries(
        mut self,
        max_retries: u32,
        retry_delay_ms: u64,
        max_retry_delay_ms: u64,
    ) -> Self {
        self.max_retries = max_retries;
        self.retry_delay_ms = retry_delay_ms;
        self.max_retry_delay_ms = max_retry_delay_ms;
        self
    }

    /// Effective base URL: the explicit override, or the environment default.
    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }
}

impl fmt::Debug for MonnifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonnifyConfig")
            .field("secret_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .field("contract_code", &self.contract_code)
            .field("base_url", &self.base_url)
            .field("environment", &self.environment)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_retries", &self.max_retries)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("max_retry_delay_ms", &self.max_retry_delay_ms)
            .finish()
    }
}

fn require_env(name: &str) -> crate::Result<String> {
    let value = std::env::var(name)
        .map_err(|_| crate::MonnifyError::Config(format!("missing {name} environment variable")))?;
    if value.trim().is_empty() {
        return Err(crate::MonnifyError::Config(format!(
            "{name} is set but empty"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{Environment, MonnifyConfig};

    fn config() -> MonnifyConfig {
        MonnifyConfig::new("sk_test", "pk_test", "100693167467")
    }

    #[test]
    fn defaults_match_gateway_recommendations() {
        let config = config();
        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay_ms, 1_000);
        assert_eq!(config.max_retry_delay_ms, 10_000);
    }

    #[test]
    fn sandbox_is_default_base_url() {
        assert_eq!(
            config().resolved_base_url(),
            "https://sandbox-api.monnify.com"
        );
    }

    #[test]
    fn production_environment_switches_base_url() {
        let config = config().with_environment(Environment::Production);
        assert_eq!(config.resolved_base_url(), "https://api.monnify.com");
    }

    #[test]
    fn explicit_base_url_wins_over_environment() {
        let config = config()
            .with_environment(Environment::Production)
            .with_base_url("http://127.0.0.1:9090");
        assert_eq!(config.resolved_base_url(), "http://127.0.0.1:9090");
    }

    #[test]
    fn debug_redacts_secret_key() {
        let debug = format!("{:?}", config());
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("sk_test"));
    }
}
