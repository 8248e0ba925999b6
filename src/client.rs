use std::sync::Arc;

use crate::api::{
    CollectionsApi, DisbursementsApi, InvoicesApi, SettlementsApi, SubAccountsApi,
    TransactionsApi, VerificationApi, WalletsApi,
};
use crate::http::HttpClient;
use crate::{Environment, MonnifyConfig, Result};

/// Entry point to the Monnify API.
///
/// One client owns one transport connection pool and one configuration;
/// the endpoint groups exposed as public fields all share them. The client
/// is cheap to clone and safe to use concurrently.
///
/// # Example
///
/// ```no_run
/// use monnify::{MonnifyClient, MonnifyConfig};
///
/// # async fn example() -> monnify::Result<()> {
/// let client = MonnifyClient::new(MonnifyConfig::new(
///     "MK_TEST_SECRET",
///     "MK_TEST_PUBLIC",
///     "100693167467",
/// ));
///
/// let balance = client.wallets.get_wallet_balance("wallet-001").await?;
/// println!("{}", balance.response_message);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MonnifyClient {
    http: Arc<HttpClient>,
    /// Checkout transactions and reserved accounts.
    pub collections: CollectionsApi,
    /// Single and bulk transfers.
    pub disbursements: DisbursementsApi,
    /// Merchant wallets.
    pub wallets: WalletsApi,
    /// BVN, bank account and phone verification.
    pub verification: VerificationApi,
    /// Split-settlement sub-accounts.
    pub sub_accounts: SubAccountsApi,
    /// Hosted invoices.
    pub invoices: InvoicesApi,
    /// Settlement batches and payout configuration.
    pub settlements: SettlementsApi,
    /// Transaction queries, refunds and reporting.
    pub transactions: TransactionsApi,
}

impl MonnifyClient {
    /// Creates a client from an explicit configuration value.
    pub fn new(config: MonnifyConfig) -> Self {
        let http = Arc::new(HttpClient::new(config));
        Self {
            collections: CollectionsApi::new(Arc::clone(&http)),
            disbursements: DisbursementsApi::new(Arc::clone(&http)),
            wallets: WalletsApi::new(Arc::clone(&http)),
            verification: VerificationApi::new(Arc::clone(&http)),
            sub_accounts: SubAccountsApi::new(Arc::clone(&http)),
            invoices: InvoicesApi::new(Arc::clone(&http)),
            settlements: SettlementsApi::new(Arc::clone(&http)),
            transactions: TransactionsApi::new(Arc::clone(&http)),
            http,
        }
    }

    /// Creates a client from `MONNIFY_*` environment variables.
    ///
    /// See [`MonnifyConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(MonnifyConfig::from_env()?))
    }

    /// The configuration this client was constructed with.
    pub fn config(&self) -> &MonnifyConfig {
        self.http.config()
    }

    /// Effective API base URL.
    pub fn base_url(&self) -> &str {
        self.http.config().resolved_base_url()
    }

    /// Whether the client targets the live environment.
    pub fn is_production(&self) -> bool {
        self.http.config().environment == Environment::Production
    }
}

impl std::fmt::Debug for MonnifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonnifyClient")
            .field("config", self.http.config())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::MonnifyClient;
    use crate::{Environment, MonnifyConfig};

    #[test]
    fn client_resolves_environment_base_url() {
        let client = MonnifyClient::new(
            MonnifyConfig::new("sk", "pk", "contract").with_environment(Environment::Production),
        );
        assert_eq!(client.base_url(), "https://api.monnify.com");
        assert!(client.is_production());
    }

    #[test]
    fn debug_does_not_leak_the_secret_key() {
        let client = MonnifyClient::new(MonnifyConfig::new("sk_live_secret", "pk", "contract"));
        let debug = format!("{client:?}");
        assert!(!debug.contains("sk_live_secret"));
    }
}
