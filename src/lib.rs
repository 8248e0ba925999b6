//! `monnify` is an async Rust client for the Monnify payment gateway.
//!
//! The crate wraps the gateway's REST API with typed endpoint groups:
//! - [`MonnifyClient::collections`] — checkout transactions and reserved accounts
//! - [`MonnifyClient::disbursements`] — single and bulk transfers
//! - [`MonnifyClient::wallets`] — merchant wallets
//! - [`MonnifyClient::verification`] — BVN, bank account and phone checks
//! - [`MonnifyClient::sub_accounts`] — split-settlement sub-accounts
//! - [`MonnifyClient::invoices`] — hosted invoices
//! - [`MonnifyClient::settlements`] — payout batches and configuration
//! - [`MonnifyClient::transactions`] — queries, refunds and reporting
//!
//! Every call runs through one shared request core that applies the
//! per-attempt deadline, bounded exponential-backoff retry and error
//! classification uniformly.

pub mod api;
mod client;
mod config;
mod error;
mod http;
mod types;

pub use client::MonnifyClient;
pub use config::{Environment, MonnifyConfig};
pub use error::MonnifyError;
pub use http::{RequestSpec, Response, RetryPolicy};
pub use types::{ApiResponse, Customer, Metadata, Page, Pagination, Period};

pub type Result<T> = std::result::Result<T, MonnifyError>;
