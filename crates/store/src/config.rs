//! Store client configuration loaded from environment variables.

use std::time::Duration;

use crate::error::StoreError;
use crate::rest::{RestAuth, RestStore};

/// Configuration for the hosted store and auth clients.
///
/// All fields have defaults suitable for local development; override
/// via environment variables in production builds.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the hosted backend.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl StoreConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                          | Default                 |
    /// |----------------------------------|-------------------------|
    /// | `NOTELEAF_API_URL`               | `http://localhost:8787` |
    /// | `NOTELEAF_REQUEST_TIMEOUT_SECS`  | `30`                    |
    pub fn from_env() -> Self {
        let api_url = std::env::var("NOTELEAF_API_URL")
            .unwrap_or_else(|_| "http://localhost:8787".into());

        let request_timeout_secs: u64 = std::env::var("NOTELEAF_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("NOTELEAF_REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            api_url,
            request_timeout_secs,
        }
    }

    fn http_client(&self) -> Result<reqwest::Client, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .build()?;
        Ok(client)
    }

    /// Build a [`RestStore`] with a timeout-configured HTTP client.
    pub fn build_store(&self) -> Result<RestStore, StoreError> {
        Ok(RestStore::with_client(
            self.http_client()?,
            self.api_url.clone(),
        ))
    }

    /// Build a [`RestAuth`] with a timeout-configured HTTP client.
    pub fn build_auth(&self) -> Result<RestAuth, StoreError> {
        Ok(RestAuth::with_client(
            self.http_client()?,
            self.api_url.clone(),
        ))
    }
}
