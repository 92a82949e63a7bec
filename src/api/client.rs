//! HTTP client for the product endpoint.

use crate::config::Config;
use crate::error::LoadError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;
use wreq::Client;

/// Source of product response bodies - enables mocking for tests.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetches the raw body of a successful response.
    ///
    /// A status outside 2xx is reported as [`LoadError::Status`] without
    /// reading the body.
    async fn fetch(&self) -> Result<String, LoadError>;

    /// Returns the endpoint this source reads from.
    fn endpoint(&self) -> &str;
}

/// Plain HTTP client issuing a single unauthenticated GET.
pub struct ProductClient {
    client: Client,
    endpoint: String,
}

impl ProductClient {
    /// Creates a new client for the configured endpoint.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder().redirect(wreq::redirect::Policy::limited(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self { client, endpoint: config.endpoint.clone() })
    }
}

#[async_trait]
impl ProductSource for ProductClient {
    async fn fetch(&self) -> Result<String, LoadError> {
        debug!("GET {}", self.endpoint);

        let response = self.client.get(self.endpoint.as_str()).send().await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
