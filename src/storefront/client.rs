use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use super::types::Endpoint;
use super::Storefront;
use crate::config::ClientConfig;
use crate::models::{ApiResponse, FormData};

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone)]
pub struct HttpStorefront {
    http: Client,
    base_url: String,
}

impl HttpStorefront {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a client honouring the configured request timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, StorefrontError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new(builder.build()?, config.base_url.as_str()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Storefront for HttpStorefront {
    async fn post_form(
        &self,
        endpoint: Endpoint,
        form: &FormData,
    ) -> Result<ApiResponse, StorefrontError> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        tracing::debug!(url = %url, fields = form.len(), "POST storefront form");

        let resp = self
            .http
            .post(&url)
            .form(form.fields())
            .send()
            .await?
            .error_for_status()?;

        let body = resp.text().await?;
        serde_json::from_str::<ApiResponse>(&body).map_err(|e| {
            StorefrontError::Decode(format!("{endpoint} returned non-JSON body: {e}"))
        })
    }
}
