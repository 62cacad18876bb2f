use crate::utils::error::{ExportError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upstream operations have no cancellation path, so cap them here.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct ExtractRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    #[serde(rename = "extractedData")]
    extracted_data: String,
}

#[derive(Debug, Deserialize)]
struct ExtractErrorResponse {
    error: Option<String>,
}

/// Client for the extraction service: submits a URL, gets back the raw
/// annotated text blob. The service itself is a black box.
pub struct ExtractClient {
    client: Client,
    endpoint: String,
}

impl ExtractClient {
    pub fn new<S: Into<String>>(base_url: S) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base = base_url.into();
        Ok(Self {
            endpoint: format!("{}/api/upload", base.trim_end_matches('/')),
            client,
        })
    }

    pub async fn extract(&self, url: &str) -> Result<String> {
        tracing::debug!(endpoint = %self.endpoint, url, "submitting URL for extraction");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ExtractRequest { url })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // The error payload is optional; fall back to a generic message.
            let message = response
                .json::<ExtractErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("extraction service returned HTTP {}", status));
            return Err(ExportError::extraction(message));
        }

        let body: ExtractResponse = response.json().await?;
        Ok(body.extracted_data)
    }
}
