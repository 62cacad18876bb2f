use crate::domain::model::AppendResult;
use crate::domain::ports::{AuthProvider, ExportConfig, TabularBackend};
use crate::utils::error::{ExportError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct ColumnValues {
    values: Option<Vec<Vec<serde_json::Value>>>,
}

/// Remote backend over the spreadsheet service's values API.
///
/// Every call fetches a bearer token from the injected [`AuthProvider`], so
/// the backend works identically regardless of which sign-in flow produced
/// the token.
///
/// Known limitation: `row_count` followed by `append_values` is not
/// transactional. Two concurrent writers can read the same row count and
/// overwrite each other, and a failure after `write_header` leaves a sheet
/// with a header and no data row. Callers get a terminal error either way;
/// nothing is retried.
pub struct SheetsBackend {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    sheet_name: String,
    auth: Arc<dyn AuthProvider>,
}

impl SheetsBackend {
    pub fn new(config: &dyn ExportConfig, auth: Arc<dyn AuthProvider>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: config.sheets_base_url().trim_end_matches('/').to_string(),
            spreadsheet_id: config.spreadsheet_id().to_string(),
            sheet_name: config.sheet_name().to_string(),
            auth,
        })
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}!{}",
            self.base_url, self.spreadsheet_id, self.sheet_name, range
        )
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // The service wraps diagnostics as {"error": {"message": ...}}.
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| {
                if body.is_empty() {
                    format!("spreadsheet service returned HTTP {}", status)
                } else {
                    body
                }
            });
        Err(ExportError::backend(Some(status.as_u16()), message))
    }
}

#[async_trait]
impl TabularBackend for SheetsBackend {
    async fn row_count(&mut self) -> Result<usize> {
        let token = self.auth.token().await?;
        let url = self.values_url("A:A");
        tracing::debug!(%url, "reading populated rows in column A");

        let response = self.client.get(&url).bearer_auth(token).send().await?;
        let body: ColumnValues = Self::check(response).await?.json().await?;
        Ok(body.values.map_or(0, |rows| rows.len()))
    }

    async fn write_header(&mut self, fields: &[String]) -> Result<()> {
        let token = self.auth.token().await?;
        let url = self.values_url("A1");
        tracing::debug!(%url, columns = fields.len(), "writing header row");

        let response = self
            .client
            .put(&url)
            .bearer_auth(token)
            .query(&[("valueInputOption", "RAW")])
            .json(&serde_json::json!({ "values": [fields] }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn append_values(&mut self, row_index: usize, values: &[String]) -> Result<()> {
        let token = self.auth.token().await?;
        let url = format!("{}:append", self.values_url(&format!("A{}", row_index)));
        tracing::debug!(%url, "appending data row");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&serde_json::json!({ "values": [values] }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<AppendResult> {
        Ok(AppendResult::Remote {
            url: format!(
                "https://docs.google.com/spreadsheets/d/{}",
                self.spreadsheet_id
            ),
        })
    }
}
