use crate::domain::model::AppendResult;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Supplies the bearer token for the remote spreadsheet service.
///
/// Token acquisition (interactive sign-in, refresh, whatever the flow is)
/// lives behind this seam; callers only see a token or an
/// `ExportError::AuthFailure`.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn token(&self) -> Result<String>;
}

/// Explicit key-value store for token persistence, so token lifetime and
/// persistence policy are injectable and test-controllable.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Where a dataset physically lives: a remote spreadsheet service or a local
/// in-memory workbook. The row-append algorithm is identical across both;
/// only these primitives differ.
///
/// Rows are 1-based to match spreadsheet addressing.
#[async_trait]
pub trait TabularBackend: Send {
    /// Number of populated rows already present (0 for an empty dataset).
    async fn row_count(&mut self) -> Result<usize>;

    /// Write the header row. Only ever called on an empty dataset.
    async fn write_header(&mut self, fields: &[String]) -> Result<()>;

    /// Append one row of values at the given 1-based row index.
    async fn append_values(&mut self, row_index: usize, values: &[String]) -> Result<()>;

    /// Finish the operation and hand back the result (resource URL or
    /// serialized workbook bytes).
    async fn commit(&mut self) -> Result<AppendResult>;
}

/// Accessors the extraction client and backends need from configuration.
pub trait ExportConfig: Send + Sync {
    fn extract_endpoint(&self) -> &str;
    fn sheets_base_url(&self) -> &str;
    fn spreadsheet_id(&self) -> &str;
    fn sheet_name(&self) -> &str;
    fn workbook_filename(&self) -> &str;
}
