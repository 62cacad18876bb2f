pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::auth::{MemoryTokenStore, StaticTokenProvider, StoredTokenProvider};
pub use crate::adapters::sheets::SheetsBackend;
pub use crate::adapters::workbook::LocalWorkbook;
pub use crate::config::{CliConfig, ExportTarget};
pub use crate::core::appender::RowAppender;
pub use crate::core::extract::ExtractClient;
pub use crate::core::parser::RecordParser;
pub use crate::domain::model::{AppendResult, Record};
pub use crate::domain::ports::{AuthProvider, ExportConfig, TabularBackend, TokenStore};
pub use crate::utils::error::{ExportError, Result};
