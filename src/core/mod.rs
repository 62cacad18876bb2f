pub mod appender;
pub mod extract;
pub mod parser;

pub use crate::domain::model::{AppendResult, Record};
pub use crate::domain::ports::{AuthProvider, ExportConfig, TabularBackend, TokenStore};
pub use crate::utils::error::Result;
