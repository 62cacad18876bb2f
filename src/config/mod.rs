use crate::domain::ports::ExportConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportTarget {
    /// Append to the configured remote spreadsheet.
    Sheets,
    /// Append to (or create) a local workbook file.
    File,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "url2sheet")]
#[command(about = "Extract structured data from a URL and append it to a spreadsheet")]
pub struct CliConfig {
    /// URL to extract data from
    pub url: String,

    /// Where to export the extracted record
    #[arg(long, value_enum, default_value = "file")]
    pub to: ExportTarget,

    /// Base URL of the extraction service
    #[arg(long, default_value = "http://localhost:3000")]
    pub extract_endpoint: String,

    /// Base URL of the spreadsheet values API
    #[arg(long, default_value = "https://sheets.googleapis.com/v4")]
    pub sheets_base_url: String,

    /// Target spreadsheet id (required for --to sheets)
    #[arg(long, default_value = "")]
    pub spreadsheet_id: String,

    /// Sheet/tab addressed by read and append ranges
    #[arg(long, default_value = "Sheet1")]
    pub sheet_name: String,

    /// OAuth access token; falls back to $SHEETS_ACCESS_TOKEN
    #[arg(long)]
    pub access_token: Option<String>,

    /// Existing workbook to append to; omit to create a new one
    #[arg(long)]
    pub existing_file: Option<PathBuf>,

    /// Filename for a newly created workbook
    #[arg(long, default_value = "fatal-encounters-data.csv")]
    pub workbook_filename: String,

    /// Directory the committed workbook is written to
    #[arg(long, default_value = ".")]
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn resolved_token(&self) -> String {
        self.access_token
            .clone()
            .or_else(|| std::env::var("SHEETS_ACCESS_TOKEN").ok())
            .unwrap_or_default()
    }
}

impl ExportConfig for CliConfig {
    fn extract_endpoint(&self) -> &str {
        &self.extract_endpoint
    }

    fn sheets_base_url(&self) -> &str {
        &self.sheets_base_url
    }

    fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    fn workbook_filename(&self) -> &str {
        &self.workbook_filename
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("url", &self.url)?;
        validate_url("extract_endpoint", &self.extract_endpoint)?;

        if self.to == ExportTarget::Sheets {
            validate_url("sheets_base_url", &self.sheets_base_url)?;
            validate_non_empty_string("spreadsheet_id", &self.spreadsheet_id)?;
        }

        Ok(())
    }
}
