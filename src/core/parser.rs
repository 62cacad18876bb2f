use crate::domain::model::Record;
use chrono::{DateTime, Local};

/// A line in the raw blob is significant iff it contains this delimiter.
const FIELD_DELIMITER: &str = ":**";
const BOLD_MARKER: &str = "**";

pub const EXTRACTION_DATE_FIELD: &str = "Extraction Date";
pub const SOURCE_URL_FIELD: &str = "Source URL";

/// Converts the extraction service's newline-delimited, markdown-bold
/// annotated text into an ordered [`Record`].
///
/// Parsing is deliberately permissive: lines without the `:**` delimiter are
/// ignored, and a significant line with nothing before or after the
/// delimiter yields an empty-string label or value rather than an error.
pub struct RecordParser;

impl RecordParser {
    /// Parse `raw` and append the two derived fields (`Extraction Date`,
    /// `Source URL`), which always end up as the final two fields even if
    /// the raw text contained labels with the same names.
    pub fn parse(raw: &str, source_url: &str) -> Record {
        Self::parse_at(raw, source_url, Local::now())
    }

    fn parse_at(raw: &str, source_url: &str, now: DateTime<Local>) -> Record {
        let mut record = Record::new();

        for line in raw.lines() {
            let Some((raw_field, raw_value)) = line.split_once(FIELD_DELIMITER) else {
                continue;
            };
            let field = clean_field(raw_field.trim());
            let value = clean_value(raw_value.trim());
            record.insert(field, value);
        }

        record.force_last(
            EXTRACTION_DATE_FIELD,
            now.format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        record.force_last(SOURCE_URL_FIELD, source_url);
        record
    }
}

/// Strip all bold markers, then turn the first underscore into a space to
/// produce a human-readable label. Only the first underscore is replaced,
/// matching the behavior downstream consumers of these sheets expect.
fn clean_field(raw: &str) -> String {
    raw.replace(BOLD_MARKER, "").replacen('_', " ", 1)
}

fn clean_value(raw: &str) -> String {
    raw.replace(BOLD_MARKER, "")
}
