use crate::domain::model::{AppendResult, Record};
use crate::domain::ports::TabularBackend;
use crate::utils::error::{ExportError, Result};
use async_trait::async_trait;

/// Local backend: an in-memory workbook loaded from (and serialized back to)
/// a CSV blob. Nothing persists in-process; the caller writes the committed
/// bytes wherever they belong.
#[derive(Debug)]
pub struct LocalWorkbook {
    filename: String,
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl LocalWorkbook {
    /// Fresh workbook with no rows. `filename` is what `commit` reports,
    /// typically a configured default.
    pub fn create<S: Into<String>>(filename: S) -> Self {
        Self {
            filename: filename.into(),
            header: None,
            rows: Vec::new(),
        }
    }

    /// Load an existing workbook. The original filename is preserved so an
    /// append round-trips to the same download name.
    pub fn open<S: Into<String>>(bytes: &[u8], filename: S) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(bytes);

        let header = {
            let headers = reader.headers()?;
            if headers.is_empty() {
                None
            } else {
                Some(headers.iter().map(str::to_string).collect())
            }
        };

        let mut rows = Vec::new();
        for result in reader.records() {
            let row = result?;
            rows.push(row.iter().map(str::to_string).collect());
        }

        Ok(Self {
            filename: filename.into(),
            header,
            rows,
        })
    }

    /// The loaded rows as [`Record`]s, paired positionally with the header.
    pub fn records(&self) -> Vec<Record> {
        let Some(header) = &self.header else {
            return Vec::new();
        };
        self.rows
            .iter()
            .map(|row| {
                header
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect::<Record>()
            })
            .collect()
    }
}

#[async_trait]
impl TabularBackend for LocalWorkbook {
    async fn row_count(&mut self) -> Result<usize> {
        Ok(self.rows.len())
    }

    async fn write_header(&mut self, fields: &[String]) -> Result<()> {
        self.header = Some(fields.to_vec());
        Ok(())
    }

    async fn append_values(&mut self, _row_index: usize, values: &[String]) -> Result<()> {
        self.rows.push(values.to_vec());
        Ok(())
    }

    async fn commit(&mut self) -> Result<AppendResult> {
        // Rows are trusted to align positionally with the header; nothing
        // reconciles a record whose field set drifted, so don't reject one
        // at serialization time either.
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        if let Some(header) = &self.header {
            writer.write_record(header)?;
        }
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::IoError(e.into_error()))?;

        Ok(AppendResult::Local {
            filename: self.filename.clone(),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::appender::RowAppender;

    fn record(pairs: &[(&str, &str)]) -> Record {
        let mut r = Record::new();
        for (k, v) in pairs {
            r.insert(*k, *v);
        }
        r
    }

    async fn commit_bytes(workbook: &mut LocalWorkbook) -> Vec<u8> {
        match workbook.commit().await.unwrap() {
            AppendResult::Local { bytes, .. } => bytes,
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_first_append_writes_header() {
        let mut workbook = LocalWorkbook::create("data.csv");
        let rec = record(&[("Name", "Jane"), ("Age", "30")]);

        let result = RowAppender::append_row(&mut workbook, &rec).await.unwrap();

        let AppendResult::Local { filename, bytes } = result else {
            panic!("expected local result");
        };
        assert_eq!(filename, "data.csv");
        assert_eq!(String::from_utf8(bytes).unwrap(), "Name,Age\nJane,30\n");
    }

    #[tokio::test]
    async fn test_append_to_existing_preserves_rows_and_filename() {
        let existing = b"Name,Age\nJane,30\n";
        let mut workbook = LocalWorkbook::open(existing, "mine.csv").unwrap();
        let rec = record(&[("Name", "John"), ("Age", "41")]);

        let result = RowAppender::append_row(&mut workbook, &rec).await.unwrap();

        let AppendResult::Local { filename, bytes } = result else {
            panic!("expected local result");
        };
        assert_eq!(filename, "mine.csv");
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Name,Age\nJane,30\nJohn,41\n"
        );
    }

    #[tokio::test]
    async fn test_round_trip_matches_in_memory_appends() {
        let first = record(&[("Name", "Jane"), ("Age", "30")]);
        let second = record(&[("Name", "John"), ("Age", "41")]);

        // Serialize after the first append, reload, then append the second.
        let mut workbook = LocalWorkbook::create("data.csv");
        RowAppender::append_row(&mut workbook, &first).await.unwrap();
        let bytes = commit_bytes(&mut workbook).await;
        let mut reloaded = LocalWorkbook::open(&bytes, "data.csv").unwrap();
        RowAppender::append_row(&mut reloaded, &second)
            .await
            .unwrap();
        let round_tripped = commit_bytes(&mut reloaded).await;

        // Both appends directly in memory.
        let mut direct = LocalWorkbook::create("data.csv");
        RowAppender::append_row(&mut direct, &first).await.unwrap();
        RowAppender::append_row(&mut direct, &second).await.unwrap();
        let in_memory = commit_bytes(&mut direct).await;

        assert_eq!(round_tripped, in_memory);
    }

    #[tokio::test]
    async fn test_existing_file_keeps_header_untouched() {
        let existing = b"Name,Age\nJane,30\n";
        let mut workbook = LocalWorkbook::open(existing, "mine.csv").unwrap();

        assert_eq!(workbook.row_count().await.unwrap(), 1);

        let rec = record(&[("Other", "x"), ("Columns", "y")]);
        RowAppender::append_row(&mut workbook, &rec).await.unwrap();
        let bytes = commit_bytes(&mut workbook).await;

        // Header stays as loaded; the new row is trusted to align
        // positionally with it.
        assert!(String::from_utf8(bytes).unwrap().starts_with("Name,Age\n"));
    }

    #[tokio::test]
    async fn test_malformed_blob_is_a_parse_error() {
        let garbage = b"Name,Age\n\"unterminated,30\nJohn";

        let err = LocalWorkbook::open(garbage, "bad.csv").unwrap_err();
        assert!(matches!(err, ExportError::ParseError(_)));
    }

    #[test]
    fn test_records_pairs_header_with_rows() {
        let existing = b"Name,Age\nJane,30\nJohn,41\n";
        let workbook = LocalWorkbook::open(existing, "mine.csv").unwrap();

        let records = workbook.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Name"), Some("Jane"));
        assert_eq!(records[1].get("Age"), Some("41"));
    }
}
