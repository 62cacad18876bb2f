use crate::domain::model::{AppendResult, Record};
use crate::domain::ports::TabularBackend;
use crate::utils::error::Result;

/// Appends one [`Record`] to a dataset behind any [`TabularBackend`].
///
/// The protocol is the same for both backends: read the current row count,
/// write the header first if the dataset is empty, then append the record's
/// values as the next row. Any failure aborts the whole operation; nothing
/// is retried.
///
/// The header write and the row append are two separate backend calls, so a
/// failure between them can leave a header with no data row on a remote
/// backend. That matches the upstream service's API shape and is accepted
/// here rather than papered over.
pub struct RowAppender;

impl RowAppender {
    pub async fn append_row<B: TabularBackend>(
        backend: &mut B,
        record: &Record,
    ) -> Result<AppendResult> {
        let existing = backend.row_count().await?;
        let next_row = existing + 1;

        tracing::debug!(existing, next_row, "appending record");

        if next_row == 1 {
            tracing::debug!("empty dataset, writing header row");
            backend.write_header(&record.field_names()).await?;
        }

        backend.append_values(next_row, &record.values()).await?;
        backend.commit().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ExportError;
    use async_trait::async_trait;

    #[derive(Default)]
    struct RecordingBackend {
        rows: usize,
        header: Option<Vec<String>>,
        appended: Vec<(usize, Vec<String>)>,
        fail_on_append: bool,
        committed: bool,
    }

    #[async_trait]
    impl TabularBackend for RecordingBackend {
        async fn row_count(&mut self) -> Result<usize> {
            Ok(self.rows)
        }

        async fn write_header(&mut self, fields: &[String]) -> Result<()> {
            self.header = Some(fields.to_vec());
            Ok(())
        }

        async fn append_values(&mut self, row_index: usize, values: &[String]) -> Result<()> {
            if self.fail_on_append {
                return Err(ExportError::backend(Some(500), "append rejected"));
            }
            self.appended.push((row_index, values.to_vec()));
            self.rows += 1;
            Ok(())
        }

        async fn commit(&mut self) -> Result<AppendResult> {
            self.committed = true;
            Ok(AppendResult::Remote {
                url: "http://example/sheet".to_string(),
            })
        }
    }

    fn sample_record() -> Record {
        let mut record = Record::new();
        record.insert("Name", "Jane");
        record.insert("Age", "30");
        record
    }

    #[tokio::test]
    async fn test_empty_dataset_writes_header_first() {
        let mut backend = RecordingBackend::default();

        RowAppender::append_row(&mut backend, &sample_record())
            .await
            .unwrap();

        assert_eq!(
            backend.header,
            Some(vec!["Name".to_string(), "Age".to_string()])
        );
        assert_eq!(
            backend.appended,
            vec![(1, vec!["Jane".to_string(), "30".to_string()])]
        );
        assert!(backend.committed);
    }

    #[tokio::test]
    async fn test_non_empty_dataset_never_rewrites_header() {
        let mut backend = RecordingBackend {
            rows: 3,
            ..Default::default()
        };

        RowAppender::append_row(&mut backend, &sample_record())
            .await
            .unwrap();

        assert_eq!(backend.header, None);
        assert_eq!(backend.appended[0].0, 4);
    }

    #[tokio::test]
    async fn test_sequential_appends_increment_next_row() {
        let mut backend = RecordingBackend::default();
        let record = sample_record();

        RowAppender::append_row(&mut backend, &record).await.unwrap();
        RowAppender::append_row(&mut backend, &record).await.unwrap();

        assert_eq!(backend.appended[0].0, 1);
        assert_eq!(backend.appended[1].0, 2);
    }

    #[tokio::test]
    async fn test_append_failure_aborts_without_commit() {
        let mut backend = RecordingBackend {
            fail_on_append: true,
            ..Default::default()
        };

        let err = RowAppender::append_row(&mut backend, &sample_record())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ExportError::BackendError {
                status: Some(500),
                ..
            }
        ));
        assert!(!backend.committed);
    }
}
