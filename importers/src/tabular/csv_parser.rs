use csv::{ReaderBuilder, Trim};
use shared_types::{DatasetKind, LoadError};

pub struct CsvParser {
    delimiter: u8,
}

impl CsvParser {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Split `content` into rows of trimmed fields.
    ///
    /// The first line is the header and must carry exactly the columns of
    /// `dataset`. Rows whose field count differs from the header are dropped.
    pub fn parse_rows(
        &self,
        dataset: DatasetKind,
        content: &[u8],
    ) -> Result<Vec<Vec<String>>, LoadError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(content);

        let headers = reader
            .headers()
            .map_err(|e| LoadError::Malformed {
                dataset,
                reason: e.to_string(),
            })?
            .clone();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(LoadError::Malformed {
                dataset,
                reason: "missing header row".to_string(),
            });
        }

        let expected = dataset.columns().len();
        if headers.len() != expected {
            return Err(LoadError::Malformed {
                dataset,
                reason: format!(
                    "header has {} column(s), expected {}",
                    headers.len(),
                    expected
                ),
            });
        }

        let mut rows = Vec::new();

        for (index, result) in reader.records().enumerate() {
            match result {
                Ok(record) if record.len() == headers.len() => {
                    rows.push(record.iter().map(|field| field.to_string()).collect());
                }
                Ok(record) => {
                    tracing::debug!(
                        "Dropping {} row {}: {} field(s) instead of {}",
                        dataset,
                        index + 2,
                        record.len(),
                        headers.len()
                    );
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {} row {}: {}", dataset, index + 2, e);
                }
            }
        }

        Ok(rows)
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}
