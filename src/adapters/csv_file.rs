use crate::domain::ports::ObservationSource;
use crate::utils::error::{DashboardError, Result};
use async_trait::async_trait;
use std::path::PathBuf;

pub const DEFAULT_SALARY_COLUMN: &str = "Salary";

/// Extracts one numeric column from a CSV resource with a header row. Rows
/// where the column is missing or does not parse as a finite number are
/// silently dropped; no drop count is retained.
pub struct CsvColumnSource {
    path: PathBuf,
    column: String,
}

impl CsvColumnSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            column: DEFAULT_SALARY_COLUMN.to_string(),
        }
    }

    pub fn with_column(path: impl Into<PathBuf>, column: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            column: column.into(),
        }
    }
}

#[async_trait]
impl ObservationSource for CsvColumnSource {
    async fn fetch(&self) -> Result<Vec<f64>> {
        let raw = tokio::fs::read(&self.path).await?;
        let mut reader = csv::Reader::from_reader(raw.as_slice());

        let headers = reader.headers()?;
        let column_index = headers
            .iter()
            .position(|h| h == self.column)
            .ok_or_else(|| DashboardError::ParseError {
                message: format!("CSV has no '{}' column", self.column),
            })?;

        let mut values = Vec::new();
        for record in reader.records() {
            let record = record?;
            if let Some(value) = record
                .get(column_index)
                .and_then(|field| field.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
            {
                values.push(value);
            }
        }

        tracing::debug!(
            "Read {} valid observations from {}",
            values.len(),
            self.path.display()
        );
        Ok(values)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
