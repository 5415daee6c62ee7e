//! Batch valuation of listing exports delivered as CSV.

mod parser;

use crate::valuation::{ValuationEngine, ValuationReport, ValuationRequest};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug)]
pub enum BatchImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for BatchImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchImportError::Io(err) => write!(f, "failed to read listing export: {}", err),
            BatchImportError::Csv(err) => write!(f, "invalid listing CSV data: {}", err),
        }
    }
}

impl std::error::Error for BatchImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchImportError::Io(err) => Some(err),
            BatchImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for BatchImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BatchImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Per-row result; one rejected row never aborts the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchRowResult {
    Valued { report: ValuationReport },
    Rejected { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRowOutcome {
    /// 1-based data row, excluding the header.
    pub row: usize,
    pub make: String,
    pub model: String,
    #[serde(flatten)]
    pub result: BatchRowResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchValuation {
    pub rows: Vec<BatchRowOutcome>,
}

impl BatchValuation {
    pub fn valued_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row.result, BatchRowResult::Valued { .. }))
            .count()
    }

    pub fn rejected_count(&self) -> usize {
        self.rows.len() - self.valued_count()
    }
}

pub struct BatchImporter;

impl BatchImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ValuationRequest>, BatchImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ValuationRequest>, BatchImportError> {
        Ok(parser::parse_requests(reader)?)
    }

    pub fn valuate_path<P: AsRef<Path>>(
        engine: &ValuationEngine,
        path: P,
    ) -> Result<BatchValuation, BatchImportError> {
        let file = std::fs::File::open(path)?;
        Self::valuate_reader(engine, file)
    }

    pub fn valuate_reader<R: Read>(
        engine: &ValuationEngine,
        reader: R,
    ) -> Result<BatchValuation, BatchImportError> {
        let requests = Self::from_reader(reader)?;
        let rows = requests
            .into_iter()
            .enumerate()
            .map(|(index, request)| {
                let result = match engine.valuate(&request) {
                    Ok(report) => BatchRowResult::Valued { report },
                    Err(err) => BatchRowResult::Rejected {
                        error: err.to_string(),
                    },
                };
                BatchRowOutcome {
                    row: index + 1,
                    make: request.make,
                    model: request.model,
                    result,
                }
            })
            .collect::<Vec<_>>();

        let batch = BatchValuation { rows };
        debug!(
            valued = batch.valued_count(),
            rejected = batch.rejected_count(),
            "valued listing batch"
        );
        Ok(batch)
    }
}
