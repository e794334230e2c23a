mod aggregate;
mod decoder;
pub mod domain;
mod parser;
pub mod report;

pub use aggregate::{aggregate, ClosureAggregates};
pub use domain::{CategoryCount, ClosureDimension, ClosureRecord, OTHER_CATEGORY};
pub use report::{ClosureReport, ReportOptions};

use std::io::{Cursor, Read};
use std::path::Path;
use std::time::Instant;
use tracing::info;

#[derive(Debug)]
pub enum ClosureImportError {
    Io(std::io::Error),
    UnknownEncoding(String),
    Csv(csv::Error),
}

impl std::fmt::Display for ClosureImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClosureImportError::Io(err) => write!(f, "failed to read closure export: {}", err),
            ClosureImportError::UnknownEncoding(label) => {
                write!(f, "unknown text encoding '{}'", label)
            }
            ClosureImportError::Csv(err) => write!(f, "invalid closure CSV data: {}", err),
        }
    }
}

impl std::error::Error for ClosureImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClosureImportError::Io(err) => Some(err),
            ClosureImportError::UnknownEncoding(_) => None,
            ClosureImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ClosureImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ClosureImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Parsed rows of one closure export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosureDataset {
    records: Vec<ClosureRecord>,
}

impl ClosureDataset {
    pub fn new(records: Vec<ClosureRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ClosureRecord] {
        &self.records
    }

    /// Rows without a closure date; these are left out of every aggregate.
    pub fn undated_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.year_key().is_none())
            .count()
    }

    pub fn aggregates(&self) -> ClosureAggregates {
        aggregate(&self.records)
    }

    pub fn report(&self, options: &ReportOptions) -> ClosureReport {
        self.aggregates().report(options)
    }
}

pub struct ClosureImporter;

impl ClosureImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        encoding: &str,
    ) -> Result<ClosureDataset, ClosureImportError> {
        let path = path.as_ref();
        info!(path = %path.display(), encoding, "loading closure export");
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, encoding)
    }

    pub fn from_reader<R: Read>(
        mut reader: R,
        encoding: &str,
    ) -> Result<ClosureDataset, ClosureImportError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes, encoding)
    }

    pub fn from_bytes(bytes: &[u8], encoding: &str) -> Result<ClosureDataset, ClosureImportError> {
        let text = decoder::decode(bytes, encoding)?;
        Self::from_text(&text)
    }

    /// Parses text that is already decoded.
    pub fn from_text(text: &str) -> Result<ClosureDataset, ClosureImportError> {
        let started = Instant::now();
        let dataset = ClosureDataset::new(parser::parse_records(Cursor::new(text.as_bytes()))?);

        info!(
            rows = dataset.records().len(),
            undated = dataset.undated_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "parsed closure export"
        );

        Ok(dataset)
    }
}
