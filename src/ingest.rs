//! Loading and cleaning of match and delivery files.
//!
//! Both files go through the same steps: parse, normalize column names,
//! drop exact duplicate rows, fill missing values. The matches table is
//! filled everywhere; deliveries only in numeric columns so an empty
//! `player_dismissed` still means "not out".

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{Dataset, DatasetId, Table};

/// Columns the deliveries file cannot do without.
pub const REQUIRED_DELIVERY_COLUMNS: &[&str] = &["batsman", "batsman_runs"];

/// Errors raised while loading the uploaded files.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read {file} file: {source}")]
    Io {
        file: &'static str,
        source: std::io::Error,
    },

    #[error("Failed to parse {file} file: {source}")]
    Csv {
        file: &'static str,
        source: csv::Error,
    },

    #[error(
        "Deliveries file is missing required columns: {missing:?}. Available columns: {available:?}"
    )]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },
}

/// Counts of what cleaning changed in one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub duplicates_removed: usize,
    pub cells_filled: usize,
}

/// Parse delimited text into a table. Ragged rows are an error.
pub fn parse_table(bytes: &[u8], file: &'static str) -> Result<Table, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| IngestError::Csv { file, source })?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv { file, source })?;
        records.push(record.iter().map(str::to_string).collect());
    }

    debug!(file, rows = records.len(), columns = headers.len(), "Parsed table");
    Ok(Table::from_raw(headers, records))
}

/// Normalize, deduplicate and zero-fill the matches table.
pub fn clean_matches(table: &mut Table) -> CleanReport {
    table.normalize_column_names();
    CleanReport {
        duplicates_removed: table.drop_duplicates(),
        cells_filled: table.fill_missing(false),
    }
}

/// Normalize, deduplicate and zero-fill numeric columns of the deliveries table.
pub fn clean_deliveries(table: &mut Table) -> CleanReport {
    table.normalize_column_names();
    CleanReport {
        duplicates_removed: table.drop_duplicates(),
        cells_filled: table.fill_missing(true),
    }
}

/// Check the deliveries table has every required column.
pub fn validate_deliveries(table: &Table) -> Result<(), IngestError> {
    let missing: Vec<String> = REQUIRED_DELIVERY_COLUMNS
        .iter()
        .filter(|c| !table.has_column(c))
        .map(|c| c.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(IngestError::MissingColumns {
            missing,
            available: table.column_names(),
        })
    }
}

/// Load both files from memory and produce a cleaned dataset.
pub fn load_dataset(matches_csv: &[u8], deliveries_csv: &[u8]) -> Result<Dataset, IngestError> {
    let id = DatasetId::generate(&[matches_csv, deliveries_csv]);

    let mut matches = parse_table(matches_csv, "matches")?;
    let mut deliveries = parse_table(deliveries_csv, "deliveries")?;

    let match_report = clean_matches(&mut matches);
    let delivery_report = clean_deliveries(&mut deliveries);
    debug!(columns = ?deliveries.column_names(), "Deliveries columns");

    if let Err(e) = validate_deliveries(&deliveries) {
        warn!("{}", e);
        return Err(e);
    }

    info!(
        dataset = %id,
        matches = matches.len(),
        deliveries = deliveries.len(),
        match_duplicates = match_report.duplicates_removed,
        delivery_duplicates = delivery_report.duplicates_removed,
        "Loaded dataset"
    );

    Ok(Dataset::new(id, matches, deliveries))
}

/// Load both files from disk.
pub fn load_dataset_from_paths(
    matches_path: &Path,
    deliveries_path: &Path,
) -> Result<Dataset, IngestError> {
    let matches = std::fs::read(matches_path).map_err(|source| IngestError::Io {
        file: "matches",
        source,
    })?;
    let deliveries = std::fs::read(deliveries_path).map_err(|source| IngestError::Io {
        file: "deliveries",
        source,
    })?;
    load_dataset(&matches, &deliveries)
}
