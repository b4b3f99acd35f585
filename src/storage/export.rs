//! CSV export of cleaned tables.
//!
//! Tables are written exactly as held in memory: normalized headers,
//! duplicates removed, missing values filled.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::models::{Cell, Dataset, Table};

use super::StorageError;

/// Download name of the cleaned matches table.
pub const MATCHES_EXPORT: &str = "ipl_matches.csv";

/// Download name of the cleaned deliveries table.
pub const DELIVERIES_EXPORT: &str = "deliveries.csv";

/// Write a table as CSV with a header row.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<(), StorageError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.columns.iter().map(|c| c.name.as_str()))?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(Cell::to_field))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render a table to CSV bytes.
pub fn to_csv_bytes(table: &Table) -> Result<Vec<u8>, StorageError> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    Ok(buf)
}

/// Write both cleaned tables into `out_dir`, returning the file paths.
pub fn export_dataset(dataset: &Dataset, out_dir: &Path) -> Result<(PathBuf, PathBuf), StorageError> {
    std::fs::create_dir_all(out_dir)?;

    let matches_path = out_dir.join(MATCHES_EXPORT);
    let deliveries_path = out_dir.join(DELIVERIES_EXPORT);

    write_csv(&dataset.matches, BufWriter::new(File::create(&matches_path)?))?;
    write_csv(
        &dataset.deliveries,
        BufWriter::new(File::create(&deliveries_path)?),
    )?;

    info!(
        "Exported {} matches and {} deliveries to {:?}",
        dataset.matches.len(),
        dataset.deliveries.len(),
        out_dir
    );
    Ok((matches_path, deliveries_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{clean_deliveries, clean_matches, load_dataset, parse_table};
    use crate::models::ColumnKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_export_reparses_to_same_table() {
        let raw = "Match_ID,Batsman,batsman_runs,player_dismissed\n1,\"Smith, S\",4,\n1,B,,B\n1,B,,B\n";
        let mut table = parse_table(raw.as_bytes(), "deliveries").unwrap();
        clean_deliveries(&mut table);

        let bytes = to_csv_bytes(&table).unwrap();
        let reparsed = parse_table(&bytes, "deliveries").unwrap();

        assert_eq!(reparsed, table);
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "match_id,batsman,batsman_runs,player_dismissed\n1,\"Smith, S\",4,\n1,B,0,B\n"
        );
    }

    #[test]
    fn test_export_keeps_float_and_filled_columns() {
        let raw = "id,win_by_runs,umpire3\n1,35.0,\n2,0.0,\n";
        let mut table = parse_table(raw.as_bytes(), "matches").unwrap();
        clean_matches(&mut table);

        let bytes = to_csv_bytes(&table).unwrap();
        assert_eq!(
            String::from_utf8(bytes.clone()).unwrap(),
            "id,win_by_runs,umpire3\n1,35.0,0.0\n2,0.0,0.0\n"
        );

        let reparsed = parse_table(&bytes, "matches").unwrap();
        assert_eq!(reparsed.columns[1].kind, ColumnKind::Float);
        assert_eq!(reparsed.columns[2].kind, ColumnKind::Float);
        assert_eq!(reparsed, table);
    }

    #[test]
    fn test_export_dataset_writes_both_files() {
        let dataset = load_dataset(
            b"id,winner\n1,A\n1,A\n",
            b"batsman,batsman_runs\nA,1\n",
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();

        let (matches_path, deliveries_path) = export_dataset(&dataset, dir.path()).unwrap();

        assert_eq!(matches_path.file_name().unwrap(), MATCHES_EXPORT);
        assert_eq!(
            std::fs::read_to_string(matches_path).unwrap(),
            "id,winner\n1,A\n"
        );
        assert_eq!(
            std::fs::read_to_string(deliveries_path).unwrap(),
            "batsman,batsman_runs\nA,1\n"
        );
    }
}
