//! A cleaned matches/deliveries pair held for one session.

use super::ids::DatasetId;
use super::records::{Delivery, MatchRecord};
use super::stats::{ColumnInfo, DatasetInfo, TableInfo};
use super::table::Table;

/// Immutable cleaned dataset.
///
/// The tables are kept as cleaned for export; the typed records are
/// projected once so views don't re-read cells by name.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub id: DatasetId,
    pub matches: Table,
    pub deliveries: Table,
    pub match_records: Vec<MatchRecord>,
    pub delivery_records: Vec<Delivery>,
}

impl Dataset {
    /// Wrap already-cleaned tables.
    pub fn new(id: DatasetId, matches: Table, deliveries: Table) -> Self {
        let match_records = MatchRecord::from_table(&matches);
        let delivery_records = Delivery::from_table(&deliveries);
        Self {
            id,
            matches,
            deliveries,
            match_records,
            delivery_records,
        }
    }

    pub fn info(&self, preview_rows: usize) -> DatasetInfo {
        DatasetInfo {
            id: self.id.to_string(),
            matches: table_info(&self.matches),
            deliveries: table_info(&self.deliveries),
            preview_columns: self.matches.column_names(),
            preview: self.matches.head(preview_rows),
        }
    }
}

fn table_info(table: &Table) -> TableInfo {
    TableInfo {
        rows: table.len(),
        columns: table
            .columns
            .iter()
            .enumerate()
            .map(|(idx, col)| ColumnInfo {
                name: col.name.clone(),
                kind: col.kind,
                non_null: table.non_missing_count(idx),
            })
            .collect(),
    }
}
