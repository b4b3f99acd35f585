//! Typed in-memory table.
//!
//! Holds an uploaded file after parsing. Each column gets a kind inferred
//! from its present values; cells keep the parsed value so the cleaned table
//! can be exported exactly as it is held in memory.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Raw field values treated as missing.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a raw field denotes a missing value.
pub fn is_missing_marker(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw)
}

/// Inferred kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    /// Infer the kind from a column's raw values.
    ///
    /// A column with no present values is text.
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut kind = None;
        for raw in values.into_iter().filter(|v| !is_missing_marker(v)) {
            let this = if raw.parse::<i64>().is_ok() {
                ColumnKind::Integer
            } else if raw.parse::<f64>().is_ok() {
                ColumnKind::Float
            } else {
                return ColumnKind::Text;
            };
            kind = Some(match (kind, this) {
                (Some(ColumnKind::Float), _) | (_, ColumnKind::Float) => ColumnKind::Float,
                _ => ColumnKind::Integer,
            });
        }
        kind.unwrap_or(ColumnKind::Text)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }

    /// Value used to replace a missing cell in a column of this kind.
    pub fn zero(&self) -> Cell {
        match self {
            ColumnKind::Integer => Cell::Int(0),
            ColumnKind::Float => Cell::Float(0.0),
            ColumnKind::Text => Cell::Text("0".to_string()),
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Integer => write!(f, "integer"),
            ColumnKind::Float => write!(f, "float"),
            ColumnKind::Text => write!(f, "text"),
        }
    }
}

/// A single parsed value.
#[derive(Debug, Clone)]
pub enum Cell {
    Missing,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// Parse a raw field for a column of the given kind.
    pub fn parse(raw: &str, kind: ColumnKind) -> Self {
        if is_missing_marker(raw) {
            return Cell::Missing;
        }
        match kind {
            ColumnKind::Integer => raw
                .parse()
                .map(Cell::Int)
                .unwrap_or_else(|_| Cell::Text(raw.to_string())),
            ColumnKind::Float => raw
                .parse()
                .map(Cell::Float)
                .unwrap_or_else(|_| Cell::Text(raw.to_string())),
            ColumnKind::Text => Cell::Text(raw.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Integer view of a numeric cell. Floats must be whole.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Int(i) => Some(*i),
            Cell::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// Canonical text of a present cell.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Missing => None,
            other => Some(other.to_string()),
        }
    }

    /// Field text for writing back to CSV. Floats keep their decimal point
    /// so the column re-parses as float.
    pub fn to_field(&self) -> String {
        match self {
            Cell::Float(v) => format!("{:?}", v),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Text(s) => write!(f, "{}", s),
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cell::Missing, Cell::Missing) => true,
            (Cell::Int(a), Cell::Int(b)) => a == b,
            (Cell::Float(a), Cell::Float(b)) => a.to_bits() == b.to_bits(),
            (Cell::Text(a), Cell::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Cell::Missing => {}
            Cell::Int(i) => i.hash(state),
            Cell::Float(f) => f.to_bits().hash(state),
            Cell::Text(s) => s.hash(state),
        }
    }
}

/// Order two rendered values numerically when both are numbers,
/// otherwise lexically. Numbers sort before text.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// Column-typed table of cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a table from raw string records, inferring column kinds.
    pub fn from_raw(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        let columns: Vec<Column> = headers
            .into_iter()
            .enumerate()
            .map(|(idx, name)| Column {
                kind: ColumnKind::infer(
                    records.iter().filter_map(|r| r.get(idx)).map(String::as_str),
                ),
                name,
            })
            .collect();

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(idx, col)| {
                        record
                            .get(idx)
                            .map(|raw| Cell::parse(raw, col.kind))
                            .unwrap_or(Cell::Missing)
                    })
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Trim and lowercase every column name.
    pub fn normalize_column_names(&mut self) {
        for col in &mut self.columns {
            col.name = col.name.trim().to_lowercase();
        }
    }

    /// Remove exact duplicate rows, keeping the first occurrence.
    /// Returns the number of rows removed.
    pub fn drop_duplicates(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen: HashSet<Vec<Cell>> = HashSet::with_capacity(before);
        self.rows.retain(|row| seen.insert(row.clone()));
        before - self.rows.len()
    }

    /// Replace missing cells with the zero of their column's kind.
    /// When `numeric_only` is set, text columns are left untouched.
    /// Otherwise a column with no present values becomes a float column
    /// of zeros. Returns the number of cells filled.
    pub fn fill_missing(&mut self, numeric_only: bool) -> usize {
        if !numeric_only && !self.rows.is_empty() {
            for idx in 0..self.columns.len() {
                if self.non_missing_count(idx) == 0 {
                    self.columns[idx].kind = ColumnKind::Float;
                }
            }
        }

        let mut filled = 0;
        for row in &mut self.rows {
            for (cell, col) in row.iter_mut().zip(&self.columns) {
                if cell.is_missing() && (!numeric_only || col.kind.is_numeric()) {
                    *cell = col.kind.zero();
                    filled += 1;
                }
            }
        }
        filled
    }

    /// Count of present cells in a column.
    pub fn non_missing_count(&self, idx: usize) -> usize {
        self.rows
            .iter()
            .filter(|row| row.get(idx).is_some_and(|c| !c.is_missing()))
            .count()
    }

    /// First `n` rows rendered as strings.
    pub fn head(&self, n: usize) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .take(n)
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }
}
