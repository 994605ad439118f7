use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::dimension::Dimension;
use crate::error::CurriculaError;
use crate::schema::Record;

/// What a pivot cell shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueMode {
    /// Number of records in the cell.
    #[default]
    Count,
    /// Distinct record names in the cell.
    List,
}

impl fmt::Display for ValueMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueMode::Count => write!(f, "count"),
            ValueMode::List => write!(f, "list"),
        }
    }
}

impl FromStr for ValueMode {
    type Err = CurriculaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "count" | "conteggio" => Ok(ValueMode::Count),
            "list" | "lista" | "elenco" => Ok(ValueMode::List),
            other => Err(CurriculaError::Config(format!("unknown value mode '{}'", other))),
        }
    }
}

/// A cross-tabulation of records over two dimensions.
///
/// Cells are stored densely in `row_keys × col_keys` order. A record appears
/// in every cell its row and column labels select, so with multi-valued
/// dimensions it can sit in several cells at once.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotMatrix<'a> {
    pub row_dimension: Dimension,
    pub col_dimension: Dimension,
    pub mode: ValueMode,
    pub row_keys: Vec<String>,
    pub col_keys: Vec<String>,
    pub(crate) cells: Vec<Vec<Vec<&'a Record>>>,
}

impl<'a> PivotMatrix<'a> {
    /// True when no record was tabulated.
    pub fn is_empty(&self) -> bool {
        self.row_keys.is_empty()
    }

    pub fn row_index(&self, key: &str) -> Option<usize> {
        self.row_keys.iter().position(|k| k == key)
    }

    pub fn col_index(&self, key: &str) -> Option<usize> {
        self.col_keys.iter().position(|k| k == key)
    }

    /// Records in the cell at `(row, col)` by position.
    pub fn cell_at(&self, row: usize, col: usize) -> &[&'a Record] {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .map(|c| c.as_slice())
            .unwrap_or(&[])
    }

    /// Records in the cell labelled `(row_key, col_key)`; empty for unknown keys.
    pub fn cell(&self, row_key: &str, col_key: &str) -> &[&'a Record] {
        match (self.row_index(row_key), self.col_index(col_key)) {
            (Some(r), Some(c)) => self.cell_at(r, c),
            _ => &[],
        }
    }

    pub fn count(&self, row_key: &str, col_key: &str) -> usize {
        self.cell(row_key, col_key).len()
    }

    /// Distinct display names in a cell, first-seen order.
    pub fn names_at(&self, row: usize, col: usize) -> Vec<&'a str> {
        let names: IndexSet<&'a str> = self
            .cell_at(row, col)
            .iter()
            .map(|&r| r.display_name())
            .collect();
        names.into_iter().collect()
    }

    /// Sum of cell counts per row.
    ///
    /// A record sitting in two cells of the same row is counted twice.
    pub fn row_totals(&self) -> Vec<usize> {
        self.cells
            .iter()
            .map(|row| row.iter().map(Vec::len).sum())
            .collect()
    }

    /// Sum of cell counts per column.
    pub fn col_totals(&self) -> Vec<usize> {
        (0..self.col_keys.len())
            .map(|c| self.cells.iter().map(|row| row[c].len()).sum())
            .collect()
    }

    pub fn grand_total(&self) -> usize {
        self.col_totals().iter().sum()
    }

    /// Render the matrix as an owned, serializable table.
    pub fn to_table(&self) -> PivotTable {
        let row_totals = self.row_totals();
        let rows = self
            .row_keys
            .iter()
            .enumerate()
            .map(|(r, key)| PivotRow {
                key: key.clone(),
                cells: (0..self.col_keys.len())
                    .map(|c| match self.mode {
                        ValueMode::Count => CellValue::Count(self.cell_at(r, c).len()),
                        ValueMode::List => CellValue::List(
                            self.names_at(r, c).into_iter().map(str::to_string).collect(),
                        ),
                    })
                    .collect(),
                total: row_totals[r],
            })
            .collect();

        PivotTable {
            row_dimension: self.row_dimension,
            col_dimension: self.col_dimension,
            mode: self.mode,
            columns: self.col_keys.clone(),
            rows,
            col_totals: self.col_totals(),
            grand_total: self.grand_total(),
        }
    }
}

/// Value shown in a rendered cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Count(usize),
    List(Vec<String>),
}

impl CellValue {
    /// Text for flat renderings: the count, or names joined with `sep`.
    pub fn to_text(&self, sep: &str) -> String {
        match self {
            CellValue::Count(n) => n.to_string(),
            CellValue::List(names) => names.join(sep),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Count(n) => *n == 0,
            CellValue::List(names) => names.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotRow {
    pub key: String,
    pub cells: Vec<CellValue>,
    pub total: usize,
}

/// Owned rendering of a [`PivotMatrix`], ready for output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotTable {
    pub row_dimension: Dimension,
    pub col_dimension: Dimension,
    pub mode: ValueMode,
    /// Column keys, in display order.
    pub columns: Vec<String>,
    pub rows: Vec<PivotRow>,
    pub col_totals: Vec<usize>,
    pub grand_total: usize,
}

impl PivotTable {
    /// Header line: row dimension heading, column keys, then "Totale".
    pub fn header(&self) -> Vec<String> {
        let mut header = Vec::with_capacity(self.columns.len() + 2);
        header.push(format!("{} / {}", self.row_dimension.label(), self.col_dimension.label()));
        header.extend(self.columns.iter().cloned());
        header.push("Totale".to_string());
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_mode_from_str() {
        assert_eq!("List".parse::<ValueMode>().unwrap(), ValueMode::List);
        assert_eq!("conteggio".parse::<ValueMode>().unwrap(), ValueMode::Count);
        assert!("sum".parse::<ValueMode>().is_err());
    }

    #[test]
    fn test_cell_value_text() {
        assert_eq!(CellValue::Count(3).to_text(", "), "3");
        assert_eq!(
            CellValue::List(vec!["a".into(), "b".into()]).to_text(" • "),
            "a • b"
        );
        assert!(CellValue::List(Vec::new()).is_empty());
    }

    #[test]
    fn test_empty_matrix_accessors() {
        let matrix = PivotMatrix {
            row_dimension: Dimension::Competency,
            col_dimension: Dimension::Period,
            mode: ValueMode::Count,
            row_keys: Vec::new(),
            col_keys: Vec::new(),
            cells: Vec::new(),
        };
        assert!(matrix.is_empty());
        assert!(matrix.cell("x", "y").is_empty());
        assert_eq!(matrix.grand_total(), 0);
        assert!(matrix.to_table().rows.is_empty());
    }
}
