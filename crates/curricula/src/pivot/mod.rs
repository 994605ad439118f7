//! Pivot engine: cross-tabulation, axis ordering and drill-down.
//!
//! The matrix is rebuilt from the filtered records on every call and never
//! updated in place. [`detail`] recomputes a single cell from scratch with the
//! same label resolution, so a drill-down always agrees with the matrix.

mod detail;
mod engine;
mod matrix;
mod sort;

pub use detail::detail;
pub use engine::build_matrix;
pub use matrix::{CellValue, PivotMatrix, PivotRow, PivotTable, ValueMode};
pub use sort::{collation_key, compare_labels, label_number, locale_cmp, sort_labels};
