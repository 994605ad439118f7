//! Curricula: filter, pivot and export engine for curriculum datasets.
//!
//! A curriculum dataset lists competencies together with the abilities,
//! knowledge items and teaching subjects attached to them, split by school
//! period or cultural axis. Curricula loads such a dataset from JSON and
//! answers the questions a dashboard asks of it.
//!
//! # Core Principles
//!
//! - **One engine, several layouts**: each JSON layout is described by a
//!   [`RecordSchema`] and normalized into the same [`Record`] type
//! - **Read-only data**: filtering and pivoting only borrow records
//! - **Recompute, don't patch**: every view is rebuilt from the filter state
//!
//! # Example
//!
//! ```no_run
//! use curricula::{Dashboard, Dimension, FilterState, PivotConfig, ValueMode};
//!
//! let dashboard = Dashboard::open("data-area-indirizzo.json").unwrap();
//! let filters = FilterState::new().with_subject("Storia");
//!
//! let pivot = PivotConfig::new(Dimension::Competency, Dimension::Period, ValueMode::Count);
//! let matrix = dashboard.pivot(&filters, &pivot);
//!
//! for (row, total) in matrix.row_keys.iter().zip(matrix.row_totals()) {
//!     println!("{}: {}", row, total);
//! }
//! ```

pub mod dimension;
pub mod error;
pub mod export;
pub mod filter;
pub mod input;
pub mod pivot;
pub mod schema;
pub mod summary;

mod dashboard;

pub use crate::dashboard::{Dashboard, DashboardConfig, PivotConfig};
pub use dimension::{resolve, Dimension, SENTINEL_LABEL};
pub use error::{CurriculaError, Result};
pub use export::{ExportArtifact, ExportConfig, ExportFormat};
pub use filter::{apply_filters, FilterState, SortMode};
pub use input::{Dataset, Loader, LoaderConfig, SourceMetadata, TitleCorrections};
pub use pivot::{build_matrix, detail, PivotMatrix, PivotTable, ValueMode};
pub use schema::{CompetencyId, KnowledgeItem, Record, RecordSchema, SchemaVariant};
