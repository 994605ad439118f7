//! Filter predicate: which records are visible under the current selections.

mod focus;
mod predicate;
mod search;
mod state;

pub use focus::{focus_on_subject, order_subjects_by_priority};
pub use predicate::{apply_filters, matches};
pub use search::{searchable_text, SearchQuery};
pub use state::{FilterState, SortMode};
