//! Dashboard summaries: counts, competency groups, axis cards and selector options.

mod groups;
mod options;
mod stats;

pub use groups::{competency_groups, group_records, CompetencyGroup, CompetencySection, RecordGroup};
pub use options::{shorten, FilterOption, FilterOptions, OPTION_TITLE_WIDTH};
pub use stats::{AxisOverview, Stats};
