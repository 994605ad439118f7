//! Record types and per-variant schema descriptors.

mod descriptor;
mod record;

pub use descriptor::{default_axis_subjects, FieldNames, NameSource, RecordSchema, SchemaVariant};
pub use record::{CompetencyId, KnowledgeItem, Record};
