//! Dataset loading: layout detection, normalization and title corrections.

mod coerce;
mod corrections;
mod loader;
mod source;

pub use corrections::{save_document, TitleCorrections};
pub use loader::{detect_variant, normalize, Loader, LoaderConfig, DEFAULT_CORRECTIONS_FILE};
pub use source::{Dataset, SourceMetadata};
