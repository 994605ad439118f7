//! Loaded dataset and its source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schema::{Record, RecordSchema, SchemaVariant};

/// Metadata about the source dataset file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected layout.
    pub variant: SchemaVariant,
    /// Number of normalized records.
    pub record_count: usize,
    /// Number of titles replaced by the corrections overlay.
    #[serde(default)]
    pub corrected_titles: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        variant: SchemaVariant,
        record_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            variant,
            record_count,
            corrected_titles: 0,
            loaded_at: Utc::now(),
        }
    }
}

/// A normalized, immutable dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Records in source order.
    pub records: Vec<Record>,
    /// Descriptor of the layout the records came from.
    pub schema: RecordSchema,
    /// Free-text description carried by the document, if any.
    pub description: Option<String>,
    /// Where the records came from.
    pub source: SourceMetadata,
}

impl Dataset {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrow every record, the unfiltered view.
    pub fn all(&self) -> Vec<&Record> {
        self.records.iter().collect()
    }
}
