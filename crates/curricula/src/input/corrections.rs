//! Competency title corrections overlay.
//!
//! The overlay is a small JSON file kept next to the dataset. It is either an
//! array of `{"competenzaNum": 1, "titoloCorretto": "..."}` entries or a plain
//! `{"1": "..."}` map. Keys are compared with the textual form of the
//! record's competency id.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::error::{CurriculaError, Result};
use crate::schema::{FieldNames, Record};

use super::coerce::{competency_key, text};
use super::loader::flat_items_mut;

/// Competency id → corrected title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleCorrections {
    titles: IndexMap<String, String>,
}

impl TitleCorrections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one correction.
    pub fn insert(&mut self, competency: impl Into<String>, title: impl Into<String>) {
        self.titles.insert(competency.into(), title.into());
    }

    pub fn get(&self, competency: &str) -> Option<&str> {
        self.titles.get(competency).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Read corrections from either supported JSON shape.
    ///
    /// Entries without an id or with an empty title are skipped.
    pub fn from_value(value: &Value) -> Result<Self> {
        let mut corrections = Self::new();
        match value {
            Value::Array(entries) => {
                for entry in entries.iter().filter_map(Value::as_object) {
                    let id = competency_key(entry.get("competenzaNum"));
                    let title = text(entry.get("titoloCorretto"));
                    if let (Some(id), Some(title)) = (id, title) {
                        corrections.insert(id, title);
                    }
                }
            }
            Value::Object(map) => {
                for (id, title) in map {
                    let key = competency_key(Some(&Value::String(id.clone())));
                    if let (Some(key), Some(title)) = (key, text(Some(title))) {
                        corrections.insert(key, title);
                    }
                }
            }
            _ => {
                return Err(CurriculaError::Config(
                    "corrections must be an array or an object".to_string(),
                ));
            }
        }
        Ok(corrections)
    }

    /// Load corrections from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CurriculaError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let value: Value = serde_json::from_reader(BufReader::new(file))?;
        Self::from_value(&value)
    }

    /// Load corrections if the file exists and is valid.
    ///
    /// Failures are logged at debug level and never surface: a dataset
    /// without an overlay is the common case.
    pub fn load_optional(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(corrections) if !corrections.is_empty() => Some(corrections),
            Ok(_) => {
                debug!(path = %path.display(), "corrections file has no usable entries");
                None
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no corrections applied");
                None
            }
        }
    }

    /// Overwrite titles of matching records. Returns how many changed.
    pub fn apply(&self, records: &mut [Record]) -> usize {
        let mut changed = 0;
        for record in records.iter_mut() {
            let Some(title) = self.get(&record.competency_id.to_string()) else {
                continue;
            };
            if record.competency_title != title {
                // Records named after their title follow the correction.
                if record.name == record.competency_title {
                    record.name = title.to_string();
                }
                record.competency_title = title.to_string();
                changed += 1;
            }
        }
        changed
    }

    /// Rewrite titles inside a raw dataset document. Returns how many changed.
    ///
    /// Handles flat record arrays (using `fields` for the id and title keys)
    /// and the nested general-area layout.
    pub fn apply_to_document(&self, document: &mut Value, fields: &FieldNames) -> usize {
        if let Some(competencies) = area_competencies_mut(document) {
            let area = FieldNames::area_generale();
            return self.rewrite_objects(competencies, &area.competency_id, &area.title);
        }
        match flat_items_mut(document) {
            Some(items) => self.rewrite_objects(items, &fields.competency_id, &fields.title),
            None => 0,
        }
    }

    fn rewrite_objects(&self, items: &mut [Value], id_key: &str, title_key: &str) -> usize {
        let mut changed = 0;
        for item in items.iter_mut().filter_map(Value::as_object_mut) {
            let Some(id) = competency_key(item.get(id_key)) else {
                continue;
            };
            let Some(title) = self.get(&id) else {
                continue;
            };
            if item.get(title_key).and_then(Value::as_str) != Some(title) {
                item.insert(title_key.to_string(), Value::String(title.to_string()));
                changed += 1;
            }
        }
        changed
    }
}

fn area_competencies_mut(document: &mut Value) -> Option<&mut Vec<Value>> {
    document
        .as_object_mut()?
        .values_mut()
        .next()?
        .as_object_mut()?
        .get_mut("competenze")?
        .as_array_mut()
}

/// Write a dataset document back to disk, pretty-printed with a trailing newline.
pub fn save_document(document: &Value, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        CurriculaError::Persistence(format!(
            "Failed to create file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document).map_err(|e| {
        CurriculaError::Persistence(format!("Failed to serialize dataset: {}", e))
    })?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|e| CurriculaError::Persistence(format!("Failed to write '{}': {}", path.display(), e)))?;

    Ok(())
}
