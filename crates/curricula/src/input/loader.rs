//! Dataset loader with layout detection.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::{CurriculaError, Result};
use crate::schema::{KnowledgeItem, NameSource, Record, RecordSchema, SchemaVariant};

use super::coerce::{self, distinct, field, text, text_list};
use super::corrections::TitleCorrections;
use super::source::{Dataset, SourceMetadata};

/// Default name of the title corrections overlay.
pub const DEFAULT_CORRECTIONS_FILE: &str = "correzioni_competenze.json";

/// Axis name used when a general-area section has none.
const UNSPECIFIED_AXIS: &str = "Asse non specificato";

/// Loader configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Force a layout instead of detecting it.
    pub variant: Option<SchemaVariant>,
    /// Look for a corrections overlay next to the dataset.
    pub discover_corrections: bool,
    /// File name of the overlay when discovering.
    pub corrections_file_name: String,
    /// Explicit overlay path; wins over discovery.
    pub corrections_path: Option<PathBuf>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            variant: None,
            discover_corrections: true,
            corrections_file_name: DEFAULT_CORRECTIONS_FILE.to_string(),
            corrections_path: None,
        }
    }
}

/// Loads curriculum JSON documents into normalized [`Dataset`]s.
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a loader with default configuration.
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load a dataset file, then apply the corrections overlay if one is found.
    ///
    /// A missing or unreadable dataset is an error. A missing or unreadable
    /// overlay is not.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Dataset> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| CurriculaError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| CurriculaError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut dataset = self.load_bytes(&contents, path)?;

        if let Some(overlay_path) = self.corrections_path_for(path) {
            if let Some(corrections) = TitleCorrections::load_optional(&overlay_path) {
                let changed = corrections.apply(&mut dataset.records);
                debug!(
                    path = %overlay_path.display(),
                    changed,
                    "applied title corrections"
                );
                dataset.source.corrected_titles = changed;
            }
        }

        Ok(dataset)
    }

    /// Parse and normalize an in-memory document.
    pub fn load_bytes(&self, bytes: &[u8], path: &Path) -> Result<Dataset> {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let document: Value = serde_json::from_slice(bytes)?;
        let variant = self.config.variant.unwrap_or_else(|| detect_variant(&document));
        let schema = RecordSchema::for_variant(variant);

        let (records, description) = normalize(&document, &schema);
        debug!(
            variant = variant.label(),
            records = records.len(),
            "normalized dataset"
        );

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            bytes.len() as u64,
            variant,
            records.len(),
        );

        Ok(Dataset {
            records,
            schema,
            description,
            source,
        })
    }

    /// Where to look for the corrections overlay of `data_path`.
    fn corrections_path_for(&self, data_path: &Path) -> Option<PathBuf> {
        if let Some(ref explicit) = self.config.corrections_path {
            return Some(explicit.clone());
        }
        if !self.config.discover_corrections {
            return None;
        }
        let dir = data_path.parent().unwrap_or_else(|| Path::new("."));
        Some(dir.join(&self.config.corrections_file_name))
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the layout of a dataset document.
pub fn detect_variant(document: &Value) -> SchemaVariant {
    match document {
        Value::Array(items) => flat_variant(items.first()),
        Value::Object(map) => {
            if map.get("dati").map(Value::is_array).unwrap_or(false) {
                return SchemaVariant::Legacy;
            }
            let first = map.values().next();
            if first
                .and_then(Value::as_object)
                .map(|area| area.contains_key("competenze"))
                .unwrap_or(false)
            {
                return SchemaVariant::AreaGenerale;
            }
            match map.values().find_map(Value::as_array) {
                Some(items) => flat_variant(items.first()),
                None => SchemaVariant::Indirizzo,
            }
        }
        _ => SchemaVariant::Indirizzo,
    }
}

fn flat_variant(first: Option<&Value>) -> SchemaVariant {
    let Some(obj) = first.and_then(Value::as_object) else {
        return SchemaVariant::Indirizzo;
    };
    if obj.contains_key("competenzaNum") || obj.contains_key("competenzaTitolo") {
        SchemaVariant::Indirizzo
    } else if obj.contains_key("conoscenza") || obj.contains_key("competenza") {
        SchemaVariant::Legacy
    } else {
        SchemaVariant::Indirizzo
    }
}

/// The record array of a flat document: the document itself, a `dati`
/// wrapper, or the first array-valued field of a named wrapper.
pub(crate) fn flat_items(document: &Value) -> Option<&Vec<Value>> {
    match document {
        Value::Array(items) => Some(items),
        Value::Object(map) => map
            .get("dati")
            .and_then(Value::as_array)
            .or_else(|| map.values().find_map(Value::as_array)),
        _ => None,
    }
}

pub(crate) fn flat_items_mut(document: &mut Value) -> Option<&mut Vec<Value>> {
    match document {
        Value::Array(items) => Some(items),
        Value::Object(map) => {
            if map.get("dati").map(Value::is_array).unwrap_or(false) {
                map.get_mut("dati").and_then(Value::as_array_mut)
            } else {
                map.values_mut().find_map(Value::as_array_mut)
            }
        }
        _ => None,
    }
}

/// Normalize a document according to `schema`.
pub fn normalize(document: &Value, schema: &RecordSchema) -> (Vec<Record>, Option<String>) {
    match schema.variant {
        SchemaVariant::AreaGenerale => normalize_area_generale(document, schema),
        SchemaVariant::Indirizzo | SchemaVariant::Legacy => {
            let Some(items) = flat_items(document) else {
                warn!("dataset has no record array; treating it as empty");
                return (Vec::new(), None);
            };
            let records = items
                .iter()
                .filter_map(|item| match item.as_object() {
                    Some(obj) => Some(normalize_flat(obj, schema)),
                    None => {
                        warn!("skipping non-object record entry");
                        None
                    }
                })
                .collect();
            (records, None)
        }
    }
}

fn normalize_flat(obj: &Map<String, Value>, schema: &RecordSchema) -> Record {
    let fields = &schema.fields;
    let get = |key: &str| obj.get(key);

    let competency_title = text(get(&fields.title)).unwrap_or_default();
    let knowledge_items =
        coerce::knowledge_list(get(&fields.knowledge), &fields.knowledge_name, &fields.knowledge_subjects);

    let mut subjects_involved = distinct(text_list(get(&fields.subjects)));
    if subjects_involved.is_empty() {
        subjects_involved = derive_subjects(&knowledge_items);
    }

    let name = match fields.name_source {
        NameSource::Title => competency_title.clone(),
        NameSource::Knowledge => knowledge_items
            .first()
            .map(|k| k.name.clone())
            .unwrap_or_else(|| competency_title.clone()),
    };

    Record {
        competency_id: coerce::competency_id(get(&fields.competency_id)),
        competency_title,
        intermediate: text(get(&fields.intermediate)).unwrap_or_default(),
        period: text(get(&fields.period)),
        level: text(get(&fields.level)),
        axis: text(get(&fields.axis)),
        abilities: text_list(get(&fields.abilities)),
        knowledge_items,
        subjects_involved,
        name,
    }
}

fn normalize_area_generale(document: &Value, schema: &RecordSchema) -> (Vec<Record>, Option<String>) {
    let fields = &schema.fields;
    let area = document
        .as_object()
        .and_then(|root| root.values().next())
        .and_then(Value::as_object);

    let description = text(field(area, &fields.intermediate));

    let Some(competencies) = field(area, "competenze").and_then(Value::as_array) else {
        warn!("general-area document has no competency list");
        return (Vec::new(), description);
    };

    let mut records = Vec::new();
    for competency in competencies.iter().filter_map(Value::as_object) {
        let competency_id = coerce::competency_id(competency.get(&fields.competency_id));
        let title = text(competency.get(&fields.title)).unwrap_or_default();

        let sections = competency
            .get("assi_culturali")
            .and_then(Value::as_array)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);

        for section in sections {
            let section = section.as_object();
            let axis = text(field(section, &fields.axis)).unwrap_or_else(|| UNSPECIFIED_AXIS.to_string());
            let subjects = schema.subjects_for_axis(&axis).to_vec();

            let knowledge_items: Vec<KnowledgeItem> = text_list(field(section, &fields.knowledge))
                .into_iter()
                .map(|name| KnowledgeItem::new(name).with_subjects(subjects.clone()))
                .collect();

            records.push(Record {
                competency_id: competency_id.clone(),
                competency_title: title.clone(),
                intermediate: String::new(),
                period: None,
                level: None,
                axis: Some(axis),
                abilities: text_list(field(section, &fields.abilities)),
                knowledge_items,
                subjects_involved: subjects,
                name: title.clone(),
            });
        }
    }

    (records, description)
}

fn derive_subjects(items: &[KnowledgeItem]) -> Vec<String> {
    distinct(items.iter().flat_map(|k| k.subjects.iter().cloned()).collect())
}
