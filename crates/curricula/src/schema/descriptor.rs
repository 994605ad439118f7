//! Record-schema descriptors: one per input dataset variant.
//!
//! The dashboards this engine replaces carried several near-identical copies
//! of the same filter/pivot code, each hard-wired to one JSON layout. Here a
//! single engine works on [`Record`](super::Record) and each layout is
//! described by a [`RecordSchema`]: the JSON field names to read and (for the
//! general area) the fixed axis-to-subject table. Fan-out is a property of the
//! [`Dimension`](crate::Dimension) itself, not of the layout.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Known dataset layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVariant {
    /// Flat array of specialisation ("area di indirizzo") records.
    Indirizzo,
    /// Nested general-area document: competencies × cultural axes.
    AreaGenerale,
    /// Flat `competenza / conoscenza / periodo / insegnamento` rows.
    Legacy,
}

impl SchemaVariant {
    pub fn label(&self) -> &'static str {
        match self {
            SchemaVariant::Indirizzo => "indirizzo",
            SchemaVariant::AreaGenerale => "area-generale",
            SchemaVariant::Legacy => "legacy",
        }
    }
}

/// Which field provides the record's display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSource {
    /// The competency title.
    Title,
    /// The first knowledge item's name.
    Knowledge,
}

/// JSON field names of a flat record layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub competency_id: String,
    pub title: String,
    pub intermediate: String,
    pub period: String,
    pub level: String,
    pub axis: String,
    pub abilities: String,
    pub knowledge: String,
    /// Name key inside a knowledge object.
    pub knowledge_name: String,
    /// Subject list key inside a knowledge object.
    pub knowledge_subjects: String,
    pub subjects: String,
    pub name_source: NameSource,
}

impl FieldNames {
    /// Field names of the specialisation dataset (`data-area-indirizzo.json`).
    pub fn indirizzo() -> Self {
        Self {
            competency_id: "competenzaNum".to_string(),
            title: "competenzaTitolo".to_string(),
            intermediate: "competenzaIntermedia".to_string(),
            period: "periodo".to_string(),
            level: "livelloQNQ".to_string(),
            axis: "asse".to_string(),
            abilities: "abilita".to_string(),
            knowledge: "conoscenze".to_string(),
            knowledge_name: "nome".to_string(),
            knowledge_subjects: "insegnamenti".to_string(),
            subjects: "insegnamentoCoinvolti".to_string(),
            name_source: NameSource::Title,
        }
    }

    /// Field names of the legacy flat rows.
    pub fn legacy() -> Self {
        Self {
            competency_id: "competenza".to_string(),
            title: "competenza".to_string(),
            intermediate: "competenza_completa".to_string(),
            period: "periodo".to_string(),
            level: "livello".to_string(),
            axis: "asse".to_string(),
            abilities: "abilita".to_string(),
            knowledge: "conoscenza".to_string(),
            knowledge_name: "nome".to_string(),
            knowledge_subjects: "insegnamenti".to_string(),
            subjects: "insegnamento".to_string(),
            name_source: NameSource::Knowledge,
        }
    }

    /// Field names of a general-area competency/axis pair.
    pub fn area_generale() -> Self {
        Self {
            competency_id: "numero".to_string(),
            title: "titolo".to_string(),
            intermediate: "descrizione".to_string(),
            period: "periodo".to_string(),
            level: "livello".to_string(),
            axis: "asse".to_string(),
            abilities: "abilita".to_string(),
            knowledge: "conoscenze".to_string(),
            knowledge_name: "nome".to_string(),
            knowledge_subjects: "insegnamenti".to_string(),
            subjects: "insegnamenti".to_string(),
            name_source: NameSource::Title,
        }
    }
}

impl Default for FieldNames {
    fn default() -> Self {
        Self::indirizzo()
    }
}

/// Describes how a dataset variant maps onto [`Record`](super::Record).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSchema {
    pub variant: SchemaVariant,
    pub fields: FieldNames,
    /// Subjects taught within each cultural axis (general area only).
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub axis_subjects: IndexMap<String, Vec<String>>,
}

impl RecordSchema {
    pub fn indirizzo() -> Self {
        Self {
            variant: SchemaVariant::Indirizzo,
            fields: FieldNames::indirizzo(),
            axis_subjects: IndexMap::new(),
        }
    }

    pub fn area_generale() -> Self {
        Self {
            variant: SchemaVariant::AreaGenerale,
            fields: FieldNames::area_generale(),
            axis_subjects: default_axis_subjects(),
        }
    }

    pub fn legacy() -> Self {
        Self {
            variant: SchemaVariant::Legacy,
            fields: FieldNames::legacy(),
            axis_subjects: IndexMap::new(),
        }
    }

    /// Descriptor for a variant.
    pub fn for_variant(variant: SchemaVariant) -> Self {
        match variant {
            SchemaVariant::Indirizzo => Self::indirizzo(),
            SchemaVariant::AreaGenerale => Self::area_generale(),
            SchemaVariant::Legacy => Self::legacy(),
        }
    }

    /// Subjects taught within a cultural axis; empty for unknown axes.
    pub fn subjects_for_axis(&self, axis: &str) -> &[String] {
        self.axis_subjects
            .get(axis.trim())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

/// The axis → subject table used by the general-area curriculum.
///
/// Axis names appear with several spellings across editions of the document,
/// so each spelling has its own entry.
pub fn default_axis_subjects() -> IndexMap<String, Vec<String>> {
    let table: &[(&str, &[&str])] = &[
        ("Asse dei linguaggi", &["Italiano", "Inglese"]),
        ("Linguistico-letterario", &["Italiano", "Inglese"]),
        ("Asse matematico", &["Matematica"]),
        ("Matematico", &["Matematica"]),
        ("Storico sociale", &["Storia", "Geografia", "Diritto ed economia"]),
        ("Storico-sociale", &["Storia", "Geografia", "Diritto ed economia"]),
        ("Scienze motorie", &["Scienze motorie"]),
        ("RC o attività alternative", &["Religione cattolica o attività alternative"]),
        ("IRC o attività alternative", &["Religione cattolica o attività alternative"]),
        ("Scientifico-tecnologico", &["Scienze integrate"]),
        ("Scientifico tecnologico", &["Scienze integrate"]),
    ];

    table
        .iter()
        .map(|(axis, subjects)| {
            (
                axis.to_string(),
                subjects.iter().map(|s| s.to_string()).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_subjects_lookup() {
        let schema = RecordSchema::area_generale();
        assert_eq!(
            schema.subjects_for_axis("Storico-sociale"),
            &["Storia", "Geografia", "Diritto ed economia"]
        );
        assert!(schema.subjects_for_axis("Asse sconosciuto").is_empty());
    }

    #[test]
    fn test_for_variant() {
        for variant in [
            SchemaVariant::Indirizzo,
            SchemaVariant::AreaGenerale,
            SchemaVariant::Legacy,
        ] {
            assert_eq!(RecordSchema::for_variant(variant).variant, variant);
        }
        assert_eq!(
            RecordSchema::legacy().fields.name_source,
            NameSource::Knowledge
        );
    }

    #[test]
    fn test_field_names_partial_deserialize() {
        let fields: FieldNames = serde_json::from_str(r#"{"period": "anno"}"#).unwrap();
        assert_eq!(fields.period, "anno");
        assert_eq!(fields.title, "competenzaTitolo");
    }
}
