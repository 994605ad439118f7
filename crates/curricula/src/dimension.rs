//! Dimension resolver: the group labels a record contributes to an axis.
//!
//! The same [`resolve`] function feeds the pivot matrix, the detail lookup,
//! the subject filter and record grouping, so all of them agree on bucket
//! membership.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CurriculaError;
use crate::schema::{CompetencyId, Record};

/// Label used when a record has no value for a dimension.
pub const SENTINEL_LABEL: &str = "N/D";

/// A groupable record attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Competency number ("Competenza N").
    Competency,
    /// Competency title.
    Title,
    /// Teaching period.
    Period,
    /// QNQ level ("Livello N").
    Level,
    /// Cultural axis.
    Axis,
    /// Teaching subject (multi-valued).
    Subject,
    /// Knowledge item name (multi-valued).
    Knowledge,
}

impl Dimension {
    /// Every dimension, in menu order.
    pub const ALL: [Dimension; 7] = [
        Dimension::Competency,
        Dimension::Title,
        Dimension::Period,
        Dimension::Level,
        Dimension::Axis,
        Dimension::Subject,
        Dimension::Knowledge,
    ];

    /// Machine name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Competency => "competency",
            Dimension::Title => "title",
            Dimension::Period => "period",
            Dimension::Level => "level",
            Dimension::Axis => "axis",
            Dimension::Subject => "subject",
            Dimension::Knowledge => "knowledge",
        }
    }

    /// Column heading shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Competency => "Competenza",
            Dimension::Title => "Titolo",
            Dimension::Period => "Periodo",
            Dimension::Level => "Livello",
            Dimension::Axis => "Asse culturale",
            Dimension::Subject => "Insegnamento",
            Dimension::Knowledge => "Conoscenza",
        }
    }

    /// Whether one record can resolve to several labels.
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, Dimension::Subject | Dimension::Knowledge)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Dimension {
    type Err = CurriculaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "competency" | "competenza" | "competenzanum" | "numero" => Ok(Dimension::Competency),
            "title" | "titolo" | "competenzatitolo" => Ok(Dimension::Title),
            "period" | "periodo" => Ok(Dimension::Period),
            "level" | "livello" | "livelloqnq" | "qnq" => Ok(Dimension::Level),
            "axis" | "asse" => Ok(Dimension::Axis),
            "subject" | "subjects" | "insegnamento" | "insegnamenti" => Ok(Dimension::Subject),
            "knowledge" | "conoscenza" | "conoscenze" => Ok(Dimension::Knowledge),
            _ => Err(CurriculaError::UnknownDimension(s.to_string())),
        }
    }
}

/// Resolve the labels `record` contributes along `dimension`.
///
/// Never empty: absent or blank values resolve to [`SENTINEL_LABEL`].
/// Multi-valued dimensions return distinct labels in first-seen order.
pub fn resolve(record: &Record, dimension: Dimension) -> Vec<String> {
    let labels: Vec<String> = match dimension {
        Dimension::Competency => match &record.competency_id {
            CompetencyId::Label(s) if s.trim().is_empty() => Vec::new(),
            id => vec![id.label()],
        },
        Dimension::Title => non_blank(Some(&record.competency_title)).into_iter().collect(),
        Dimension::Period => non_blank(record.period.as_ref()).into_iter().collect(),
        Dimension::Level => non_blank(record.level.as_ref())
            .map(level_label)
            .into_iter()
            .collect(),
        Dimension::Axis => non_blank(record.axis.as_ref()).into_iter().collect(),
        Dimension::Subject => record
            .subject_labels()
            .into_iter()
            .map(str::to_string)
            .collect(),
        Dimension::Knowledge => record
            .knowledge_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
    };

    if labels.is_empty() {
        vec![SENTINEL_LABEL.to_string()]
    } else {
        labels
    }
}

/// Whether `record` resolves to `value` along `dimension`.
pub fn has_label(record: &Record, dimension: Dimension, value: &str) -> bool {
    resolve(record, dimension).iter().any(|label| label == value)
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub(crate) fn level_label(level: String) -> String {
    if level.to_lowercase().starts_with("livello") {
        level
    } else {
        format!("Livello {}", level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::KnowledgeItem;

    fn sample() -> Record {
        Record::new(CompetencyId::Number(4), "Comunicare")
            .with_period("primo biennio")
            .with_level("3")
            .with_subjects(["Italiano", "Storia", "Italiano"])
            .with_knowledge(vec![
                KnowledgeItem::new("Lessico"),
                KnowledgeItem::new("Sintassi"),
            ])
    }

    #[test]
    fn test_single_valued() {
        let record = sample();
        assert_eq!(resolve(&record, Dimension::Competency), vec!["Competenza 4"]);
        assert_eq!(resolve(&record, Dimension::Period), vec!["primo biennio"]);
        assert_eq!(resolve(&record, Dimension::Level), vec!["Livello 3"]);
        assert_eq!(resolve(&record, Dimension::Title), vec!["Comunicare"]);
    }

    #[test]
    fn test_multi_valued_is_distinct() {
        let record = sample();
        assert_eq!(resolve(&record, Dimension::Subject), vec!["Italiano", "Storia"]);
        assert_eq!(resolve(&record, Dimension::Knowledge), vec!["Lessico", "Sintassi"]);
    }

    #[test]
    fn test_sentinel_for_missing() {
        let record = Record::new(CompetencyId::Label(String::new()), "");
        for dimension in Dimension::ALL {
            assert_eq!(resolve(&record, dimension), vec![SENTINEL_LABEL]);
        }
    }

    #[test]
    fn test_level_label_not_doubled() {
        let record = Record::new(CompetencyId::Number(1), "t").with_level("Livello 4");
        assert_eq!(resolve(&record, Dimension::Level), vec!["Livello 4"]);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("periodo".parse::<Dimension>().unwrap(), Dimension::Period);
        assert_eq!("Insegnamento".parse::<Dimension>().unwrap(), Dimension::Subject);
        assert_eq!("livello_qnq".parse::<Dimension>().unwrap(), Dimension::Level);
        assert!("colour".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_has_label() {
        let record = sample();
        assert!(has_label(&record, Dimension::Subject, "Storia"));
        assert!(!has_label(&record, Dimension::Subject, "Matematica"));
    }
}
