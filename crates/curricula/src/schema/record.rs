//! Normalized record types shared by every dataset variant.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a competency group.
///
/// Most datasets number their competencies; the legacy flat variant only has
/// the competency text, which then doubles as identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompetencyId {
    /// Numbered competency ("Competenza 3").
    Number(u32),
    /// Free-form label.
    Label(String),
}

impl CompetencyId {
    /// Parse user or file text: integers become `Number`, anything else a `Label`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<u32>() {
            Ok(n) => CompetencyId::Number(n),
            Err(_) => CompetencyId::Label(trimmed.to_string()),
        }
    }

    /// The competency number, if any.
    pub fn number(&self) -> Option<u32> {
        match self {
            CompetencyId::Number(n) => Some(*n),
            CompetencyId::Label(_) => None,
        }
    }

    /// Label used for grouping and display ("Competenza 3").
    pub fn label(&self) -> String {
        match self {
            CompetencyId::Number(n) => format!("Competenza {}", n),
            CompetencyId::Label(s) => s.clone(),
        }
    }
}

impl Default for CompetencyId {
    fn default() -> Self {
        CompetencyId::Label(String::new())
    }
}

impl fmt::Display for CompetencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompetencyId::Number(n) => write!(f, "{}", n),
            CompetencyId::Label(s) => write!(f, "{}", s),
        }
    }
}

/// A named piece of knowledge, tagged with the subjects that teach it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    pub name: String,
    #[serde(default)]
    pub subjects: Vec<String>,
}

impl KnowledgeItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subjects: Vec::new(),
        }
    }

    pub fn with_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subjects = subjects.into_iter().map(Into::into).collect();
        self
    }
}

/// One curriculum record after normalization.
///
/// Records are immutable once a dataset is loaded: filters and pivots only
/// borrow them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Competency this record describes (shared by several records).
    pub competency_id: CompetencyId,
    /// Competency title.
    pub competency_title: String,
    /// Intermediate competency description, empty when absent.
    #[serde(default)]
    pub intermediate: String,
    /// Teaching period ("primo biennio", "Quinto Anno", ...).
    #[serde(default)]
    pub period: Option<String>,
    /// QNQ level.
    #[serde(default)]
    pub level: Option<String>,
    /// Cultural axis.
    #[serde(default)]
    pub axis: Option<String>,
    /// Skills, in source order.
    #[serde(default)]
    pub abilities: Vec<String>,
    /// Knowledge items, in source order.
    #[serde(default)]
    pub knowledge_items: Vec<KnowledgeItem>,
    /// Distinct subjects linked to the record.
    #[serde(default)]
    pub subjects_involved: Vec<String>,
    /// Display name used when listing cell contents.
    #[serde(default)]
    pub name: String,
}

impl Record {
    /// Create a record with just an id and a title.
    pub fn new(competency_id: CompetencyId, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            competency_id,
            name: title.clone(),
            competency_title: title,
            ..Self::default()
        }
    }

    pub fn with_period(mut self, period: impl Into<String>) -> Self {
        self.period = Some(period.into());
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn with_axis(mut self, axis: impl Into<String>) -> Self {
        self.axis = Some(axis.into());
        self
    }

    pub fn with_intermediate(mut self, text: impl Into<String>) -> Self {
        self.intermediate = text.into();
        self
    }

    pub fn with_abilities<I, S>(mut self, abilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abilities = abilities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_knowledge(mut self, items: Vec<KnowledgeItem>) -> Self {
        self.knowledge_items = items;
        self
    }

    pub fn with_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subjects_involved = subjects.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Subjects the record is tagged with.
    ///
    /// Uses `subjects_involved` when present, otherwise the union of the
    /// knowledge items' subjects. Distinct, first-seen order.
    pub fn subject_labels(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        let source: Box<dyn Iterator<Item = &String>> = if self.subjects_involved.is_empty() {
            Box::new(self.knowledge_items.iter().flat_map(|k| k.subjects.iter()))
        } else {
            Box::new(self.subjects_involved.iter())
        };
        for subject in source {
            let subject = subject.trim();
            if !subject.is_empty() && !out.contains(&subject) {
                out.push(subject);
            }
        }
        out
    }

    /// Distinct knowledge item names, first-seen order.
    pub fn knowledge_names(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for item in &self.knowledge_items {
            let name = item.name.trim();
            if !name.is_empty() && !out.contains(&name) {
                out.push(name);
            }
        }
        out
    }

    /// Name shown in list-valued pivot cells.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.competency_title
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competency_id_parse() {
        assert_eq!(CompetencyId::parse(" 7 "), CompetencyId::Number(7));
        assert_eq!(
            CompetencyId::parse("Gestire i servizi"),
            CompetencyId::Label("Gestire i servizi".to_string())
        );
        assert_eq!(CompetencyId::Number(3).label(), "Competenza 3");
    }

    #[test]
    fn test_competency_id_ordering() {
        let mut ids = vec![
            CompetencyId::Label("b".into()),
            CompetencyId::Number(10),
            CompetencyId::Number(2),
        ];
        ids.sort();
        assert_eq!(ids[0], CompetencyId::Number(2));
        assert_eq!(ids[1], CompetencyId::Number(10));
    }

    #[test]
    fn test_subject_labels_fallback_to_knowledge() {
        let record = Record::new(CompetencyId::Number(1), "T").with_knowledge(vec![
            KnowledgeItem::new("a").with_subjects(["Storia", "Italiano"]),
            KnowledgeItem::new("b").with_subjects(["Italiano", " "]),
        ]);
        assert_eq!(record.subject_labels(), vec!["Storia", "Italiano"]);

        let explicit = record.clone().with_subjects(["Matematica"]);
        assert_eq!(explicit.subject_labels(), vec!["Matematica"]);
    }

    #[test]
    fn test_display_name() {
        let record = Record::new(CompetencyId::Number(1), "Titolo");
        assert_eq!(record.display_name(), "Titolo");
        let named = record.with_name("Conoscenza");
        assert_eq!(named.display_name(), "Conoscenza");
    }
}
