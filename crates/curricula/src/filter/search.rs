use crate::dimension::{resolve, Dimension};
use crate::schema::Record;

/// A parsed free-text query.
///
/// The query is lowercased and split on whitespace. A record matches when
/// every term occurs somewhere in its searchable text; which field holds
/// the term does not matter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    terms: Vec<String>,
}

impl SearchQuery {
    pub fn parse(query: &str) -> Self {
        Self {
            terms: query
                .split_whitespace()
                .map(str::to_lowercase)
                .collect(),
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        if self.terms.is_empty() {
            return true;
        }
        let haystack = searchable_text(record);
        self.terms.iter().all(|term| haystack.contains(term.as_str()))
    }
}

/// Lowercased text searched by [`SearchQuery`]: competency number, title,
/// intermediate description, axis, abilities, knowledge names and subjects.
pub fn searchable_text(record: &Record) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(8);
    parts.push(record.competency_id.to_string());
    parts.push(record.competency_title.clone());
    parts.push(record.intermediate.clone());
    if let Some(axis) = &record.axis {
        parts.push(axis.clone());
    }
    parts.extend(record.abilities.iter().cloned());
    parts.extend(record.knowledge_names().into_iter().map(str::to_string));
    parts.extend(
        resolve(record, Dimension::Subject)
            .into_iter()
            .filter(|s| s != crate::dimension::SENTINEL_LABEL),
    );
    parts.join(" ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CompetencyId, KnowledgeItem};

    fn record() -> Record {
        Record::new(CompetencyId::Number(7), "Gestire le reti")
            .with_abilities(["Configurare router"])
            .with_knowledge(vec![KnowledgeItem::new("Protocolli TCP/IP").with_subjects(["Informatica"])])
    }

    #[test]
    fn test_parse_lowercases_and_splits() {
        let query = SearchQuery::parse("  Reti   TCP ");
        assert_eq!(query.terms(), &["reti", "tcp"]);
    }

    #[test]
    fn test_terms_across_fields() {
        assert!(SearchQuery::parse("router informatica").matches(&record()));
        assert!(SearchQuery::parse("7 reti").matches(&record()));
    }

    #[test]
    fn test_every_term_required() {
        assert!(!SearchQuery::parse("router cucina").matches(&record()));
    }

    #[test]
    fn test_empty_matches_all() {
        assert!(SearchQuery::parse("   ").matches(&record()));
    }
}
