use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dimension::{resolve, Dimension, SENTINEL_LABEL};
use crate::pivot::locale_cmp;
use crate::schema::Record;

/// Distinct-value counts over a record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub records: usize,
    pub competencies: usize,
    pub periods: usize,
    pub levels: usize,
    pub axes: usize,
    pub subjects: usize,
    pub abilities: usize,
    pub knowledge: usize,
}

impl Stats {
    pub fn compute(records: &[&Record]) -> Self {
        let mut competencies = HashSet::new();
        let mut periods = HashSet::new();
        let mut levels = HashSet::new();
        let mut axes = HashSet::new();
        let mut subjects = HashSet::new();
        let mut abilities = HashSet::new();
        let mut knowledge = HashSet::new();

        for record in records {
            competencies.insert(&record.competency_id);
            if let Some(period) = record.period.as_deref() {
                periods.insert(period.trim());
            }
            if let Some(level) = record.level.as_deref() {
                levels.insert(level.trim());
            }
            if let Some(axis) = record.axis.as_deref() {
                axes.insert(axis.trim());
            }
            subjects.extend(record.subject_labels());
            abilities.extend(record.abilities.iter().map(String::as_str));
            knowledge.extend(record.knowledge_names());
        }

        Self {
            records: records.len(),
            competencies: competencies.len(),
            periods: periods.len(),
            levels: levels.len(),
            axes: axes.len(),
            subjects: subjects.len(),
            abilities: abilities.len(),
            knowledge: knowledge.len(),
        }
    }
}

#[derive(Default)]
struct AxisTally {
    records: usize,
    competencies: HashSet<String>,
    abilities: usize,
    knowledge: usize,
    subjects: Vec<String>,
}

/// Per-axis summary card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisOverview {
    pub axis: String,
    /// Records (competency sections) in this axis.
    pub records: usize,
    pub competencies: usize,
    pub abilities: usize,
    pub knowledge: usize,
    /// Distinct subjects, alphabetical.
    pub subjects: Vec<String>,
}

impl AxisOverview {
    /// One entry per axis, most records first, then by name.
    ///
    /// Records without an axis are grouped under the sentinel label.
    pub fn compute(records: &[&Record]) -> Vec<AxisOverview> {
        let mut by_axis: IndexMap<String, AxisTally> = IndexMap::new();

        for record in records {
            for axis in resolve(record, Dimension::Axis) {
                let tally = by_axis.entry(axis).or_default();
                tally.records += 1;
                tally.competencies.insert(record.competency_id.to_string());
                tally.abilities += record.abilities.len();
                tally.knowledge += record.knowledge_items.len();
                for subject in record.subject_labels() {
                    if !tally.subjects.iter().any(|s| s == subject) {
                        tally.subjects.push(subject.to_string());
                    }
                }
            }
        }

        let mut overview: Vec<AxisOverview> = by_axis
            .into_iter()
            .map(|(axis, mut tally)| {
                tally.subjects.sort_by(|a, b| locale_cmp(a, b));
                AxisOverview {
                    axis,
                    records: tally.records,
                    competencies: tally.competencies.len(),
                    abilities: tally.abilities,
                    knowledge: tally.knowledge,
                    subjects: tally.subjects,
                }
            })
            .collect();

        overview.sort_by(|a, b| {
            b.records
                .cmp(&a.records)
                .then_with(|| locale_cmp(&a.axis, &b.axis))
        });
        overview
    }

    /// True for the bucket of records that have no axis.
    pub fn is_unassigned(&self) -> bool {
        self.axis == SENTINEL_LABEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CompetencyId, KnowledgeItem};

    fn records() -> Vec<Record> {
        vec![
            Record::new(CompetencyId::Number(1), "A")
                .with_axis("Matematico")
                .with_abilities(["a1", "a2"])
                .with_subjects(["Matematica"]),
            Record::new(CompetencyId::Number(1), "A")
                .with_axis("Storico-sociale")
                .with_abilities(["a1"])
                .with_knowledge(vec![KnowledgeItem::new("k1")])
                .with_subjects(["Storia", "Diritto ed economia"]),
            Record::new(CompetencyId::Number(2), "B")
                .with_axis("Storico-sociale")
                .with_knowledge(vec![KnowledgeItem::new("k1"), KnowledgeItem::new("k2")])
                .with_subjects(["Storia"]),
        ]
    }

    #[test]
    fn test_stats_counts_distinct() {
        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let stats = Stats::compute(&refs);
        assert_eq!(stats.records, 3);
        assert_eq!(stats.competencies, 2);
        assert_eq!(stats.axes, 2);
        assert_eq!(stats.abilities, 2);
        assert_eq!(stats.knowledge, 2);
        assert_eq!(stats.subjects, 3);
        assert_eq!(stats.periods, 0);
    }

    #[test]
    fn test_axis_overview_order() {
        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let overview = AxisOverview::compute(&refs);
        assert_eq!(overview[0].axis, "Storico-sociale");
        assert_eq!(overview[0].records, 2);
        assert_eq!(overview[0].competencies, 2);
        assert_eq!(overview[0].knowledge, 3);
        assert_eq!(overview[0].subjects, vec!["Diritto ed economia", "Storia"]);
        assert_eq!(overview[1].axis, "Matematico");
    }

    #[test]
    fn test_empty() {
        assert_eq!(Stats::compute(&[]), Stats::default());
        assert!(AxisOverview::compute(&[]).is_empty());
    }
}
