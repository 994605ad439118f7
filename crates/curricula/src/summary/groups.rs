use std::cmp::Ordering;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::dimension::{resolve, Dimension, SENTINEL_LABEL};
use crate::filter::SortMode;
use crate::pivot::{compare_labels, locale_cmp};
use crate::schema::{CompetencyId, Record};

/// Abilities and knowledge of one competency within one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencySection {
    /// Cultural axis, or the period for datasets without axes.
    pub section: String,
    /// Intermediate competency descriptions.
    pub intermediate: Vec<String>,
    pub abilities: Vec<String>,
    pub knowledge: Vec<String>,
    pub subjects: Vec<String>,
}

/// Everything the filtered set says about one competency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencyGroup {
    pub id: CompetencyId,
    pub label: String,
    pub title: String,
    /// Records contributing to this competency.
    pub record_count: usize,
    pub ability_count: usize,
    pub knowledge_count: usize,
    pub sections: Vec<CompetencySection>,
}

impl CompetencyGroup {
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Abilities plus knowledge items, the "richness" sort key.
    pub fn richness(&self) -> usize {
        self.ability_count + self.knowledge_count
    }
}

fn section_of(record: &Record) -> String {
    record
        .axis
        .as_deref()
        .or(record.period.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(SENTINEL_LABEL)
        .to_string()
}

#[derive(Default)]
struct SectionTally {
    intermediate: IndexSet<String>,
    abilities: IndexSet<String>,
    knowledge: IndexSet<String>,
    subjects: IndexSet<String>,
}

/// Group records by competency and order the groups by `sort`.
pub fn competency_groups(records: &[&Record], sort: SortMode) -> Vec<CompetencyGroup> {
    let mut by_id: IndexMap<&CompetencyId, (CompetencyGroup, IndexMap<String, SectionTally>)> =
        IndexMap::new();

    for &record in records {
        let (group, sections) = by_id.entry(&record.competency_id).or_insert_with(|| {
            (
                CompetencyGroup {
                    id: record.competency_id.clone(),
                    label: competency_label(record),
                    title: record.competency_title.clone(),
                    record_count: 0,
                    ability_count: 0,
                    knowledge_count: 0,
                    sections: Vec::new(),
                },
                IndexMap::new(),
            )
        });

        group.record_count += 1;
        group.ability_count += record.abilities.len();
        group.knowledge_count += record.knowledge_items.len();

        let tally = sections.entry(section_of(record)).or_default();
        if !record.intermediate.trim().is_empty() {
            tally.intermediate.insert(record.intermediate.trim().to_string());
        }
        tally.abilities.extend(record.abilities.iter().cloned());
        tally
            .knowledge
            .extend(record.knowledge_names().into_iter().map(str::to_string));
        tally
            .subjects
            .extend(record.subject_labels().into_iter().map(str::to_string));
    }

    let mut groups: Vec<CompetencyGroup> = by_id
        .into_values()
        .map(|(mut group, sections)| {
            group.sections = sections
                .into_iter()
                .map(|(section, tally)| CompetencySection {
                    section,
                    intermediate: tally.intermediate.into_iter().collect(),
                    abilities: tally.abilities.into_iter().collect(),
                    knowledge: tally.knowledge.into_iter().collect(),
                    subjects: tally.subjects.into_iter().collect(),
                })
                .collect();
            group
        })
        .collect();

    match sort {
        SortMode::Number => groups.sort_by(by_label),
        SortMode::Axes => groups.sort_by(|a, b| {
            b.section_count()
                .cmp(&a.section_count())
                .then_with(|| by_label(a, b))
        }),
        SortMode::Richness => groups.sort_by(|a, b| {
            b.richness()
                .cmp(&a.richness())
                .then_with(|| by_label(a, b))
        }),
    }
    groups
}

/// Pivot row label of the record's competency.
fn competency_label(record: &Record) -> String {
    resolve(record, Dimension::Competency)
        .into_iter()
        .next()
        .unwrap_or_else(|| SENTINEL_LABEL.to_string())
}

/// Same order as competency rows in a pivot.
fn by_label(a: &CompetencyGroup, b: &CompetencyGroup) -> Ordering {
    compare_labels(Dimension::Competency, &a.label, &b.label)
}

/// Records sharing one label of a dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordGroup<'a> {
    pub key: String,
    pub records: Vec<&'a Record>,
}

/// Group records by the labels of `dimension`.
///
/// A record with several labels appears in each of their groups. Groups are
/// ordered with the dimension comparator; records keep input order.
pub fn group_records<'a>(records: &[&'a Record], dimension: Dimension) -> Vec<RecordGroup<'a>> {
    let mut groups: IndexMap<String, Vec<&'a Record>> = IndexMap::new();
    for &record in records {
        for label in resolve(record, dimension) {
            groups.entry(label).or_default().push(record);
        }
    }

    let mut out: Vec<RecordGroup<'a>> = groups
        .into_iter()
        .map(|(key, records)| RecordGroup { key, records })
        .collect();
    out.sort_by(|a, b| compare_labels(dimension, &a.key, &b.key));
    out
}

/// Distinct non-blank values, sorted alphabetically.
pub(crate) fn sorted_distinct<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let set: IndexSet<&str> = values
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect();
    let mut out: Vec<String> = set.into_iter().map(str::to_string).collect();
    out.sort_by(|a, b| locale_cmp(a, b));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::KnowledgeItem;

    fn records() -> Vec<Record> {
        vec![
            Record::new(CompetencyId::Number(2), "Due")
                .with_axis("Matematico")
                .with_abilities(["a"])
                .with_knowledge(vec![KnowledgeItem::new("k")]),
            Record::new(CompetencyId::Number(1), "Uno")
                .with_axis("Matematico")
                .with_abilities(["a", "b", "c"]),
            Record::new(CompetencyId::Number(2), "Due")
                .with_axis("Storico-sociale")
                .with_abilities(["a"]),
        ]
    }

    #[test]
    fn test_groups_by_number() {
        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let groups = competency_groups(&refs, SortMode::Number);
        assert_eq!(groups[0].id, CompetencyId::Number(1));
        assert_eq!(groups[1].section_count(), 2);
        assert_eq!(groups[1].record_count, 2);
        assert_eq!(groups[1].label, "Competenza 2");
    }

    #[test]
    fn test_groups_by_axes() {
        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let groups = competency_groups(&refs, SortMode::Axes);
        assert_eq!(groups[0].id, CompetencyId::Number(2));
    }

    #[test]
    fn test_groups_by_richness_ties_on_number() {
        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let groups = competency_groups(&refs, SortMode::Richness);
        // Both have richness 3; lower number first.
        assert_eq!(groups[0].id, CompetencyId::Number(1));
    }

    #[test]
    fn test_label_ids_follow_pivot_order() {
        let upper = Record::new(CompetencyId::Label("Utilizzare".into()), "U");
        let lower = Record::new(CompetencyId::Label("analizzare".into()), "a");
        let numbered = Record::new(CompetencyId::Number(10), "Dieci");
        let groups = competency_groups(&[&upper, &lower, &numbered], SortMode::Number);

        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Competenza 10", "analizzare", "Utilizzare"]);
        assert_eq!(
            compare_labels(Dimension::Competency, labels[1], labels[2]),
            Ordering::Less
        );
    }

    #[test]
    fn test_blank_id_uses_sentinel_label() {
        let record = Record::new(CompetencyId::default(), "Senza numero");
        let groups = competency_groups(&[&record], SortMode::Number);
        assert_eq!(groups[0].label, SENTINEL_LABEL);
    }

    #[test]
    fn test_section_falls_back_to_period() {
        let record = Record::new(CompetencyId::Number(1), "t").with_period("Quinto Anno");
        let groups = competency_groups(&[&record], SortMode::Number);
        assert_eq!(groups[0].sections[0].section, "Quinto Anno");
    }

    #[test]
    fn test_group_records_fans_out() {
        let a = Record::new(CompetencyId::Number(1), "A").with_subjects(["Storia", "Italiano"]);
        let b = Record::new(CompetencyId::Number(2), "B").with_subjects(["Storia"]);
        let groups = group_records(&[&a, &b], Dimension::Subject);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "Italiano");
        assert_eq!(groups[1].records.len(), 2);
    }

    #[test]
    fn test_sorted_distinct() {
        assert_eq!(
            sorted_distinct(["b", "A", "b", " "]),
            vec!["A", "b"]
        );
    }
}
