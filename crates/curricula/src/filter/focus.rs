use std::borrow::Cow;

use crate::pivot::locale_cmp;
use crate::schema::{KnowledgeItem, Record};

/// Display copies of `records` focused on one subject.
///
/// Each copy keeps only the knowledge items taught in `subject` and lists
/// the subjects of those items with `subject` first. Without a subject the
/// records are borrowed unchanged. The result is for display only and is
/// never fed back into the pivot.
pub fn focus_on_subject<'a>(records: &[&'a Record], subject: Option<&str>) -> Vec<Cow<'a, Record>> {
    let Some(subject) = subject else {
        return records.iter().map(|r| Cow::Borrowed(*r)).collect();
    };

    records
        .iter()
        .map(|record| {
            let relevant: Vec<KnowledgeItem> = record
                .knowledge_items
                .iter()
                .filter(|item| item.subjects.iter().any(|s| s == subject))
                .cloned()
                .collect();

            let mut related: Vec<String> = Vec::new();
            for s in relevant.iter().flat_map(|item| item.subjects.iter()) {
                if !related.contains(s) {
                    related.push(s.clone());
                }
            }

            let mut focused = (*record).clone();
            focused.subjects_involved = order_subjects_by_priority(related, Some(subject));
            focused.knowledge_items = relevant;
            Cow::Owned(focused)
        })
        .collect()
}

/// Sort subjects alphabetically, moving `primary` to the front.
///
/// `primary` is inserted when absent, so a focused list is never empty.
pub fn order_subjects_by_priority(mut subjects: Vec<String>, primary: Option<&str>) -> Vec<String> {
    subjects.sort_by(|a, b| locale_cmp(a, b));
    let Some(primary) = primary else {
        return subjects;
    };
    subjects.retain(|s| s != primary);
    subjects.insert(0, primary.to_string());
    subjects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CompetencyId;

    fn record() -> Record {
        Record::new(CompetencyId::Number(1), "T").with_knowledge(vec![
            KnowledgeItem::new("a").with_subjects(["Storia", "Italiano"]),
            KnowledgeItem::new("b").with_subjects(["Matematica"]),
            KnowledgeItem::new("c").with_subjects(["Storia", "Diritto"]),
        ])
    }

    #[test]
    fn test_order_subjects() {
        let ordered = order_subjects_by_priority(
            vec!["storia".into(), "Italiano".into(), "Diritto".into()],
            Some("Italiano"),
        );
        assert_eq!(ordered, vec!["Italiano", "Diritto", "storia"]);
        assert_eq!(order_subjects_by_priority(Vec::new(), Some("X")), vec!["X"]);
        assert!(order_subjects_by_priority(Vec::new(), None).is_empty());
    }

    #[test]
    fn test_focus_keeps_relevant_knowledge() {
        let original = record();
        let focused = focus_on_subject(&[&original], Some("Storia"));
        let view = &focused[0];
        assert_eq!(view.knowledge_items.len(), 2);
        assert_eq!(view.subjects_involved, vec!["Storia", "Diritto", "Italiano"]);
        assert_eq!(original.knowledge_items.len(), 3);
    }

    #[test]
    fn test_focus_without_matches() {
        let original = record();
        let focused = focus_on_subject(&[&original], Some("Inglese"));
        assert!(focused[0].knowledge_items.is_empty());
        assert_eq!(focused[0].subjects_involved, vec!["Inglese"]);
    }

    #[test]
    fn test_no_subject_borrows() {
        let original = record();
        let focused = focus_on_subject(&[&original], None);
        assert!(matches!(focused[0], Cow::Borrowed(_)));
    }
}
