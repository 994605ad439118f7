use tracing::debug;

use crate::dimension::{has_label, Dimension};
use crate::schema::Record;

use super::search::SearchQuery;
use super::state::FilterState;

/// Whether `record` passes every active filter in `state`.
pub fn matches(record: &Record, state: &FilterState) -> bool {
    matches_query(record, state, &SearchQuery::parse(state.search()))
}

fn matches_query(record: &Record, state: &FilterState, query: &SearchQuery) -> bool {
    if let Some(competency) = state.competency() {
        let id = &record.competency_id;
        if id.to_string() != competency && id.label() != competency {
            return false;
        }
    }

    if let Some(period) = state.period() {
        if record.period.as_deref().map(str::trim) != Some(period) {
            return false;
        }
    }

    if let Some(level) = state.level() {
        let raw = record.level.as_deref().map(str::trim);
        if raw != Some(level) && !has_label(record, Dimension::Level, level) {
            return false;
        }
    }

    if let Some(axis) = state.axis() {
        if record.axis.as_deref().map(str::trim) != Some(axis) {
            return false;
        }
    }

    if let Some(subject) = state.subject() {
        if !has_label(record, Dimension::Subject, subject) {
            return false;
        }
    }

    query.matches(record)
}

/// The records passing `state`, in source order.
pub fn apply_filters<'a, I>(records: I, state: &FilterState) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let query = SearchQuery::parse(state.search());
    let filtered: Vec<&Record> = records
        .into_iter()
        .filter(|record| matches_query(record, state, &query))
        .collect();
    debug!(matched = filtered.len(), "applied filters");
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CompetencyId;

    fn records() -> Vec<Record> {
        vec![
            Record::new(CompetencyId::Number(1), "Comunicare")
                .with_period("primo biennio")
                .with_level("2")
                .with_subjects(["Italiano"]),
            Record::new(CompetencyId::Number(2), "Calcolare")
                .with_period("Quinto Anno")
                .with_level("4")
                .with_subjects(["Matematica", "Fisica"]),
        ]
    }

    #[test]
    fn test_empty_state_matches_all() {
        let data = records();
        assert_eq!(apply_filters(&data, &FilterState::new()).len(), 2);
    }

    #[test]
    fn test_competency_number_or_label() {
        let data = records();
        let by_number = FilterState::new().with_competency("2");
        let by_label = FilterState::new().with_competency("Competenza 2");
        assert_eq!(apply_filters(&data, &by_number)[0].competency_title, "Calcolare");
        assert_eq!(apply_filters(&data, &by_label).len(), 1);
    }

    #[test]
    fn test_level_raw_or_label() {
        let data = records();
        assert_eq!(apply_filters(&data, &FilterState::new().with_level("4")).len(), 1);
        assert_eq!(apply_filters(&data, &FilterState::new().with_level("Livello 4")).len(), 1);
    }

    #[test]
    fn test_subject_membership() {
        let data = records();
        let state = FilterState::new().with_subject("Fisica");
        assert_eq!(apply_filters(&data, &state).len(), 1);
    }

    #[test]
    fn test_conjunction() {
        let data = records();
        let state = FilterState::new().with_period("primo biennio").with_subject("Matematica");
        assert!(apply_filters(&data, &state).is_empty());
    }

    #[test]
    fn test_matches_single() {
        let data = records();
        assert!(matches(&data[0], &FilterState::new().with_search("comunicare")));
        assert!(!matches(&data[0], &FilterState::new().with_search("calcolare")));
    }
}
