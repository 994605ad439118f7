//! Property-based tests for the Curricula engine.
//!
//! These tests use proptest to generate random record sets and verify that
//! filtering and pivoting keep their invariants under all conditions.
//!
//! # Testing Philosophy
//!
//! Property-based tests verify:
//! 1. **No panics**: loading never crashes on any input
//! 2. **Determinism**: the same records and filters give the same matrix
//! 3. **Consistency**: a detail lookup returns exactly its pivot cell
//! 4. **Invariants**: resolution never yields an empty label set
//!
//! # Running Property Tests
//!
//! ```bash
//! # Run all property tests
//! cargo test -p curricula --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p curricula --test property_tests
//! ```

use std::path::Path;

use proptest::prelude::*;

use curricula::{
    apply_filters, build_matrix, detail, resolve, CompetencyId, Dimension, FilterState, KnowledgeItem,
    Loader, Record, ValueMode,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// Labels drawn from a small pool so that records collide in cells.
fn label() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "primo biennio",
        "secondo biennio",
        "Quinto Anno",
        "Storia",
        "Italiano",
        "Matematica",
        "Psicologia",
        "",
        "  ",
    ])
    .prop_map(str::to_string)
}

fn optional_label() -> impl Strategy<Value = Option<String>> {
    prop::option::of(label())
}

fn competency_id() -> impl Strategy<Value = CompetencyId> {
    prop_oneof![
        (1u32..15).prop_map(CompetencyId::Number),
        label().prop_map(CompetencyId::Label),
    ]
}

fn knowledge_item() -> impl Strategy<Value = KnowledgeItem> {
    (label(), prop::collection::vec(label(), 0..3))
        .prop_map(|(name, subjects)| KnowledgeItem::new(name).with_subjects(subjects))
}

fn record() -> impl Strategy<Value = Record> {
    (
        competency_id(),
        "[A-Za-z ]{0,12}",
        optional_label(),
        prop::option::of((1u8..9).prop_map(|n| n.to_string())),
        optional_label(),
        prop::collection::vec("[a-z]{1,6}", 0..3),
        prop::collection::vec(knowledge_item(), 0..3),
        prop::collection::vec(label(), 0..3),
    )
        .prop_map(
            |(id, title, period, level, axis, abilities, knowledge, subjects)| {
                let mut record = Record::new(id, title)
                    .with_abilities(abilities)
                    .with_knowledge(knowledge)
                    .with_subjects(subjects);
                record.period = period;
                record.level = level;
                record.axis = axis;
                record
            },
        )
}

fn records() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(record(), 0..25)
}

fn dimension() -> impl Strategy<Value = Dimension> {
    prop::sample::select(Dimension::ALL.to_vec())
}

fn search_term() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["stor", "ital", "bien", "a", "psico", "quinto", "x"]).prop_map(str::to_string)
}

// =============================================================================
// Resolution
// =============================================================================

proptest! {
    #[test]
    fn resolve_never_empty(record in record(), dim in dimension()) {
        let labels = resolve(&record, dim);
        prop_assert!(!labels.is_empty());
        for label in &labels {
            prop_assert!(!label.trim().is_empty());
        }
    }

    #[test]
    fn resolve_single_valued_has_one_label(record in record(), dim in dimension()) {
        if !dim.is_multi_valued() {
            prop_assert_eq!(resolve(&record, dim).len(), 1);
        }
    }
}

// =============================================================================
// Pivot
// =============================================================================

proptest! {
    #[test]
    fn detail_matches_every_cell(
        records in records(),
        rows in dimension(),
        cols in dimension(),
    ) {
        let all: Vec<&Record> = records.iter().collect();
        let matrix = build_matrix(&all, rows, cols, ValueMode::Count);

        for row in &matrix.row_keys {
            for col in &matrix.col_keys {
                let found = detail(&all, rows, row, cols, col);
                prop_assert_eq!(found.as_slice(), matrix.cell(row, col));
            }
        }
    }

    #[test]
    fn cell_sum_covers_every_record(
        records in records(),
        rows in dimension(),
        cols in dimension(),
    ) {
        let all: Vec<&Record> = records.iter().collect();
        let matrix = build_matrix(&all, rows, cols, ValueMode::Count);
        let total = matrix.grand_total();

        prop_assert!(total >= all.len());
        if !rows.is_multi_valued() && !cols.is_multi_valued() {
            prop_assert_eq!(total, all.len());
        }
        prop_assert_eq!(matrix.row_totals().iter().sum::<usize>(), total);
        prop_assert_eq!(matrix.col_totals().iter().sum::<usize>(), total);
    }

    #[test]
    fn pivot_is_deterministic(
        records in records(),
        rows in dimension(),
        cols in dimension(),
    ) {
        let all: Vec<&Record> = records.iter().collect();
        let first = build_matrix(&all, rows, cols, ValueMode::List);
        let second = build_matrix(&all, rows, cols, ValueMode::List);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn keys_are_distinct(records in records(), rows in dimension(), cols in dimension()) {
        let all: Vec<&Record> = records.iter().collect();
        let matrix = build_matrix(&all, rows, cols, ValueMode::Count);

        let mut row_keys = matrix.row_keys.clone();
        row_keys.dedup();
        prop_assert_eq!(row_keys.len(), matrix.row_keys.len());
        let mut col_keys = matrix.col_keys.clone();
        col_keys.dedup();
        prop_assert_eq!(col_keys.len(), matrix.col_keys.len());
    }
}

// =============================================================================
// Filtering
// =============================================================================

proptest! {
    #[test]
    fn narrowing_filters_never_grows(
        records in records(),
        period in label(),
        subject in label(),
    ) {
        let base = FilterState::new().with_period(period);
        let narrowed = base.clone().with_subject(subject);

        let wide = apply_filters(&records, &base);
        let narrow = apply_filters(&records, &narrowed);

        prop_assert!(narrow.len() <= wide.len());
        for record in &narrow {
            prop_assert!(wide.iter().any(|r| std::ptr::eq(*r, *record)));
        }
    }

    #[test]
    fn search_terms_are_conjunctive(
        records in records(),
        first in search_term(),
        second in search_term(),
    ) {
        let both = apply_filters(&records, &FilterState::new().with_search(format!("{} {}", first, second)));
        let only_first = apply_filters(&records, &FilterState::new().with_search(first));
        let only_second = apply_filters(&records, &FilterState::new().with_search(second));

        let expected: Vec<&Record> = only_first
            .iter()
            .copied()
            .filter(|r| only_second.iter().any(|o| std::ptr::eq(*o, *r)))
            .collect();
        prop_assert_eq!(both, expected);
    }

    #[test]
    fn empty_filter_keeps_everything(records in records()) {
        prop_assert_eq!(apply_filters(&records, &FilterState::new()).len(), records.len());
    }

    #[test]
    fn filters_preserve_source_order(records in records(), term in search_term()) {
        let filtered = apply_filters(&records, &FilterState::new().with_search(term));
        let positions: Vec<usize> = filtered
            .iter()
            .filter_map(|f| records.iter().position(|r| std::ptr::eq(r, *f)))
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

// =============================================================================
// Loading
// =============================================================================

proptest! {
    #[test]
    fn loader_never_panics(input in ".{0,200}") {
        let _ = Loader::new().load_bytes(input.as_bytes(), Path::new("fuzz.json"));
    }

    #[test]
    fn loader_accepts_any_record_array(values in prop::collection::vec(any::<i32>(), 0..10)) {
        let doc = serde_json::to_vec(&values).unwrap();
        let dataset = Loader::new().load_bytes(&doc, Path::new("numbers.json")).unwrap();
        prop_assert!(dataset.is_empty());
    }
}
