//! Fuzz target for filtering and pivoting.
//!
//! Builds records from arbitrary text, then checks that every pivot cell
//! matches its detail lookup.

#![no_main]

use arbitrary::Arbitrary;
use curricula::{
    apply_filters, build_matrix, detail, CompetencyId, Dimension, FilterState, KnowledgeItem, Record,
    ValueMode,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    rows: Vec<(u8, String, Option<String>, Vec<String>)>,
    search: String,
    row_dim: u8,
    col_dim: u8,
}

fuzz_target!(|input: Input| {
    let records: Vec<Record> = input
        .rows
        .into_iter()
        .take(64)
        .map(|(id, title, period, subjects)| {
            let mut record = Record::new(CompetencyId::Number(id as u32), title.clone())
                .with_knowledge(vec![KnowledgeItem::new(title).with_subjects(subjects)]);
            record.period = period;
            record
        })
        .collect();

    let rows = Dimension::ALL[input.row_dim as usize % Dimension::ALL.len()];
    let cols = Dimension::ALL[input.col_dim as usize % Dimension::ALL.len()];

    let filtered = apply_filters(&records, &FilterState::new().with_search(input.search));
    let matrix = build_matrix(&filtered, rows, cols, ValueMode::List);

    for row in &matrix.row_keys {
        for col in &matrix.col_keys {
            assert_eq!(detail(&filtered, rows, row, cols, col).as_slice(), matrix.cell(row, col));
        }
    }
    let _ = matrix.to_table();
});
