use std::time::Instant;

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::dimension::{resolve, Dimension};
use crate::schema::Record;

use super::matrix::{PivotMatrix, ValueMode};
use super::sort::sort_labels;

/// Cross-tabulate `records` by `row_dimension` × `col_dimension`.
///
/// Every record lands in each cell of the product of its row labels and
/// column labels. Keys are sorted with the comparator for their dimension.
/// Cells keep records in input order. An empty input yields an empty matrix.
pub fn build_matrix<'a>(
    records: &[&'a Record],
    row_dimension: Dimension,
    col_dimension: Dimension,
    mode: ValueMode,
) -> PivotMatrix<'a> {
    let started = Instant::now();

    let mut row_set: IndexSet<String> = IndexSet::new();
    let mut col_set: IndexSet<String> = IndexSet::new();
    let mut buckets: IndexMap<(usize, usize), Vec<&'a Record>> = IndexMap::new();

    for &record in records {
        let row_labels = resolve(record, row_dimension);
        let col_labels = resolve(record, col_dimension);

        for row_label in &row_labels {
            let (r, _) = row_set.insert_full(row_label.clone());
            for col_label in &col_labels {
                let (c, _) = col_set.insert_full(col_label.clone());
                buckets.entry((r, c)).or_default().push(record);
            }
        }
    }

    let mut row_keys: Vec<String> = row_set.iter().cloned().collect();
    let mut col_keys: Vec<String> = col_set.iter().cloned().collect();
    sort_labels(row_dimension, &mut row_keys);
    sort_labels(col_dimension, &mut col_keys);

    // Position of each first-seen index after sorting.
    let row_pos: Vec<usize> = row_set
        .iter()
        .map(|k| row_keys.iter().position(|s| s == k).unwrap_or_default())
        .collect();
    let col_pos: Vec<usize> = col_set
        .iter()
        .map(|k| col_keys.iter().position(|s| s == k).unwrap_or_default())
        .collect();

    let mut cells = vec![vec![Vec::new(); col_keys.len()]; row_keys.len()];
    for ((r, c), members) in buckets {
        cells[row_pos[r]][col_pos[c]] = members;
    }

    debug!(
        rows = row_keys.len(),
        cols = col_keys.len(),
        records = records.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "built pivot matrix"
    );

    PivotMatrix {
        row_dimension,
        col_dimension,
        mode,
        row_keys,
        col_keys,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::SENTINEL_LABEL;
    use crate::schema::{CompetencyId, KnowledgeItem};

    fn records() -> Vec<Record> {
        vec![
            Record::new(CompetencyId::Number(1), "A")
                .with_period("P1")
                .with_knowledge(vec![KnowledgeItem::new("k").with_subjects(["X", "Y"])])
                .with_subjects(["X", "Y"]),
            Record::new(CompetencyId::Number(2), "B")
                .with_period("P1")
                .with_subjects(["X"]),
        ]
    }

    #[test]
    fn test_multi_valued_fan_out() {
        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let matrix = build_matrix(&refs, Dimension::Subject, Dimension::Period, ValueMode::Count);

        assert_eq!(matrix.row_keys, vec!["X", "Y"]);
        assert_eq!(matrix.col_keys, vec!["P1"]);
        assert_eq!(matrix.count("X", "P1"), 2);
        assert_eq!(matrix.count("Y", "P1"), 1);
        assert_eq!(matrix.grand_total(), 3);
    }

    #[test]
    fn test_totals_sum_cell_counts() {
        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let matrix = build_matrix(&refs, Dimension::Period, Dimension::Subject, ValueMode::Count);

        // Record 1 sits in both columns of row P1 and is counted twice.
        assert_eq!(matrix.row_totals(), vec![3]);
        assert_eq!(matrix.col_totals(), vec![2, 1]);
    }

    #[test]
    fn test_list_mode_names() {
        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let matrix = build_matrix(&refs, Dimension::Period, Dimension::Period, ValueMode::List);
        assert_eq!(matrix.names_at(0, 0), vec!["A", "B"]);
    }

    #[test]
    fn test_empty_input() {
        let matrix = build_matrix(&[], Dimension::Competency, Dimension::Period, ValueMode::Count);
        assert!(matrix.row_keys.is_empty());
        assert!(matrix.col_keys.is_empty());
        assert_eq!(matrix.grand_total(), 0);
    }

    #[test]
    fn test_missing_dimension_uses_sentinel() {
        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let matrix = build_matrix(&refs, Dimension::Level, Dimension::Period, ValueMode::Count);
        assert_eq!(matrix.row_keys, vec![SENTINEL_LABEL]);
        assert_eq!(matrix.count(SENTINEL_LABEL, "P1"), 2);
    }

    #[test]
    fn test_numeric_row_order() {
        let data: Vec<Record> = [10, 2, 1]
            .into_iter()
            .map(|n| Record::new(CompetencyId::Number(n), "t").with_period("P"))
            .collect();
        let refs: Vec<&Record> = data.iter().collect();
        let matrix = build_matrix(&refs, Dimension::Competency, Dimension::Period, ValueMode::Count);
        assert_eq!(
            matrix.row_keys,
            vec!["Competenza 1", "Competenza 2", "Competenza 10"]
        );
    }
}
