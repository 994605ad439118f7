use crate::dimension::{has_label, Dimension};
use crate::schema::Record;

/// Records behind one pivot cell, recomputed from `records`.
///
/// Uses the same label resolution as the matrix, so the result equals
/// the corresponding cell. Unknown values give an empty list.
pub fn detail<'a>(
    records: &[&'a Record],
    row_dimension: Dimension,
    row_value: &str,
    col_dimension: Dimension,
    col_value: &str,
) -> Vec<&'a Record> {
    records
        .iter()
        .copied()
        .filter(|record| {
            has_label(record, row_dimension, row_value) && has_label(record, col_dimension, col_value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pivot::{build_matrix, ValueMode};
    use crate::schema::CompetencyId;

    #[test]
    fn test_detail_matches_cell() {
        let data = vec![
            Record::new(CompetencyId::Number(1), "A").with_period("P1").with_subjects(["X", "Y"]),
            Record::new(CompetencyId::Number(2), "B").with_period("P2").with_subjects(["Y"]),
            Record::new(CompetencyId::Number(3), "C").with_period("P1"),
        ];
        let refs: Vec<&Record> = data.iter().collect();
        let matrix = build_matrix(&refs, Dimension::Subject, Dimension::Period, ValueMode::Count);

        for row in &matrix.row_keys {
            for col in &matrix.col_keys {
                let found = detail(&refs, Dimension::Subject, row, Dimension::Period, col);
                assert_eq!(found.as_slice(), matrix.cell(row, col));
            }
        }
    }

    #[test]
    fn test_unknown_value_is_empty() {
        let data = vec![Record::new(CompetencyId::Number(1), "A").with_period("P1")];
        let refs: Vec<&Record> = data.iter().collect();
        assert!(detail(&refs, Dimension::Period, "P9", Dimension::Competency, "Competenza 1").is_empty());
    }
}
