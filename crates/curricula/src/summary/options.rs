use std::collections::BTreeMap;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::dimension::{level_label, Dimension};
use crate::pivot::compare_labels;
use crate::schema::{CompetencyId, Record};

use super::groups::sorted_distinct;

/// Longest competency title shown in a selector entry.
pub const OPTION_TITLE_WIDTH: usize = 68;

/// One entry of a selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// Values offered by each filter control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Competencies by number, labelled "Competenza N - title".
    pub competencies: Vec<FilterOption>,
    /// Periods in first-seen order.
    pub periods: Vec<String>,
    pub levels: Vec<String>,
    pub axes: Vec<String>,
    pub subjects: Vec<String>,
}

impl FilterOptions {
    pub fn compute(records: &[Record]) -> Self {
        let mut titles: BTreeMap<&CompetencyId, &str> = BTreeMap::new();
        for record in records {
            titles
                .entry(&record.competency_id)
                .or_insert(record.competency_title.as_str());
        }

        let competencies = titles
            .into_iter()
            .filter(|(id, _)| !id.to_string().trim().is_empty())
            .map(|(id, title)| FilterOption {
                value: id.to_string(),
                label: match id {
                    CompetencyId::Number(_) => {
                        format!("{} - {}", id.label(), shorten(title, OPTION_TITLE_WIDTH))
                    }
                    CompetencyId::Label(_) => shorten(title, OPTION_TITLE_WIDTH),
                },
            })
            .collect();

        let periods: IndexSet<&str> = records
            .iter()
            .filter_map(|r| r.period.as_deref())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        let mut levels = sorted_distinct(records.iter().filter_map(|r| r.level.as_deref()));
        levels.sort_by(|a, b| {
            compare_labels(Dimension::Level, &level_label(a.clone()), &level_label(b.clone()))
        });

        Self {
            competencies,
            periods: periods.into_iter().map(str::to_string).collect(),
            levels,
            axes: sorted_distinct(records.iter().filter_map(|r| r.axis.as_deref())),
            subjects: sorted_distinct(records.iter().flat_map(|r| r.subject_labels())),
        }
    }
}

/// Truncate `text` to `max` characters, ending with "..." when cut.
pub fn shorten(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten() {
        assert_eq!(shorten("breve", 68), "breve");
        let long = "x".repeat(80);
        let cut = shorten(&long, 68);
        assert_eq!(cut.chars().count(), 68);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_options() {
        let records = vec![
            Record::new(CompetencyId::Number(10), "Dieci")
                .with_period("secondo biennio")
                .with_level("10")
                .with_subjects(["Storia"]),
            Record::new(CompetencyId::Number(2), "Due")
                .with_period("primo biennio")
                .with_level("3")
                .with_subjects(["Italiano", "Storia"]),
        ];
        let options = FilterOptions::compute(&records);

        assert_eq!(options.competencies[0].value, "2");
        assert_eq!(options.competencies[0].label, "Competenza 2 - Due");
        assert_eq!(options.periods, vec!["secondo biennio", "primo biennio"]);
        assert_eq!(options.levels, vec!["3", "10"]);
        assert_eq!(options.subjects, vec!["Italiano", "Storia"]);
        assert!(options.axes.is_empty());
    }
}
