//! Label ordering for pivot axes and grouped listings.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dimension::Dimension;

static COMPETENCY_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*competenza\s+(\d+)").expect("valid regex"));

static LEVEL_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*livello\s+(\d+)").expect("valid regex"));

/// Case- and accent-insensitive collation key.
pub fn collation_key(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'ö' | 'õ' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

/// Alphabetic comparison ignoring case and accents.
///
/// Strings with the same key are ordered unaccented first, then lowercase
/// before uppercase, so the order is total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| case_swapped(a).cmp(case_swapped(b)))
}

fn case_swapped(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(|c| {
        let swapped: Vec<char> = if c.is_uppercase() {
            c.to_lowercase().collect()
        } else {
            c.to_uppercase().collect()
        };
        swapped
    })
}

/// The number in a "Competenza N" or "Livello N" label.
pub fn label_number(dimension: Dimension, label: &str) -> Option<u64> {
    let pattern = match dimension {
        Dimension::Competency => &COMPETENCY_NUMBER,
        Dimension::Level => &LEVEL_NUMBER,
        _ => return None,
    };
    pattern
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Compare two labels of `dimension`.
///
/// Competency and level labels compare by their number; labels without a
/// number sort after numbered ones. Everything else uses [`locale_cmp`].
pub fn compare_labels(dimension: Dimension, a: &str, b: &str) -> Ordering {
    match (label_number(dimension, a), label_number(dimension, b)) {
        (Some(na), Some(nb)) => na.cmp(&nb).then_with(|| locale_cmp(a, b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => locale_cmp(a, b),
    }
}

/// Sort labels in place with the comparator for `dimension`.
pub fn sort_labels(dimension: Dimension, labels: &mut [String]) {
    labels.sort_by(|a, b| compare_labels(dimension, a, b));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(dimension: Dimension, labels: &[&str]) -> Vec<String> {
        let mut labels: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
        sort_labels(dimension, &mut labels);
        labels
    }

    #[test]
    fn test_competency_numeric_order() {
        assert_eq!(
            sorted(Dimension::Competency, &["Competenza 2", "Competenza 10", "Competenza 1"]),
            vec!["Competenza 1", "Competenza 2", "Competenza 10"]
        );
    }

    #[test]
    fn test_unparsable_after_parsed() {
        assert_eq!(
            sorted(Dimension::Competency, &["N/D", "Competenza 3", "Altro"]),
            vec!["Competenza 3", "Altro", "N/D"]
        );
    }

    #[test]
    fn test_level_numeric_order() {
        assert_eq!(
            sorted(Dimension::Level, &["Livello 10", "Livello 3"]),
            vec!["Livello 3", "Livello 10"]
        );
    }

    #[test]
    fn test_other_dimensions_are_alphabetic() {
        assert_eq!(
            sorted(Dimension::Period, &["secondo biennio", "Primo biennio", "Quinto Anno"]),
            vec!["Primo biennio", "Quinto Anno", "secondo biennio"]
        );
        // Numbers in other dimensions are not special.
        assert_eq!(
            sorted(Dimension::Title, &["Competenza 2", "Competenza 10"]),
            vec!["Competenza 10", "Competenza 2"]
        );
    }

    #[test]
    fn test_accents_fold() {
        assert_eq!(locale_cmp("Attività", "attivita"), Ordering::Greater);
        assert_eq!(locale_cmp("è", "f"), Ordering::Less);
        assert_eq!(collation_key("Città"), "citta");
    }

    #[test]
    fn test_lowercase_before_uppercase_on_ties() {
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("Storia", "storia"), Ordering::Greater);
        assert_eq!(
            sorted(Dimension::Subject, &["Storia", "italiano", "storia"]),
            vec!["italiano", "storia", "Storia"]
        );
    }
}
