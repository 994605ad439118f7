use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CurriculaError;

/// Ordering of competency groups in summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Competency number ascending.
    #[default]
    #[serde(alias = "numero")]
    Number,
    /// Most cultural axes first.
    #[serde(alias = "assi")]
    Axes,
    /// Most abilities plus knowledge items first.
    #[serde(alias = "ricchezza")]
    Richness,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortMode::Number => "number",
            SortMode::Axes => "axes",
            SortMode::Richness => "richness",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SortMode {
    type Err = CurriculaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "number" | "numero" => Ok(SortMode::Number),
            "axes" | "assi" => Ok(SortMode::Axes),
            "richness" | "ricchezza" => Ok(SortMode::Richness),
            other => Err(CurriculaError::Config(format!("unknown sort mode '{}'", other))),
        }
    }
}

/// The user's current filter selections.
///
/// Every field is optional; an unset field matches every record. Blank
/// strings are treated as unset by the setters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    competency: Option<String>,
    period: Option<String>,
    level: Option<String>,
    axis: Option<String>,
    subject: Option<String>,
    search: String,
    sort: SortMode,
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Blank values deserialized from a query string count as unset.
fn selected(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn competency(&self) -> Option<&str> {
        selected(&self.competency)
    }

    pub fn period(&self) -> Option<&str> {
        selected(&self.period)
    }

    pub fn level(&self) -> Option<&str> {
        selected(&self.level)
    }

    pub fn axis(&self) -> Option<&str> {
        selected(&self.axis)
    }

    pub fn subject(&self) -> Option<&str> {
        selected(&self.subject)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    /// Competency filter: a number ("3") or a full label ("Competenza 3").
    pub fn set_competency(&mut self, value: Option<String>) {
        self.competency = normalize(value);
    }

    pub fn set_period(&mut self, value: Option<String>) {
        self.period = normalize(value);
    }

    pub fn set_level(&mut self, value: Option<String>) {
        self.level = normalize(value);
    }

    pub fn set_axis(&mut self, value: Option<String>) {
        self.axis = normalize(value);
    }

    pub fn set_subject(&mut self, value: Option<String>) {
        self.subject = normalize(value);
    }

    pub fn set_search(&mut self, value: impl Into<String>) {
        self.search = value.into();
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
    }

    pub fn with_competency(mut self, value: impl Into<String>) -> Self {
        self.set_competency(Some(value.into()));
        self
    }

    pub fn with_period(mut self, value: impl Into<String>) -> Self {
        self.set_period(Some(value.into()));
        self
    }

    pub fn with_level(mut self, value: impl Into<String>) -> Self {
        self.set_level(Some(value.into()));
        self
    }

    pub fn with_axis(mut self, value: impl Into<String>) -> Self {
        self.set_axis(Some(value.into()));
        self
    }

    pub fn with_subject(mut self, value: impl Into<String>) -> Self {
        self.set_subject(Some(value.into()));
        self
    }

    pub fn with_search(mut self, value: impl Into<String>) -> Self {
        self.set_search(value);
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Clear every selection, keeping the sort mode at its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when no filter restricts the record set.
    pub fn is_empty(&self) -> bool {
        self.competency().is_none()
            && self.period().is_none()
            && self.level().is_none()
            && self.axis().is_none()
            && self.subject().is_none()
            && self.search.trim().is_empty()
    }

    /// Active selections as `(field, value)` pairs, for export metadata.
    pub fn active(&self) -> Vec<(&'static str, &str)> {
        let mut out = Vec::new();
        let fields = [
            ("competency", self.competency()),
            ("period", self.period()),
            ("level", self.level()),
            ("axis", self.axis()),
            ("subject", self.subject()),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                out.push((name, value));
            }
        }
        if !self.search.trim().is_empty() {
            out.push(("search", self.search.trim()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_unset() {
        let state = FilterState::new().with_period("  ").with_subject("Storia");
        assert_eq!(state.period(), None);
        assert_eq!(state.subject(), Some("Storia"));
        assert!(!state.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut state = FilterState::new()
            .with_competency("3")
            .with_search("rete")
            .with_sort(SortMode::Axes);
        state.reset();
        assert!(state.is_empty());
        assert_eq!(state.sort(), SortMode::Number);
    }

    #[test]
    fn test_deserialize_partial() {
        let state: FilterState =
            serde_json::from_str(r#"{"period": "primo biennio", "sort": "ricchezza"}"#).unwrap();
        assert_eq!(state.period(), Some("primo biennio"));
        assert_eq!(state.sort(), SortMode::Richness);
    }

    #[test]
    fn test_sort_mode_from_str() {
        assert_eq!("assi".parse::<SortMode>().unwrap(), SortMode::Axes);
        assert!("random".parse::<SortMode>().is_err());
    }

    #[test]
    fn test_active() {
        let state = FilterState::new().with_level("2").with_search(" rete ");
        assert_eq!(state.active(), vec![("level", "2"), ("search", "rete")]);
    }
}
