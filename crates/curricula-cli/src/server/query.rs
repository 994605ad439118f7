//! Query-string parameters shared by the API handlers.

use serde::Deserialize;

use curricula::{Dimension, FilterState, PivotConfig, SortMode, ValueMode};

use super::error::ApiError;

/// Filter fields and pivot selectors, all optional.
///
/// Values arrive as text and are parsed with the library's own `FromStr`
/// impls so the API accepts the same names as the CLI.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ViewQuery {
    pub competency: Option<String>,
    pub period: Option<String>,
    pub level: Option<String>,
    pub axis: Option<String>,
    pub subject: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub rows: Option<String>,
    pub cols: Option<String>,
    pub mode: Option<String>,
    pub row_value: Option<String>,
    pub col_value: Option<String>,
    /// Append the pivot table to exports.
    pub with_pivot: Option<bool>,
}

impl ViewQuery {
    pub fn filters(&self) -> Result<FilterState, ApiError> {
        let mut state = FilterState::new();
        state.set_competency(self.competency.clone());
        state.set_period(self.period.clone());
        state.set_level(self.level.clone());
        state.set_axis(self.axis.clone());
        state.set_subject(self.subject.clone());
        state.set_search(self.search.clone().unwrap_or_default());
        if let Some(ref sort) = self.sort {
            state.set_sort(sort.parse::<SortMode>()?);
        }
        Ok(state)
    }

    pub fn pivot(&self, defaults: PivotConfig) -> Result<PivotConfig, ApiError> {
        let rows = match self.rows {
            Some(ref rows) => rows.parse::<Dimension>()?,
            None => defaults.rows,
        };
        let cols = match self.cols {
            Some(ref cols) => cols.parse::<Dimension>()?,
            None => defaults.cols,
        };
        let mode = match self.mode {
            Some(ref mode) => mode.parse::<ValueMode>()?,
            None => defaults.mode,
        };
        Ok(PivotConfig::new(rows, cols, mode))
    }

    /// The selected cell, required by the detail endpoint.
    pub fn cell(&self) -> Result<(&str, &str), ApiError> {
        match (self.row_value.as_deref(), self.col_value.as_deref()) {
            (Some(row), Some(col)) => Ok((row, col)),
            _ => Err(ApiError::BadRequest(
                "row_value and col_value are required".to_string(),
            )),
        }
    }
}
