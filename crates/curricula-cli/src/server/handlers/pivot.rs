//! Pivot and detail handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use curricula::{PivotTable, Record};

use crate::server::error::ApiError;
use crate::server::query::ViewQuery;
use crate::server::state::AppState;

/// Get the pivot table of the filtered records.
pub async fn get_pivot(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<PivotTable>, ApiError> {
    let filters = query.filters()?;
    let pivot = query.pivot(state.dashboard.config().pivot)?;
    Ok(Json(state.dashboard.pivot(&filters, &pivot).to_table()))
}

/// Response for the detail endpoint.
#[derive(Serialize)]
pub struct DetailResponse<'a> {
    pub row_value: &'a str,
    pub col_value: &'a str,
    pub total: usize,
    pub records: Vec<&'a Record>,
}

/// Get the records behind one pivot cell.
pub async fn get_detail(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let filters = query.filters()?;
    let pivot = query.pivot(state.dashboard.config().pivot)?;
    let (row_value, col_value) = query.cell()?;

    let records = state.dashboard.detail(&filters, &pivot, row_value, col_value);
    let response = DetailResponse {
        row_value,
        col_value,
        total: records.len(),
        records,
    };
    serde_json::to_value(&response)
        .map(Json)
        .map_err(|e| ApiError::Internal(e.to_string()))
}
