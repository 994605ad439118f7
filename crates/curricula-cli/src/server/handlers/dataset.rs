//! Dataset, options, records and summary handlers.

use std::borrow::Cow;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use curricula::summary::{AxisOverview, CompetencyGroup, FilterOptions, Stats};
use curricula::{Record, SourceMetadata};

use crate::server::error::ApiError;
use crate::server::query::ViewQuery;
use crate::server::state::AppState;

/// Response describing the loaded dataset.
#[derive(Serialize)]
pub struct DatasetResponse {
    pub source: SourceMetadata,
    pub description: Option<String>,
}

/// Get the dataset's source metadata.
pub async fn get_dataset(State(state): State<AppState>) -> Json<DatasetResponse> {
    let dataset = state.dashboard.dataset();
    Json(DatasetResponse {
        source: dataset.source.clone(),
        description: dataset.description.clone(),
    })
}

/// Get the values offered by each filter control.
pub async fn get_options(State(state): State<AppState>) -> Json<FilterOptions> {
    Json(state.dashboard.filter_options())
}

/// Response for the records endpoint.
#[derive(Serialize)]
pub struct RecordsResponse<'a> {
    pub total: usize,
    pub records: Vec<Cow<'a, Record>>,
}

/// Get the filtered records, focused on the selected subject.
pub async fn get_records(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let filters = query.filters()?;
    let records = state.dashboard.visible_records(&filters);
    let response = RecordsResponse {
        total: records.len(),
        records,
    };
    serde_json::to_value(&response)
        .map(Json)
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// Response for the stats endpoint.
#[derive(Serialize)]
pub struct StatsResponse {
    pub stats: Stats,
    pub competencies: Vec<CompetencyGroup>,
    pub axes: Vec<AxisOverview>,
}

/// Get statistics, competency groups and the axis overview.
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<StatsResponse>, ApiError> {
    let filters = query.filters()?;
    Ok(Json(StatsResponse {
        stats: state.dashboard.stats(&filters),
        competencies: state.dashboard.competency_groups(&filters),
        axes: state.dashboard.axis_overview(&filters),
    }))
}
