//! Export download handler.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};

use curricula::ExportFormat;

use crate::server::error::ApiError;
use crate::server::query::ViewQuery;
use crate::server::state::AppState;

/// Download the filtered records in the requested format.
pub async fn export_records(
    State(state): State<AppState>,
    Path(format): Path<String>,
    Query(query): Query<ViewQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let format: ExportFormat = format.parse()?;
    let filters = query.filters()?;
    let pivot = query.pivot(state.dashboard.config().pivot)?;

    let mut config = state.dashboard.config().export.clone();
    if let Some(include) = query.with_pivot {
        config.include_pivot = include;
    }

    let artifact = state.dashboard.export_with(format, &filters, &pivot, &config)?;
    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, artifact.mime_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    ))
}
