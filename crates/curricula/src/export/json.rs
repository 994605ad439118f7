use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::Result;
use crate::schema::Record;

use super::ExportRequest;

#[derive(Serialize)]
struct Envelope<'a> {
    metadata: Metadata<'a>,
    records: &'a [&'a Record],
}

#[derive(Serialize)]
struct Metadata<'a> {
    exported_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    variant: Option<&'static str>,
    record_count: usize,
    filters: IndexMap<&'static str, &'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

pub fn render(request: &ExportRequest<'_>) -> Result<Vec<u8>> {
    let envelope = Envelope {
        metadata: Metadata {
            exported_at: Utc::now(),
            source: request.source.map(|s| s.file.as_str()),
            variant: request.source.map(|s| s.variant.label()),
            record_count: request.records.len(),
            filters: request.filters.active().into_iter().collect(),
            description: request.description,
        },
        records: request.records,
    };
    Ok(serde_json::to_vec_pretty(&envelope)?)
}
