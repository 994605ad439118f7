//! Export of the filtered record set.
//!
//! Every format produces an in-memory [`ExportArtifact`]; writing it to disk
//! or sending it over HTTP is up to the caller. Exporting zero records is an
//! error and produces nothing.

mod csv;
mod html;
mod json;

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CurriculaError, Result};
use crate::filter::FilterState;
use crate::input::SourceMetadata;
use crate::pivot::PivotTable;
use crate::schema::Record;

pub use html::escape_html;

/// Separator used when a multi-valued field is flattened into one cell.
pub const LIST_SEPARATOR: &str = " • ";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv,
    Json,
    /// HTML table readable by spreadsheet applications.
    Excel,
    /// HTML work-plan document readable by word processors.
    Word,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Csv,
        ExportFormat::Json,
        ExportFormat::Excel,
        ExportFormat::Word,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xls",
            ExportFormat::Word => "doc",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Json => "application/json;charset=utf-8",
            ExportFormat::Excel => "application/vnd.ms-excel",
            ExportFormat::Word => "application/msword",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "excel",
            ExportFormat::Word => "word",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ExportFormat {
    type Err = CurriculaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "excel" | "xls" => Ok(ExportFormat::Excel),
            "word" | "doc" => Ok(ExportFormat::Word),
            other => Err(CurriculaError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// CSV field delimiter; must be ASCII.
    pub delimiter: char,
    /// Output file name without extension.
    pub file_stem: String,
    /// Append the pivot table to CSV and Excel exports.
    pub include_pivot: bool,
    /// Document heading for HTML exports.
    pub title: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            file_stem: "curricolo".to_string(),
            include_pivot: false,
            title: "Curricolo".to_string(),
        }
    }
}

/// What to export.
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    pub records: &'a [&'a Record],
    pub filters: &'a FilterState,
    /// Pivot table to append when the config asks for it.
    pub pivot: Option<&'a PivotTable>,
    pub source: Option<&'a SourceMetadata>,
    pub description: Option<&'a str>,
}

impl<'a> ExportRequest<'a> {
    pub fn new(records: &'a [&'a Record], filters: &'a FilterState) -> Self {
        Self {
            records,
            filters,
            pivot: None,
            source: None,
            description: None,
        }
    }

    pub fn with_pivot(mut self, pivot: &'a PivotTable) -> Self {
        self.pivot = Some(pivot);
        self
    }

    pub fn with_source(mut self, source: &'a SourceMetadata) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_description(mut self, description: Option<&'a str>) -> Self {
        self.description = description;
        self
    }
}

/// A produced export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Write the artifact to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, &self.bytes).map_err(|e| CurriculaError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Render `request` in `format`.
pub fn export(format: ExportFormat, request: &ExportRequest<'_>, config: &ExportConfig) -> Result<ExportArtifact> {
    if request.records.is_empty() {
        return Err(CurriculaError::EmptyData(
            "there are no records to export".to_string(),
        ));
    }

    let pivot = if config.include_pivot { request.pivot } else { None };

    let bytes = match format {
        ExportFormat::Csv => csv::render(request.records, pivot, config.delimiter)?,
        ExportFormat::Json => json::render(request)?,
        ExportFormat::Excel => html::render_excel(request, pivot, &config.title).into_bytes(),
        ExportFormat::Word => html::render_word(request).into_bytes(),
    };

    debug!(
        format = %format,
        records = request.records.len(),
        bytes = bytes.len(),
        "rendered export"
    );

    Ok(ExportArtifact {
        format,
        file_name: format!("{}.{}", config.file_stem, format.extension()),
        mime_type: format.mime_type(),
        bytes,
    })
}

/// Column headings shared by the tabular exports.
pub(crate) const RECORD_HEADER: [&str; 9] = [
    "Competenza",
    "Titolo",
    "Periodo",
    "Livello",
    "Asse culturale",
    "Competenza intermedia",
    "Abilità",
    "Conoscenze",
    "Insegnamenti",
];

/// One record flattened into the columns of [`RECORD_HEADER`].
pub(crate) fn record_row(record: &Record) -> [String; 9] {
    [
        record.competency_id.label(),
        record.competency_title.clone(),
        record.period.clone().unwrap_or_default(),
        record.level.clone().unwrap_or_default(),
        record.axis.clone().unwrap_or_default(),
        record.intermediate.clone(),
        record.abilities.join(LIST_SEPARATOR),
        record.knowledge_names().join(LIST_SEPARATOR),
        record.subject_labels().join(LIST_SEPARATOR),
    ]
}
