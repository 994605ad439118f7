//! Main Dashboard struct and public API.

use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dimension::Dimension;
use crate::error::{CurriculaError, Result};
use crate::export::{self, ExportArtifact, ExportConfig, ExportFormat, ExportRequest};
use crate::filter::{apply_filters, focus_on_subject, FilterState};
use crate::input::{Dataset, Loader, LoaderConfig};
use crate::pivot::{build_matrix, detail, PivotMatrix, ValueMode};
use crate::schema::Record;
use crate::summary::{
    competency_groups, group_records, AxisOverview, CompetencyGroup, FilterOptions, RecordGroup, Stats,
};

/// Pivot axis and value selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PivotConfig {
    pub rows: Dimension,
    pub cols: Dimension,
    pub mode: ValueMode,
}

impl Default for PivotConfig {
    fn default() -> Self {
        Self {
            rows: Dimension::Competency,
            cols: Dimension::Period,
            mode: ValueMode::Count,
        }
    }
}

impl PivotConfig {
    pub fn new(rows: Dimension, cols: Dimension, mode: ValueMode) -> Self {
        Self { rows, cols, mode }
    }
}

/// Configuration for a dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Loader configuration.
    pub loader: LoaderConfig,
    /// Default pivot selection.
    pub pivot: PivotConfig,
    /// Export settings.
    pub export: ExportConfig,
}

impl DashboardConfig {
    /// Read a configuration file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CurriculaError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            CurriculaError::Config(format!("invalid config '{}': {}", path.display(), e))
        })
    }
}

/// A loaded dataset plus the operations the dashboard offers on it.
///
/// The dataset is never mutated after loading. Every method takes the
/// caller's filter state and recomputes its result, so one `Dashboard` can
/// serve many independent views.
///
/// # Example
///
/// ```no_run
/// use curricula::{Dashboard, FilterState, PivotConfig};
///
/// let dashboard = Dashboard::open("data.json").unwrap();
/// let filters = FilterState::new().with_period("primo biennio");
/// let matrix = dashboard.pivot(&filters, &PivotConfig::default());
/// println!("Grand total: {}", matrix.grand_total());
/// ```
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Dataset,
    config: DashboardConfig,
}

impl Dashboard {
    /// Wrap an already loaded dataset with default configuration.
    pub fn new(dataset: Dataset) -> Self {
        Self::with_config(dataset, DashboardConfig::default())
    }

    pub fn with_config(dataset: Dataset, config: DashboardConfig) -> Self {
        Self { dataset, config }
    }

    /// Load a dataset file with default configuration.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, DashboardConfig::default())
    }

    /// Load a dataset file using `config.loader`.
    pub fn open_with_config(path: impl AsRef<Path>, config: DashboardConfig) -> Result<Self> {
        let loader = Loader::with_config(config.loader.clone());
        let dataset = loader.load_file(path)?;
        Ok(Self::with_config(dataset, config))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn records(&self) -> &[Record] {
        &self.dataset.records
    }

    /// Records passing `filters`, in source order.
    pub fn filter(&self, filters: &FilterState) -> Vec<&Record> {
        apply_filters(&self.dataset.records, filters)
    }

    /// Filtered records as displayed, focused on the selected subject.
    pub fn visible_records(&self, filters: &FilterState) -> Vec<Cow<'_, Record>> {
        focus_on_subject(&self.filter(filters), filters.subject())
    }

    /// Cross-tabulate the filtered records.
    pub fn pivot(&self, filters: &FilterState, pivot: &PivotConfig) -> PivotMatrix<'_> {
        build_matrix(&self.filter(filters), pivot.rows, pivot.cols, pivot.mode)
    }

    /// Records behind one pivot cell.
    pub fn detail(
        &self,
        filters: &FilterState,
        pivot: &PivotConfig,
        row_value: &str,
        col_value: &str,
    ) -> Vec<&Record> {
        detail(&self.filter(filters), pivot.rows, row_value, pivot.cols, col_value)
    }

    pub fn stats(&self, filters: &FilterState) -> Stats {
        Stats::compute(&self.filter(filters))
    }

    /// Competency groups ordered by the filter state's sort mode.
    pub fn competency_groups(&self, filters: &FilterState) -> Vec<CompetencyGroup> {
        competency_groups(&self.filter(filters), filters.sort())
    }

    pub fn axis_overview(&self, filters: &FilterState) -> Vec<AxisOverview> {
        AxisOverview::compute(&self.filter(filters))
    }

    /// Selector values over the whole dataset.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::compute(&self.dataset.records)
    }

    pub fn group(&self, filters: &FilterState, dimension: Dimension) -> Vec<RecordGroup<'_>> {
        group_records(&self.filter(filters), dimension)
    }

    /// Export the filtered records with the configured export settings.
    pub fn export(
        &self,
        format: ExportFormat,
        filters: &FilterState,
        pivot: &PivotConfig,
    ) -> Result<ExportArtifact> {
        self.export_with(format, filters, pivot, &self.config.export)
    }

    /// Export the filtered records with explicit export settings.
    pub fn export_with(
        &self,
        format: ExportFormat,
        filters: &FilterState,
        pivot: &PivotConfig,
        config: &ExportConfig,
    ) -> Result<ExportArtifact> {
        let records = self.filter(filters);
        let table = config
            .include_pivot
            .then(|| build_matrix(&records, pivot.rows, pivot.cols, pivot.mode).to_table());

        let mut request = ExportRequest::new(&records, filters)
            .with_source(&self.dataset.source)
            .with_description(self.dataset.description.as_deref());
        if let Some(ref table) = table {
            request = request.with_pivot(table);
        }

        export::export(format, &request, config)
    }
}
