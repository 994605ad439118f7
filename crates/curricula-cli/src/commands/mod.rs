//! CLI command implementations.

pub mod correct;
pub mod detail;
pub mod export;
pub mod list;
pub mod pivot;
pub mod serve;
pub mod stats;

use std::path::Path;

use curricula::{Dashboard, DashboardConfig, Record};

use crate::cli::LoadOptions;

/// Open a dataset with the configuration and overlay flags applied.
pub fn open_dashboard(file: &Path, options: &LoadOptions) -> Result<Dashboard, Box<dyn std::error::Error>> {
    let mut config = match options.config {
        Some(ref path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };

    if let Some(ref corrections) = options.corrections {
        config.loader.corrections_path = Some(corrections.clone());
    }
    if options.no_corrections {
        config.loader.discover_corrections = false;
        config.loader.corrections_path = None;
    }

    Ok(Dashboard::open_with_config(file, config)?)
}

/// One-line summary of a record for terminal output.
pub fn describe(record: &Record) -> String {
    let mut parts = vec![record.competency_id.label()];
    for value in [&record.period, &record.level, &record.axis].into_iter().flatten() {
        parts.push(value.clone());
    }
    format!("{} - {}", parts.join(" · "), record.competency_title)
}
