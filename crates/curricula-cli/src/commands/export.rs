//! Export command - write the filtered records to a file.

use std::path::PathBuf;

use colored::Colorize;
use curricula::ExportFormat;

use crate::cli::{FilterArgs, LoadOptions, PivotArgs};

use super::open_dashboard;

pub fn run(
    file: PathBuf,
    load: &LoadOptions,
    filters: FilterArgs,
    pivot: PivotArgs,
    format: ExportFormat,
    output: Option<PathBuf>,
    with_pivot: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = open_dashboard(&file, load)?;
    let config = pivot.resolve(dashboard.config().pivot);
    let state = filters.to_state();

    let mut export_config = dashboard.config().export.clone();
    export_config.include_pivot |= with_pivot;

    let artifact = dashboard.export_with(format, &state, &config, &export_config)?;
    let output_path = output.unwrap_or_else(|| PathBuf::from(&artifact.file_name));
    artifact.write_to(&output_path)?;

    println!(
        "{} {} records as {} to {}",
        "Exported".green().bold(),
        dashboard.filter(&state).len(),
        format,
        output_path.display().to_string().white()
    );

    Ok(())
}
