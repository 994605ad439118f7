//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use curricula::{Dimension, ExportFormat, FilterState, PivotConfig, SortMode, ValueMode};

/// Curricula: explore curriculum competency datasets
#[derive(Parser)]
#[command(name = "curricula")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Dashboard configuration file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Title corrections file to apply on load
    #[arg(long, global = true, value_name = "FILE", conflicts_with = "no_corrections")]
    pub corrections: Option<PathBuf>,

    /// Do not look for a corrections file next to the dataset
    #[arg(long, global = true)]
    pub no_corrections: bool,
}

impl Cli {
    /// Options shared by every command that opens a dataset.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config: self.config.clone(),
            corrections: self.corrections.clone(),
            no_corrections: self.no_corrections,
        }
    }
}

/// How to open a dataset.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub config: Option<PathBuf>,
    pub corrections: Option<PathBuf>,
    pub no_corrections: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cross-tabulate records along two dimensions
    Pivot {
        /// Path to the dataset file (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        pivot: PivotArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the records behind one pivot cell
    Detail {
        /// Path to the dataset file (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        pivot: PivotArgs,

        /// Row label of the cell
        #[arg(long)]
        row_value: String,

        /// Column label of the cell
        #[arg(long)]
        col_value: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List filtered records grouped by a dimension
    List {
        /// Path to the dataset file (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// Dimension to group by
        #[arg(short, long, default_value = "competency")]
        group_by: Dimension,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show statistics, competency summary and axis overview
    Stats {
        /// Path to the dataset file (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// Competency order (number, axes, richness)
        #[arg(long, default_value = "number")]
        sort: SortMode,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export filtered records
    Export {
        /// Path to the dataset file (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        pivot: PivotArgs,

        /// Output format (csv, json, excel, word)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// Output path (default: <stem>.<ext> in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Append the pivot table
        #[arg(long)]
        with_pivot: bool,
    },

    /// Rewrite competency titles in a dataset file
    Correct {
        /// Path to the dataset file (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Corrections file: list of {competenzaNum, titoloCorretto} or a number → title map
        #[arg(value_name = "CORRECTIONS")]
        corrections: PathBuf,
    },

    /// Serve the dashboard as a read-only JSON API
    Serve {
        /// Path to the dataset file (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Port for web server
        #[arg(short, long, default_value = "3142")]
        port: u16,
    },
}

/// Filter flags shared by the query commands.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Competency number or label
    #[arg(long)]
    pub competency: Option<String>,

    /// Teaching period
    #[arg(long)]
    pub period: Option<String>,

    /// QNQ level
    #[arg(long)]
    pub level: Option<String>,

    /// Cultural axis
    #[arg(long)]
    pub axis: Option<String>,

    /// Teaching subject (also focuses the listing on it)
    #[arg(long)]
    pub subject: Option<String>,

    /// Free-text search; every word must match
    #[arg(short, long)]
    pub search: Option<String>,
}

impl FilterArgs {
    pub fn to_state(&self) -> FilterState {
        let mut state = FilterState::new();
        state.set_competency(self.competency.clone());
        state.set_period(self.period.clone());
        state.set_level(self.level.clone());
        state.set_axis(self.axis.clone());
        state.set_subject(self.subject.clone());
        state.set_search(self.search.clone().unwrap_or_default());
        state
    }
}

/// Pivot selectors. Unset values fall back to the configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct PivotArgs {
    /// Row dimension
    #[arg(long)]
    pub rows: Option<Dimension>,

    /// Column dimension
    #[arg(long)]
    pub cols: Option<Dimension>,

    /// Cell values (count, list)
    #[arg(long)]
    pub mode: Option<ValueMode>,
}

impl PivotArgs {
    pub fn resolve(&self, defaults: PivotConfig) -> PivotConfig {
        PivotConfig::new(
            self.rows.unwrap_or(defaults.rows),
            self.cols.unwrap_or(defaults.cols),
            self.mode.unwrap_or(defaults.mode),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pivot_command() {
        let cli = Cli::parse_from([
            "curricula", "pivot", "data.json", "--rows", "periodo", "--cols", "subject", "--subject",
            "Storia", "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Pivot { filters, pivot, .. } => {
                let config = pivot.resolve(PivotConfig::default());
                assert_eq!(config.rows, Dimension::Period);
                assert_eq!(config.cols, Dimension::Subject);
                assert_eq!(config.mode, ValueMode::Count);
                assert_eq!(filters.to_state().subject(), Some("Storia"));
            }
            _ => panic!("expected pivot command"),
        }
    }

    #[test]
    fn test_unknown_dimension_rejected() {
        let result = Cli::try_parse_from(["curricula", "pivot", "data.json", "--rows", "colour"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_corrections_flags_conflict() {
        let result = Cli::try_parse_from([
            "curricula", "stats", "data.json", "--corrections", "c.json", "--no-corrections",
        ]);
        assert!(result.is_err());
    }
}
