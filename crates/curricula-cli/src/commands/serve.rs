//! Serve command - expose the dashboard as a JSON API.

use std::path::PathBuf;

use colored::Colorize;

use crate::cli::LoadOptions;
use crate::server::{app, state::AppState};

use super::open_dashboard;

pub fn run(file: PathBuf, load: &LoadOptions, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = open_dashboard(&file, load)?;
    let source = dashboard.dataset().source.clone();
    let state = AppState::new(dashboard);

    let url = format!("http://localhost:{}/api/dataset", port);
    println!();
    println!(
        "{} {}",
        "Starting dashboard API at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  File: {}", file.display());
    println!("  Layout: {}", source.variant.label());
    println!("  Records: {}", source.record_count);
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, port))
}
