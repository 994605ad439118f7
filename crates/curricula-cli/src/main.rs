//! Curricula CLI - curriculum dashboard on the command line.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Install the log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let load = cli.load_options();

    let result = match cli.command {
        Commands::Pivot {
            file,
            filters,
            pivot,
            json,
        } => commands::pivot::run(file, &load, filters, pivot, json),

        Commands::Detail {
            file,
            filters,
            pivot,
            row_value,
            col_value,
            json,
        } => commands::detail::run(file, &load, filters, pivot, row_value, col_value, json),

        Commands::List {
            file,
            filters,
            group_by,
            json,
        } => commands::list::run(file, &load, filters, group_by, json),

        Commands::Stats {
            file,
            filters,
            sort,
            json,
        } => commands::stats::run(file, &load, filters, sort, json),

        Commands::Export {
            file,
            filters,
            pivot,
            format,
            output,
            with_pivot,
        } => commands::export::run(file, &load, filters, pivot, format, output, with_pivot),

        Commands::Correct { file, corrections } => commands::correct::run(file, corrections),

        Commands::Serve { file, port } => commands::serve::run(file, &load, port),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
