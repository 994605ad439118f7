//! Pivot command - print the cross-tabulation of the filtered records.

use std::path::PathBuf;

use colored::Colorize;
use curricula::pivot::{CellValue, PivotTable};
use curricula::ValueMode;

use crate::cli::{FilterArgs, LoadOptions, PivotArgs};

use super::open_dashboard;

pub fn run(
    file: PathBuf,
    load: &LoadOptions,
    filters: FilterArgs,
    pivot: PivotArgs,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = open_dashboard(&file, load)?;
    let config = pivot.resolve(dashboard.config().pivot);
    let state = filters.to_state();
    let table = dashboard.pivot(&state, &config).to_table();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!(
        "{} {} × {}",
        "Pivot".cyan().bold(),
        config.rows.label().white().bold(),
        config.cols.label().white().bold()
    );
    println!();

    if table.rows.is_empty() {
        println!("{}", "No records match the current filters.".yellow());
        return Ok(());
    }

    match config.mode {
        ValueMode::Count => print_counts(&table),
        ValueMode::List => print_lists(&table),
    }

    Ok(())
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, len: usize) -> String {
    let fill = len.saturating_sub(width(text));
    format!("{}{}", text, " ".repeat(fill))
}

fn print_counts(table: &PivotTable) {
    let header = table.header();
    let mut widths: Vec<usize> = header.iter().map(|h| width(h)).collect();
    for row in &table.rows {
        widths[0] = widths[0].max(width(&row.key));
    }
    widths[0] = widths[0].max(width("Totale"));

    let line: Vec<String> = header
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad(h, *w))
        .collect();
    println!("{}", line.join("  ").bold());

    for row in &table.rows {
        let mut line = vec![pad(&row.key, widths[0])];
        for (i, cell) in row.cells.iter().enumerate() {
            let text = match cell {
                CellValue::Count(0) => String::new(),
                other => other.to_text(", "),
            };
            line.push(pad(&text, widths[i + 1]));
        }
        line.push(row.total.to_string());
        println!("{}", line.join("  "));
    }

    let mut totals = vec![pad("Totale", widths[0])];
    for (i, total) in table.col_totals.iter().enumerate() {
        totals.push(pad(&total.to_string(), widths[i + 1]));
    }
    totals.push(table.grand_total.to_string());
    println!("{}", totals.join("  ").yellow());
}

fn print_lists(table: &PivotTable) {
    for row in &table.rows {
        println!("{} ({})", row.key.white().bold(), row.total);
        for (column, cell) in table.columns.iter().zip(&row.cells) {
            if let CellValue::List(names) = cell {
                if names.is_empty() {
                    continue;
                }
                println!("  {}", column.cyan());
                for name in names {
                    println!("    - {}", name);
                }
            }
        }
    }
    println!();
    println!("{} {}", "Totale:".yellow().bold(), table.grand_total);
}
