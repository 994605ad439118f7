//! Detail command - drill down into one pivot cell.

use std::path::PathBuf;

use colored::Colorize;

use crate::cli::{FilterArgs, LoadOptions, PivotArgs};

use super::{describe, open_dashboard};

pub fn run(
    file: PathBuf,
    load: &LoadOptions,
    filters: FilterArgs,
    pivot: PivotArgs,
    row_value: String,
    col_value: String,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = open_dashboard(&file, load)?;
    let config = pivot.resolve(dashboard.config().pivot);
    let records = dashboard.detail(&filters.to_state(), &config, &row_value, &col_value);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!(
        "{} {} = {}, {} = {}: {} records",
        "Detail".cyan().bold(),
        config.rows.label(),
        row_value.white().bold(),
        config.cols.label(),
        col_value.white().bold(),
        records.len()
    );
    println!();

    for record in records {
        println!("{}", describe(record).bold());
        if !record.intermediate.is_empty() {
            println!("  {}", record.intermediate.dimmed());
        }
        for ability in &record.abilities {
            println!("  {} {}", "abilità".green(), ability);
        }
        for item in &record.knowledge_items {
            if item.subjects.is_empty() {
                println!("  {} {}", "conoscenza".blue(), item.name);
            } else {
                println!(
                    "  {} {} ({})",
                    "conoscenza".blue(),
                    item.name,
                    item.subjects.join(", ")
                );
            }
        }
    }

    Ok(())
}
