//! List command - grouped record listing with subject focus.

use std::path::PathBuf;

use colored::Colorize;
use curricula::summary::group_records;
use curricula::{Dimension, Record};

use crate::cli::{FilterArgs, LoadOptions};

use super::{describe, open_dashboard};

pub fn run(
    file: PathBuf,
    load: &LoadOptions,
    filters: FilterArgs,
    group_by: Dimension,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = open_dashboard(&file, load)?;
    let state = filters.to_state();

    let visible = dashboard.visible_records(&state);
    let records: Vec<&Record> = visible.iter().map(|r| r.as_ref()).collect();
    let groups = group_records(&records, group_by);

    if json_output {
        let value: Vec<serde_json::Value> = groups
            .iter()
            .map(|g| serde_json::json!({ "key": g.key, "records": g.records }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!(
        "{} {} records in {} groups by {}",
        "Listing".cyan().bold(),
        records.len().to_string().white().bold(),
        groups.len(),
        group_by.label()
    );

    for group in &groups {
        println!();
        println!(
            "{} ({})",
            group.key.yellow().bold(),
            group.records.len()
        );
        for record in &group.records {
            println!("  {}", describe(record));
            let subjects = record.subject_labels();
            if !subjects.is_empty() {
                println!("    {}", subjects.join(", ").dimmed());
            }
        }
    }

    Ok(())
}
