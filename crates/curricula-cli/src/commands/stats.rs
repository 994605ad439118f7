//! Stats command - summary statistics, competency groups and axis overview.

use std::path::PathBuf;

use colored::Colorize;
use curricula::SortMode;

use crate::cli::{FilterArgs, LoadOptions};

use super::open_dashboard;

pub fn run(
    file: PathBuf,
    load: &LoadOptions,
    filters: FilterArgs,
    sort: SortMode,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = open_dashboard(&file, load)?;
    let state = filters.to_state().with_sort(sort);

    let stats = dashboard.stats(&state);
    let groups = dashboard.competency_groups(&state);
    let axes = dashboard.axis_overview(&state);

    if json_output {
        let status = serde_json::json!({
            "file": dashboard.dataset().source.file,
            "variant": dashboard.dataset().source.variant,
            "filters": state,
            "stats": stats,
            "competencies": groups,
            "axes": axes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let source = &dashboard.dataset().source;
    println!(
        "{} {} ({})",
        "Statistics for".cyan().bold(),
        source.file.white(),
        source.variant.label()
    );
    if source.corrected_titles > 0 {
        println!(
            "  {} corrected titles applied",
            source.corrected_titles.to_string().yellow()
        );
    }
    println!();

    println!("{}", "Records:".yellow().bold());
    println!("  Records:      {}", stats.records.to_string().white().bold());
    println!("  Competencies: {}", stats.competencies);
    println!("  Periods:      {}", stats.periods);
    println!("  Levels:       {}", stats.levels);
    println!("  Axes:         {}", stats.axes);
    println!("  Subjects:     {}", stats.subjects);
    println!("  Abilities:    {}", stats.abilities);
    println!("  Knowledge:    {}", stats.knowledge);
    println!();

    println!("{} (by {})", "Competencies:".yellow().bold(), sort);
    for group in &groups {
        println!(
            "  {} {} [{} sections, {} abilities, {} knowledge]",
            group.label.white().bold(),
            group.title,
            group.section_count(),
            group.ability_count,
            group.knowledge_count
        );
    }

    if axes.iter().any(|a| !a.is_unassigned()) {
        println!();
        println!("{}", "Axes:".yellow().bold());
        for axis in &axes {
            println!(
                "  {} {} records, {} competencies, {} abilities, {} knowledge",
                axis.axis.white().bold(),
                axis.records,
                axis.competencies,
                axis.abilities,
                axis.knowledge
            );
            if !axis.subjects.is_empty() {
                println!("    {}", axis.subjects.join(", ").dimmed());
            }
        }
    }

    Ok(())
}
