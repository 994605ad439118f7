//! Correct command - rewrite competency titles in a dataset file.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use curricula::input::{detect_variant, save_document};
use curricula::{RecordSchema, TitleCorrections};

pub fn run(file: PathBuf, corrections: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let corrections = TitleCorrections::load(&corrections)?;
    if corrections.is_empty() {
        println!("{}", "No corrections to apply.".yellow());
        return Ok(());
    }

    let contents = fs::read_to_string(&file)
        .map_err(|e| format!("Cannot read {}: {}", file.display(), e))?;
    let mut document: serde_json::Value = serde_json::from_str(&contents)?;

    let schema = RecordSchema::for_variant(detect_variant(&document));
    let changed = corrections.apply_to_document(&mut document, &schema.fields);

    if changed == 0 {
        println!(
            "{} {} already up to date",
            "Unchanged:".yellow(),
            file.display()
        );
        return Ok(());
    }

    save_document(&document, &file)?;
    println!(
        "{} {} titles in {}",
        "Corrected".green().bold(),
        changed.to_string().white().bold(),
        file.display()
    );

    Ok(())
}
