use ::csv::{QuoteStyle, WriterBuilder};

use crate::error::{CurriculaError, Result};
use crate::pivot::PivotTable;
use crate::schema::Record;

use super::{record_row, LIST_SEPARATOR, RECORD_HEADER};

/// Heading of the optional pivot section.
pub const PIVOT_SECTION: &str = "TABELLA PIVOT";

/// Render records (and optionally a pivot table) as CSV with every field quoted.
pub fn render(records: &[&Record], pivot: Option<&PivotTable>, delimiter: char) -> Result<Vec<u8>> {
    if !delimiter.is_ascii() {
        return Err(CurriculaError::Config(format!(
            "CSV delimiter must be ASCII, got '{}'",
            delimiter
        )));
    }

    let mut writer = WriterBuilder::new()
        .delimiter(delimiter as u8)
        .quote_style(QuoteStyle::Always)
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(RECORD_HEADER)?;
    for record in records {
        writer.write_record(record_row(record))?;
    }

    if let Some(table) = pivot {
        writer.write_record([PIVOT_SECTION])?;
        writer.write_record(table.header())?;
        for row in &table.rows {
            let mut line = Vec::with_capacity(row.cells.len() + 2);
            line.push(row.key.clone());
            line.extend(row.cells.iter().map(|c| c.to_text(LIST_SEPARATOR)));
            line.push(row.total.to_string());
            writer.write_record(&line)?;
        }
        let mut totals = Vec::with_capacity(table.col_totals.len() + 2);
        totals.push("Totale".to_string());
        totals.extend(table.col_totals.iter().map(usize::to_string));
        totals.push(table.grand_total.to_string());
        writer.write_record(&totals)?;
    }

    writer
        .into_inner()
        .map_err(|e| CurriculaError::Persistence(format!("Failed to finish CSV: {}", e)))
}
