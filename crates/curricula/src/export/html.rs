//! HTML documents opened by office suites as spreadsheets or Word files.

use std::fmt::Write as _;

use crate::filter::SortMode;
use crate::pivot::PivotTable;
use crate::summary::{competency_groups, CompetencyGroup};

use super::{record_row, ExportRequest, LIST_SEPARATOR, RECORD_HEADER};

/// Blank line for hand-filled fields.
const PLACEHOLDER: &str = "_____________";

const BOM: char = '\u{FEFF}';

/// Escape text for HTML element content and attribute values.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

fn document(body: &str, style: &str) -> String {
    format!(
        "{}<html><head><meta charset=\"UTF-8\">{}</head><body>{}</body></html>",
        BOM, style, body
    )
}

pub fn render_excel(request: &ExportRequest<'_>, pivot: Option<&PivotTable>, title: &str) -> String {
    let mut body = String::new();
    let _ = write!(body, "<h1>{}</h1>", escape_html(title));
    if let Some(description) = request.description {
        let _ = write!(body, "<p>{}</p>", escape_html(description));
    }
    let active = request.filters.active();
    if !active.is_empty() {
        let filters: Vec<String> = active
            .iter()
            .map(|(name, value)| format!("{}: {}", name, escape_html(value)))
            .collect();
        let _ = write!(body, "<p>Filtri: {}</p>", filters.join("; "));
    }

    body.push_str("<table border=\"1\"><thead><tr>");
    for heading in RECORD_HEADER {
        let _ = write!(body, "<th>{}</th>", escape_html(heading));
    }
    body.push_str("</tr></thead><tbody>");
    for record in request.records {
        body.push_str("<tr>");
        for cell in record_row(record) {
            let _ = write!(body, "<td>{}</td>", escape_html(&cell));
        }
        body.push_str("</tr>");
    }
    body.push_str("</tbody></table>");

    if let Some(table) = pivot {
        body.push_str(&pivot_table(table));
    }

    document(&body, "")
}

fn pivot_table(table: &PivotTable) -> String {
    let mut html = String::from("<h2>Tabella pivot</h2><table border=\"1\"><thead><tr>");
    for heading in table.header() {
        let _ = write!(html, "<th>{}</th>", escape_html(&heading));
    }
    html.push_str("</tr></thead><tbody>");
    for row in &table.rows {
        let _ = write!(html, "<tr><th>{}</th>", escape_html(&row.key));
        for cell in &row.cells {
            let _ = write!(html, "<td>{}</td>", escape_html(&cell.to_text(LIST_SEPARATOR)));
        }
        let _ = write!(html, "<td>{}</td></tr>", row.total);
    }
    html.push_str("<tr><th>Totale</th>");
    for total in &table.col_totals {
        let _ = write!(html, "<td>{}</td>", total);
    }
    let _ = write!(html, "<td>{}</td></tr></tbody></table>", table.grand_total);
    html
}

const WORD_STYLE: &str = "<style>\
body { font-family: \"Times New Roman\", serif; font-size: 12pt; }\
.word-title { text-align: center; font-size: 14pt; font-weight: 600; }\
.word-table { width: 100%; border-collapse: collapse; margin-bottom: 12pt; }\
.word-table td { border: 1px solid #bfbfbf; padding: 6pt; vertical-align: top; }\
.header-cell { text-align: center; font-weight: 700; background: #f2f2f2; }\
.label-cell { width: 32%; font-weight: 600; }\
.word-blank { margin: 4pt 0; }\
.word-footer { margin-top: 32pt; }\
</style>";

/// Work-plan document: general information, methodology and one block
/// per competency in number order.
pub fn render_word(request: &ExportRequest<'_>) -> String {
    let discipline = request
        .filters
        .subject()
        .map(escape_html)
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    let mut body = String::new();
    let _ = write!(body, "<p class=\"word-title\">PIANO DI LAVORO DI {}</p>", discipline);
    body.push_str(&general_info(&discipline));
    body.push_str(&methodology());
    for group in competency_groups(request.records, SortMode::Number) {
        body.push_str(&competency_block(&group));
    }
    body.push_str(
        "<p class=\"word-footer\">Luogo e data __/__/____\
         &nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;Il/La docente</p>",
    );

    document(&body, WORD_STYLE)
}

fn blanks(count: usize) -> String {
    (0..count)
        .map(|_| format!("<p class=\"word-blank\">{}</p>", PLACEHOLDER))
        .collect()
}

fn general_info(discipline: &str) -> String {
    let rows = [
        ("DOCENTE", PLACEHOLDER),
        ("DISCIPLINA", discipline),
        ("CLASSE/SEZIONE", PLACEHOLDER),
        ("ANNO SCOLASTICO", PLACEHOLDER),
        ("ORE SETTIMANALI", PLACEHOLDER),
    ];
    let mut html = String::from(
        "<table class=\"word-table\"><tr><td class=\"header-cell\" colspan=\"2\">INFORMAZIONI GENERALI</td></tr>",
    );
    for (label, value) in rows {
        let _ = write!(
            html,
            "<tr><td class=\"label-cell\">{}</td><td>{}</td></tr>",
            label, value
        );
    }
    html.push_str("</table>");
    html
}

fn methodology() -> String {
    let sections = [
        ("Attività", 4),
        ("Strumenti", 6),
        ("Verifiche", 3),
        ("Criteri e modalità di valutazione", 6),
    ];
    let mut html = String::from(
        "<table class=\"word-table\"><tr><td class=\"header-cell\">METODOLOGIA</td></tr>",
    );
    for (title, lines) in sections {
        let _ = write!(html, "<tr><td><p><b>{}</b></p>{}</td></tr>", title, blanks(lines));
    }
    html.push_str(
        "<tr><td><p><b>Attività di recupero in itinere</b></p><ul><li>Ogni qualvolta si \
         rendesse necessario, si provvederà al recupero delle conoscenze pregresse.</li></ul></td></tr>",
    );
    html.push_str("</table>");
    html
}

fn list_table(title: &str, items: &[String]) -> String {
    let content = if items.is_empty() {
        blanks(3)
    } else {
        let list: String = items
            .iter()
            .map(|item| format!("<li>{}</li>", escape_html(item)))
            .collect();
        format!("<ul>{}</ul>", list)
    };
    format!(
        "<table class=\"word-table\"><tr><td class=\"header-cell\">{}</td></tr><tr><td>{}</td></tr></table>",
        title, content
    )
}

fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.contains(value) {
            out.push(value.clone());
        }
    }
    out
}

fn competency_block(group: &CompetencyGroup) -> String {
    let mut html = list_table(
        "COMPETENZE",
        &[format!("{}: {}", group.label, group.title)],
    );

    let intermediate: Vec<String> = group
        .sections
        .iter()
        .flat_map(|s| s.intermediate.iter().map(move |d| format!("{}: {}", s.section, d)))
        .collect();
    if !intermediate.is_empty() {
        html.push_str(&list_table("COMPETENZE INTERMEDIE", &intermediate));
    }

    let knowledge = distinct(group.sections.iter().flat_map(|s| s.knowledge.iter()));
    if !knowledge.is_empty() {
        html.push_str(&list_table("Conoscenze", &knowledge));
    }
    let abilities = distinct(group.sections.iter().flat_map(|s| s.abilities.iter()));
    if !abilities.is_empty() {
        html.push_str(&list_table("Abilità", &abilities));
    }
    let subjects = distinct(group.sections.iter().flat_map(|s| s.subjects.iter()));
    if !subjects.is_empty() {
        html.push_str(&list_table("Insegnamenti", &subjects));
    }

    html.push_str(
        "<table class=\"word-table\"><tr><td class=\"header-cell\">Periodo</td>\
         <td class=\"header-cell\">Contenuti</td></tr>",
    );
    for section in &group.sections {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape_html(&section.section),
            blanks(3)
        );
    }
    html.push_str("</table>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterState;
    use crate::schema::{CompetencyId, Record};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">R&D 'q'</a>"),
            "&lt;a href=&quot;x&quot;&gt;R&amp;D &#039;q&#039;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_excel_document() {
        let record = Record::new(CompetencyId::Number(1), "<Titolo>");
        let records = [&record];
        let filters = FilterState::new();
        let request = ExportRequest::new(&records, &filters);
        let html = render_excel(&request, None, "Curricolo");
        assert!(html.starts_with('\u{FEFF}'));
        assert!(html.contains("<td>&lt;Titolo&gt;</td>"));
        assert!(!html.contains("<Titolo>"));
    }

    #[test]
    fn test_word_placeholders_and_discipline() {
        let record = Record::new(CompetencyId::Number(2), "Comunicare")
            .with_period("primo biennio")
            .with_intermediate("Leggere testi")
            .with_abilities(["Ascoltare"]);
        let records = [&record];

        let filters = FilterState::new();
        let html = render_word(&ExportRequest::new(&records, &filters));
        assert!(html.contains("INFORMAZIONI GENERALI"));
        assert!(html.contains("PIANO DI LAVORO DI _____________"));
        assert!(html.contains("Competenza 2: Comunicare"));
        assert!(html.contains("primo biennio: Leggere testi"));

        let focused = FilterState::new().with_subject("Storia & Geo");
        let html = render_word(&ExportRequest::new(&records, &focused));
        assert!(html.contains("PIANO DI LAVORO DI Storia &amp; Geo"));
    }
}
