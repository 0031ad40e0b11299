//! Markdown rendering of the exhibit list.
//!
//! The table uses `<br>` between paragraphs so that pandoc keeps them in
//! one cell when converting to a word processor document.

use super::ExhibitList;

const COLUMNS: [&str; 5] = ["No.", "ID", "EV", "Description", "Evidentiary Disputes"];

/// Render `list` as a Markdown document.
pub fn render(list: &ExhibitList) -> String {
    let mut out = String::new();

    out.push_str(&format!("**{}**\n\n", list.title()));
    out.push_str(&format!("### {}\n\n", list.heading()));

    let header: Vec<String> = COLUMNS.iter().map(|column| format!("**{column}**")).collect();
    out.push_str(&table_row(&header));
    out.push_str(&table_row(&vec![":---".to_string(); COLUMNS.len()]));

    for row in list.rows() {
        let cells = [
            row.index.to_string(),
            escape_cell(&row.id_mark),
            escape_cell(&row.evidence),
            row.description
                .iter()
                .map(|paragraph| escape_cell(paragraph))
                .collect::<Vec<_>>()
                .join("<br>"),
            escape_cell(&row.disputes),
        ];
        out.push_str(&table_row(&cells));
    }

    out
}

fn table_row(cells: &[String]) -> String {
    format!("| {} |\n", cells.join(" | "))
}

/// Make text safe inside a table cell: pipes escaped, line breaks as
/// `<br>`.
fn escape_cell(text: &str) -> String {
    text.trim_end()
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}
