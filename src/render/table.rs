//! Plain-text table rendering with columns chosen per check level.

use crate::modules::catalog::CheckLevel;
use crate::modules::report::ReportRow;

pub fn columns(level: CheckLevel) -> Vec<&'static str> {
    let mut cols = vec!["Title", "Year"];
    if matches!(level, CheckLevel::Season | CheckLevel::Episode) {
        cols.push("Season");
    }
    if level == CheckLevel::Episode {
        cols.push("Episode");
    }
    cols.push("Status");
    cols.push("Matched");
    cols
}

pub fn cells(row: &ReportRow, level: CheckLevel) -> Vec<String> {
    let mut cells = vec![
        row.title.clone(),
        row.year.map(|y| y.to_string()).unwrap_or_default(),
    ];
    if matches!(level, CheckLevel::Season | CheckLevel::Episode) {
        cells.push(row.season.map(|s| s.to_string()).unwrap_or_default());
    }
    if level == CheckLevel::Episode {
        cells.push(row.episode.map(|e| e.to_string()).unwrap_or_default());
    }
    cells.push(row.outcome.status_label());
    cells.push(row.outcome.matched_title().unwrap_or_default().to_string());
    cells
}

pub fn render_table(header: &str, rows: &[ReportRow], level: CheckLevel) -> String {
    let cols = columns(level);
    let table: Vec<Vec<String>> = rows.iter().map(|row| cells(row, level)).collect();

    let mut widths: Vec<usize> = cols.iter().map(|c| c.chars().count()).collect();
    for row in &table {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let format_line = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(header);
    out.push('\n');
    out.push_str(&"-".repeat(header.chars().count()));
    out.push('\n');
    out.push_str(&format_line(
        &cols.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
    ));
    out.push('\n');
    out.push_str(&widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    out.push('\n');
    for row in &table {
        out.push_str(&format_line(row));
        out.push('\n');
    }
    out
}
