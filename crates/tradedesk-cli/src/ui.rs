//! Plain-text rendering of the admin views.

use std::fmt::Write;

use tradedesk_admin::{AdminStats, Column, Record};

/// Render the column list: label, type, and a `*` marker on required columns.
pub fn render_columns(columns: &[Column]) -> String {
    let mut out = String::new();
    for column in columns {
        let marker = if column.required { " *" } else { "" };
        let _ = write!(
            out,
            "{:<20} {} ({}){marker}",
            column.key, column.label, column.column_type
        );
        if column.is_select() {
            let _ = write!(out, " [{}]", column.options().join(", "));
        }
        out.push('\n');
    }
    out
}

/// Render records as an aligned table with an ID column followed by the schema
/// columns. Absent and empty values show as `N/A`.
pub fn render_records(columns: &[Column], records: &[&Record], empty_hint: &str) -> String {
    if records.is_empty() {
        return format!("{empty_hint}\n");
    }

    let mut header = vec!["ID".to_string()];
    header.extend(columns.iter().map(|c| c.label.clone()));

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            let mut row = vec![r.id.to_string()];
            row.extend(columns.iter().map(|c| r.display_value(&c.key)));
            row
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

/// Render the dashboard figures.
pub fn render_stats(stats: &AdminStats) -> String {
    format!(
        "Total users:  {}\nActive users: {}\nData columns: {}\n",
        stats.total_users, stats.active_users, stats.columns
    )
}
