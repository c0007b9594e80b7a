use std::fmt::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::LanguageSummary;

const HEADER: [&str; 4] = [
    "Language",
    "Vacancies found",
    "Vacancies processed",
    "Average salary",
];

fn width(cell: &str) -> usize {
    cell.chars().count()
}

fn border(widths: &[usize], left: char, joint: char, right: char, title: Option<&str>) -> String {
    let mut line = String::new();
    line.push(left);

    let mut title = title.map(|t| t.chars().collect::<Vec<_>>()).unwrap_or_default();
    title.reverse();

    for (index, column) in widths.iter().enumerate() {
        if index > 0 {
            line.push(title.pop().unwrap_or(joint));
        }
        for _ in 0..column + 2 {
            line.push(title.pop().unwrap_or('─'));
        }
    }

    line.push(right);
    line
}

fn row_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("│");
    for (cell, column) in cells.iter().zip(widths) {
        let padding = column - width(cell);
        let _ = write!(line, " {}{} │", cell, " ".repeat(padding));
    }
    line
}

/// Renders rows as a box-drawn table with `title` set into the top border.
pub fn render_table(title: &str, rows: &[LanguageSummary]) -> String {
    let header: Vec<String> = HEADER.iter().map(|cell| cell.to_string()).collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.language.clone(),
                row.vacancies_found.to_string(),
                row.vacancies_processed.to_string(),
                row.average_salary.to_string(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|cell| width(cell)).collect();
    for cells in &body {
        for (column, cell) in widths.iter_mut().zip(cells) {
            *column = (*column).max(width(cell));
        }
    }

    let inner_width = widths.iter().map(|column| column + 3).sum::<usize>() - 1;
    let mut output = String::new();

    // A title wider than the table goes above it instead of into the border.
    let embedded = if width(title) <= inner_width {
        Some(title)
    } else {
        let _ = writeln!(output, "{title}");
        None
    };

    let _ = writeln!(output, "{}", border(&widths, '┌', '┬', '┐', embedded));
    let _ = writeln!(output, "{}", row_line(&header, &widths));
    let _ = writeln!(output, "{}", border(&widths, '├', '┼', '┤', None));
    for cells in &body {
        let _ = writeln!(output, "{}", row_line(cells, &widths));
    }
    let _ = writeln!(output, "{}", border(&widths, '└', '┴', '┘', None));

    output
}

/// Describes the publication window a table covers.
pub fn render_caption(window: Option<(u32, NaiveDate)>) -> String {
    match window {
        Some((period_days, cutoff)) => format!(
            "Vacancies published in the last {} days (since {})",
            period_days, cutoff
        ),
        None => "Vacancies from all publication dates".to_string(),
    }
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    language: &'a str,
    vacancies_found: u64,
    vacancies_processed: u64,
    average_salary: Option<u64>,
}

pub fn write_csv(rows: &[LanguageSummary], path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    for row in rows {
        writer.serialize(CsvRow {
            language: &row.language,
            vacancies_found: row.vacancies_found,
            vacancies_processed: row.vacancies_processed,
            average_salary: row.average_salary.value(),
        })?;
    }

    writer.flush()?;
    Ok(())
}
