//! Output formatting and display logic for siteaudit

use serde::Serialize;

use crate::config::Config;
use crate::core::constants::output_formats;
use crate::reporting::{AuditReport, AuditSummary, ReportKind, ReportRow};
use crate::ui::color::{Colors, colorize};

/// JSON document printed by `--format json`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub report: ReportKind,
    pub title: &'a str,
    pub generated_at: String,
    pub summary: &'a AuditSummary,
    pub headers: &'a [&'a str],
    pub rows: &'a [ReportRow],
}

impl<'a> JsonReport<'a> {
    pub fn new(report: &'a AuditReport) -> Self {
        Self {
            report: report.kind,
            title: report.kind.title(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            summary: &report.summary,
            headers: report.headers(),
            rows: &report.rows,
        }
    }
}

/// Display configuration information in a user-friendly format
pub fn display_config_info(config: &Config, page_count: usize) {
    let entries = [
        ("Pages", page_count.to_string()),
        ("Concurrency", config.concurrency().to_string()),
        (
            "Timeout (seconds)",
            config.timeout_duration().as_secs().to_string(),
        ),
        (
            "Proxy",
            config.effective_proxy().unwrap_or("none").to_string(),
        ),
    ];

    for (label, value) in entries {
        println!(
            "{}: {value}",
            colorize(&format!("{}{label}{}", Colors::BOLD, Colors::RESET), Colors::BRIGHT_CYAN)
        );
    }
    println!();
}

/// Render a report in the requested format
pub fn render_report(report: &AuditReport, output_format: &str) -> String {
    match output_format {
        output_formats::MINIMAL => render_minimal(report),
        output_formats::JSON => render_json(report),
        _ => render_text(report),
    }
}

pub fn display_report(report: &AuditReport, output_format: &str) {
    print!("{}", render_report(report, output_format));
}

/// Tab-separated rows, no header or summary
fn render_minimal(report: &AuditReport) -> String {
    report
        .rows
        .iter()
        .map(|row| format!("{}\n", row.cells().join("\t")))
        .collect()
}

fn render_json(report: &AuditReport) -> String {
    match serde_json::to_string_pretty(&JsonReport::new(report)) {
        Ok(json) => format!("{json}\n"),
        Err(e) => format!("{{\"error\": \"{e}\"}}\n"),
    }
}

/// Summary line followed by a column-aligned table
fn render_text(report: &AuditReport) -> String {
    let mut out = String::new();
    out.push_str(&colorize(
        &format!("{}{}{}", Colors::BOLD, report.kind.title(), Colors::RESET),
        Colors::BRIGHT_CYAN,
    ));
    out.push('\n');

    let summary_color = if report.summary.cancelled {
        Colors::BRIGHT_YELLOW
    } else if report.has_matches() {
        Colors::BRIGHT_RED
    } else {
        Colors::BRIGHT_GREEN
    };
    out.push_str(&colorize(&report.summary.text, summary_color));
    out.push('\n');

    if report.rows.is_empty() {
        return out;
    }

    let headers: Vec<String> = report.headers().iter().map(|h| h.to_string()).collect();
    let cells: Vec<Vec<String>> = report.rows.iter().map(ReportRow::cells).collect();
    let widths: Vec<usize> = (0..headers.len())
        .map(|column| {
            std::iter::once(&headers)
                .chain(cells.iter())
                .filter_map(|row| row.get(column))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    out.push('\n');
    out.push_str(&colorize(&format_line(&headers, &widths), Colors::DIM));
    out.push('\n');
    for row in &cells {
        out.push_str(&format_line(row, &widths));
        out.push('\n');
    }
    out
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
