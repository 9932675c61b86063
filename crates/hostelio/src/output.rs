//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use chrono::{DateTime, Local, NaiveDate, Utc};
use owo_colors::OwoColorize;
use rust_decimal::Decimal;
use tabled::{Table, Tabled, settings::Style};

use hostelio_core::BookingStatus;
use hostelio_core::receipt::format_amount;

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Booking status, colored by lifecycle stage when enabled.
pub fn paint_status(status: BookingStatus, color: bool) -> String {
    let text = status.to_string();
    if !color {
        return text;
    }
    match status {
        BookingStatus::Active => text.green().to_string(),
        BookingStatus::Completed => text.blue().to_string(),
        BookingStatus::Cancelled => text.red().to_string(),
        BookingStatus::Pending => text.dimmed().to_string(),
    }
}

// ── Value formatting ─────────────────────────────────────────────────

pub fn amount(value: Decimal) -> String {
    format_amount(value)
}

pub fn opt_amount(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".into(), format_amount)
}

pub fn date(value: Option<NaiveDate>) -> String {
    value.map_or_else(|| "-".into(), |d| d.format("%Y-%m-%d").to_string())
}

/// Timestamp in the local time zone, minute precision.
pub fn timestamp(value: DateTime<Utc>) -> String {
    value
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

pub fn opt<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}

/// Days left to pay, as shown next to a booking.
pub fn days_left(days: i64) -> String {
    match days {
        d if d < 0 => format!("overdue {}d", -d),
        0 => "due today".into(),
        d => format!("{d}d"),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted string,
/// since single-item detail views don't use `Tabled` derive.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// `key: value` lines with the keys padded to a common width.
pub fn detail_lines(pairs: &[(&str, String)]) -> String {
    let width = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(k, v)| format!("{k:<width$}  {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

pub fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let out = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    out.expect("serialization should not fail")
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_left_labels() {
        assert_eq!(days_left(12), "12d");
        assert_eq!(days_left(0), "due today");
        assert_eq!(days_left(-3), "overdue 3d");
    }

    #[test]
    fn detail_lines_align_values() {
        let out = detail_lines(&[("ID", "1".into()), ("Status", "paid".into())]);
        assert_eq!(out, "ID      1\nStatus  paid");
    }

    #[test]
    fn status_without_color_is_plain() {
        assert_eq!(paint_status(BookingStatus::Active, false), "active");
    }

    #[test]
    fn plain_list_emits_one_id_per_line() {
        #[derive(serde::Serialize, Tabled)]
        struct Row {
            id: u32,
        }
        let rows = [Row { id: 1 }, Row { id: 2 }];
        let out = render_list(&OutputFormat::Plain, &rows, |r| Row { id: r.id }, |r| r.id.to_string());
        assert_eq!(out, "1\n2");
    }
}
