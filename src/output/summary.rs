//! Terminal rendering of a result bundle

use comfy_table::Color;
use std::fmt::Write;

use crate::consts::DISPLAY_DATE_FORMAT;
use crate::core::{AggregateRow, DateWindow, FilterMode, ResultBundle, UnboundedReason};
use crate::output::format::{
    NumberFormat, create_styled_table, format_amount, format_number, format_percent,
    header_cell, right_cell, styled_cell, tint,
};

#[derive(Debug, Clone, Copy)]
pub(crate) struct SummaryOptions<'a> {
    pub(crate) use_color: bool,
    pub(crate) number_format: NumberFormat,
    pub(crate) currency: &'a str,
    pub(crate) top: Option<usize>,
    /// Timestamp column name, for the missing-column note
    pub(crate) date_column: &'a str,
}

/// Category rows to display after applying `--top`
pub(crate) fn visible_rows(rows: &[AggregateRow], top: Option<usize>) -> &[AggregateRow] {
    match top {
        Some(n) if n < rows.len() => &rows[..n],
        _ => rows,
    }
}

/// One-line description of what the window covers
pub(crate) fn window_banner(window: &DateWindow) -> String {
    match window {
        DateWindow::Bounded { start, end } => format!(
            "Showing data from {} to {}",
            start.format(DISPLAY_DATE_FORMAT),
            end.format(DISPLAY_DATE_FORMAT)
        ),
        DateWindow::Unbounded(UnboundedReason::AllTime) => "Showing all available data".to_string(),
        DateWindow::Unbounded(UnboundedReason::UnknownPeriod(raw)) => {
            format!("Showing all available data (unrecognized period \"{raw}\")")
        }
    }
}

fn notes(bundle: &ResultBundle, opts: &SummaryOptions<'_>) -> Vec<String> {
    let mut notes = Vec::new();
    let fmt = opts.number_format;
    if bundle.filter.mode == FilterMode::MissingColumn {
        notes.push(format!(
            "No \"{}\" column found; date filter not applied",
            opts.date_column
        ));
    }
    if bundle.filter.outside_window > 0
        && let (Some(earliest), Some(latest)) = (bundle.filter.earliest, bundle.filter.latest)
    {
        notes.push(format!(
            "Dates in the file run from {} to {}",
            earliest.format(DISPLAY_DATE_FORMAT),
            latest.format(DISPLAY_DATE_FORMAT)
        ));
    }
    if bundle.filter.unparsable > 0 {
        notes.push(format!(
            "{} rows with a missing or unreadable date were excluded",
            format_number(bundle.filter.unparsable as u64, fmt)
        ));
    }
    if bundle.skipped_rows > 0 {
        notes.push(format!(
            "{} rows without a category were skipped",
            format_number(bundle.skipped_rows as u64, fmt)
        ));
    }
    if bundle.invalid_amounts > 0 {
        notes.push(format!(
            "{} amounts could not be read and were counted as 0",
            format_number(bundle.invalid_amounts as u64, fmt)
        ));
    }
    notes
}

pub(crate) fn render_summary(bundle: &ResultBundle, opts: &SummaryOptions<'_>) -> String {
    let fmt = opts.number_format;
    let c = opts.use_color;
    let mut out = String::new();

    let _ = writeln!(out, "\n  Transaction Summary: {}", bundle.token.label());
    let _ = writeln!(out, "  {}\n", window_banner(&bundle.window));

    if bundle.table.is_empty() {
        out.push_str("  No data available for the selected time period.\n");
        for note in notes(bundle, opts) {
            let _ = writeln!(out, "  {note}");
        }
        return out;
    }

    let all_rows = bundle.table.rows();
    let shown = visible_rows(all_rows, opts.top);

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Category", c),
        header_cell("Transactions", c),
        header_cell("Total Amount", c),
        header_cell("% of Total", c),
    ]);
    for row in shown {
        table.add_row(vec![
            styled_cell(&row.category, None, false),
            right_cell(&format_number(row.count, fmt), None, false),
            right_cell(
                &format_amount(row.total_amount, opts.currency, fmt),
                tint(c, Color::Green),
                false,
            ),
            right_cell(
                &format_percent(row.share_of(bundle.grand_total), fmt),
                None,
                false,
            ),
        ]);
    }
    table.add_row(vec![
        styled_cell("TOTAL", tint(c, Color::Yellow), true),
        right_cell(
            &format_number(bundle.grand_count, fmt),
            tint(c, Color::Yellow),
            true,
        ),
        right_cell(
            &format_amount(bundle.grand_total, opts.currency, fmt),
            tint(c, Color::Green),
            true,
        ),
        right_cell(&format_percent(100.0, fmt), tint(c, Color::Yellow), true),
    ]);
    let _ = writeln!(out, "{table}");

    if shown.len() < all_rows.len() {
        let _ = writeln!(
            out,
            "  Showing top {} of {} categories",
            shown.len(),
            all_rows.len()
        );
    }

    let average = if bundle.grand_count == 0 {
        0.0
    } else {
        bundle.grand_total / bundle.grand_count as f64
    };
    let _ = writeln!(
        out,
        "\n  {} categories | {} transactions | total {} | average {}",
        format_number(all_rows.len() as u64, fmt),
        format_number(bundle.grand_count, fmt),
        format_amount(bundle.grand_total, opts.currency, fmt),
        format_amount(average, opts.currency, fmt),
    );
    for note in notes(bundle, opts) {
        let _ = writeln!(out, "  {note}");
    }
    out
}
