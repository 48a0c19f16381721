use chrono::NaiveDateTime;
use comfy_table::Color;

use crate::consts::DATE_FORMAT;
use crate::core::{Period, resolve_period};
use crate::output::format::{create_styled_table, header_cell, right_cell, styled_cell, tint};

/// Table of every period and the window it resolves to at `reference`
pub(crate) fn render_periods(reference: NaiveDateTime, use_color: bool) -> String {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Period", use_color),
        header_cell("Name", use_color),
        header_cell("From", use_color),
        header_cell("To", use_color),
        header_cell("Days", use_color),
    ]);

    for period in Period::ALL {
        let window = resolve_period(&period.into(), reference);
        let (from, to) = match window.bounds() {
            Some((start, end)) => (
                start.format(DATE_FORMAT).to_string(),
                end.format(DATE_FORMAT).to_string(),
            ),
            None => ("-".to_string(), "-".to_string()),
        };
        let days = window.days().map_or_else(|| "-".to_string(), |d| d.to_string());
        table.add_row(vec![
            styled_cell(period.label(), tint(use_color, Color::Cyan), false),
            styled_cell(period.slug(), None, false),
            styled_cell(&from, None, false),
            styled_cell(&to, None, false),
            right_cell(&days, None, false),
        ]);
    }

    format!(
        "\n  Periods as of {}\n\n{table}\n",
        reference.date().format(DATE_FORMAT)
    )
}
