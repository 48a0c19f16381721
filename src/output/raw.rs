use crate::core::RowSet;
use crate::output::format::{NumberFormat, create_styled_table, format_number, header_cell, styled_cell};

/// The unfiltered input, as loaded
pub(crate) fn render_raw(
    rows: &RowSet,
    limit: usize,
    use_color: bool,
    number_format: NumberFormat,
) -> String {
    if rows.is_empty() {
        return "\n  The file has no data rows.\n".to_string();
    }

    let mut table = create_styled_table();
    table.set_header(
        rows.headers()
            .iter()
            .map(|h| header_cell(h, use_color))
            .collect::<Vec<_>>(),
    );
    for row in rows.rows().iter().take(limit) {
        table.add_row(
            row.cells()
                .iter()
                .map(|cell| styled_cell(cell, None, false))
                .collect::<Vec<_>>(),
        );
    }

    let shown = rows.len().min(limit);
    format!(
        "\n{table}\n\n  Showing {} of {} rows\n",
        format_number(shown as u64, number_format),
        format_number(rows.len() as u64, number_format)
    )
}
