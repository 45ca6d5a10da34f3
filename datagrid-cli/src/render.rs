//! Output formats for an evaluated grid.

use std::io::Write;

use datagrid_lib::DataGrid;
use datagrid_lib::GridView;
use datagrid_lib::QueryState;
use datagrid_lib::accessor::resolve;
use datagrid_lib::column::Column;
use datagrid_lib::selection::HeaderCheckbox;
use unicode_width::UnicodeWidthStr;

use crate::args::Format;
use crate::error::CliError;

type JsonRow = serde_json::Value;

/// Writes the view of `state` in the requested format.
///
/// `all` prints every filtered row instead of the current page; the table
/// format always shows one page.
pub fn render<W: Write>(
    out: &mut W,
    grid: &DataGrid<JsonRow>,
    state: &QueryState,
    format: Format,
    all: bool,
) -> Result<(), CliError> {
    let view = grid.evaluate(state);
    let columns: Vec<&Column<JsonRow>> = view
        .visible_columns()
        .iter()
        .filter_map(|id| grid.columns().get(id))
        .collect();
    let rows = if all {
        view.filtered_rows()
    } else {
        view.visible_rows()
    };

    match format {
        Format::Table => write_table(out, &view, state, &columns),
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
            Ok(())
        }
        Format::Csv => write_csv(out, rows, &columns),
    }
}

fn cell(row: &JsonRow, column: &Column<JsonRow>) -> String {
    resolve(row, column).to_string().replace(['\n', '\r'], " ")
}

fn marker(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

fn write_table<W: Write>(
    out: &mut W,
    view: &GridView<'_, JsonRow>,
    state: &QueryState,
    columns: &[&Column<JsonRow>],
) -> Result<(), CliError> {
    let header_marker = match view.header_checkbox() {
        HeaderCheckbox::Checked => "[x]",
        HeaderCheckbox::Indeterminate => "[-]",
        HeaderCheckbox::Unchecked => "[ ]",
    };
    let mut lines: Vec<Vec<String>> = vec![
        std::iter::once(header_marker.to_string())
            .chain(columns.iter().map(|c| c.header_text().to_string()))
            .collect(),
    ];
    for (row, id) in view.visible_rows().iter().zip(view.page_row_ids()) {
        let selected = state.selection().is_selected(id);
        lines.push(
            std::iter::once(marker(selected).to_string())
                .chain(columns.iter().map(|c| cell(row, c)))
                .collect(),
        );
    }

    let mut widths = vec![0; columns.len() + 1];
    for line in &lines {
        for (width, text) in widths.iter_mut().zip(line) {
            *width = (*width).max(text.width());
        }
    }

    for (i, line) in lines.iter().enumerate() {
        let text: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(text, width)| pad(text, *width))
            .collect();
        writeln!(out, "{}", text.join(" | ").trim_end())?;
        if i == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            writeln!(out, "{}", rule.join("-+-"))?;
        }
    }

    let info = view.page_info();
    write!(out, "Showing {}-{} of {}", info.first, info.last, info.total)?;
    if view.page_count() > 1 {
        write!(
            out,
            " (page {} of {})",
            view.pagination().page() + 1,
            view.page_count()
        )?;
    }
    if !state.selection().is_empty() {
        write!(out, ", {} selected", state.selection().len())?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_csv<W: Write>(out: &mut W, rows: &[&JsonRow], columns: &[&Column<JsonRow>]) -> Result<(), CliError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(columns.iter().map(|c| c.header_text()))?;
    for row in rows {
        writer.write_record(columns.iter().map(|c| cell(row, c)))?;
    }
    writer.flush()?;
    Ok(())
}
