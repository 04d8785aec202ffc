//! Text rendering of records and forms for the command line

use comfy_table::{Cell, CellAlignment, Table, TableComponent};

use crate::{ExpenseInput, Record, HEADERS};

/// Renders the records as a table, numbered by their one based position
pub fn records_table(records: &[Record]) -> Table {
    let mut table = Table::new();
    table.remove_style(TableComponent::HorizontalLines);
    table.remove_style(TableComponent::MiddleIntersections);
    table.remove_style(TableComponent::LeftBorderIntersections);
    table.remove_style(TableComponent::RightBorderIntersections);

    let mut header = vec!["#"];
    header.extend(HEADERS);
    table.set_header(header);

    for (position, record) in records.iter().enumerate() {
        table.add_row(vec![
            Cell::new(position + 1).set_alignment(CellAlignment::Right),
            Cell::new(&record.date),
            Cell::new(&record.category),
            Cell::new(&record.description),
            Cell::new(&record.amount).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Renders the content of the entry form, one field per line
pub fn form_text(input: &ExpenseInput) -> String {
    let fields = [&input.date, &input.category, &input.description, &input.amount];
    HEADERS
        .iter()
        .zip(fields)
        .map(|(header, value)| format!("{:<14}{}", format!("{}:", header), value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Explains a stale selection in terms of the one based positions shown to the user
pub fn stale_position(index: usize, len: usize) -> String {
    format!(
        "There is no expense at position {}, only {} expenses exist",
        index.saturating_add(1),
        len,
    )
}
