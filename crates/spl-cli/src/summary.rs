use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use spl_cli::report::{BatchReport, DocumentReport, EntryStatus};
use spl_validate::Severity;

pub fn print_summary(report: &BatchReport<'_>, show_violations: bool) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Snapshot"),
        header_cell("Document"),
        header_cell("Status"),
        header_cell("Reject"),
        header_cell("Errors"),
        header_cell("Warnings"),
        header_cell("Info"),
        header_cell("Fingerprint"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 3..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for document in &report.documents {
        let completed = document.status == EntryStatus::Completed;
        let count = |severity: Severity, color: Color| {
            if completed {
                count_cell(document.counts.get(severity), color)
            } else {
                dim_cell("-")
            }
        };
        table.add_row(vec![
            Cell::new(document.label),
            document
                .document_id
                .map_or_else(|| dim_cell("-"), Cell::new),
            status_cell(document),
            count(Severity::Reject, Color::Red),
            count(Severity::Error, Color::Red),
            count(Severity::Warning, Color::Yellow),
            count(Severity::Info, Color::Blue),
            document
                .fingerprint
                .map_or_else(|| dim_cell("-"), |hash| dim_cell(short_hash(hash))),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(format!(
            "{} ok, {} failed, {} skipped",
            report.completed, report.failed, report.skipped
        ))
        .add_attribute(Attribute::Bold),
        count_cell(report.totals.reject, Color::Red).add_attribute(Attribute::Bold),
        count_cell(report.totals.error, Color::Red).add_attribute(Attribute::Bold),
        count_cell(report.totals.warning, Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(report.totals.info, Color::Blue).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");

    if show_violations {
        print_violation_table(report);
    }
    for document in &report.documents {
        if let Some(error) = &document.error {
            eprintln!("error: {}: {error}", document.label);
        }
    }
}

fn print_violation_table(report: &BatchReport<'_>) {
    let rows: Vec<(&str, &spl_validate::Violation)> = report
        .documents
        .iter()
        .flat_map(|document| {
            document
                .violations
                .iter()
                .map(move |violation| (document.label, violation))
        })
        .collect();
    if rows.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Snapshot"),
        header_cell("Severity"),
        header_cell("Subject"),
        header_cell("Rule"),
        header_cell("Category"),
        header_cell("Message"),
    ]);
    apply_violation_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for (label, violation) in rows {
        table.add_row(vec![
            Cell::new(label).fg(Color::DarkGrey),
            severity_cell(violation.severity),
            Cell::new(violation.subject.to_string()),
            Cell::new(violation.rule),
            Cell::new(violation.category.label()),
            Cell::new(&violation.message),
        ]);
    }
    println!();
    println!("Violations:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 8 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(4)),
            ColumnConstraint::LowerBoundary(Width::Fixed(12)),
        ]);
    }
}

fn apply_violation_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(200);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Fixed(28)),
            ColumnConstraint::UpperBoundary(Width::Fixed(36)),
            ColumnConstraint::UpperBoundary(Width::Fixed(22)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
        ]);
    }
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(document: &DocumentReport<'_>) -> Cell {
    match document.status {
        EntryStatus::Completed if document.blocked => Cell::new("BLOCKED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        EntryStatus::Completed => Cell::new("OK")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        EntryStatus::Failed => Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        EntryStatus::Skipped => dim_cell("SKIPPED"),
    }
}

pub fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Reject => Cell::new("REJECT")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Error => Cell::new("ERROR").fg(Color::Red),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
        Severity::Info => Cell::new("INFO").fg(Color::Blue),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn short_hash(hash: &str) -> &str {
    hash.get(..12).unwrap_or(hash)
}
