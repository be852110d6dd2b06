use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use prepaid_cli::pipeline::{ConvertOutcome, ConvertReport, InspectReport};
use prepaid_engine::RunStatus;
use prepaid_model::{PendingCorrection, ValidationWarning};

pub fn print_convert(report: &ConvertReport) {
    println!("Input: {} rows x {} columns", report.rows, report.columns);
    print_warnings(&report.warnings);
    match &report.outcome {
        ConvertOutcome::Written { output, orders } => {
            println!("Output: {} ({orders} orders)", output.display());
        }
        ConvertOutcome::NeedsNames { template, pending } => {
            print_pending(pending);
            println!();
            println!("Product names are missing; no output was written.");
            println!("Fill in the name column of {} and rerun with --names.", template.display());
        }
    }
}

pub fn print_inspect(input: &Path, report: &InspectReport) {
    println!("Input: {}", input.display());
    println!("Shape: {} rows x {} columns", report.rows, report.columns);
    println!("Status: {}", status_label(&report.status));
    print_warnings(&report.warnings);
    print_pending(&report.pending);
}

fn status_label(status: &RunStatus) -> String {
    match status {
        RunStatus::Ready { orders } => format!("ready ({orders} orders)"),
        RunStatus::Collecting { pending } => format!("waiting for names ({pending} names missing)"),
        RunStatus::Failed(error) => format!("failed ({error})"),
    }
}

fn print_warnings(warnings: &[ValidationWarning]) {
    if warnings.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Order"), header_cell("Warning")]);
    apply_table_style(&mut table);
    for warning in warnings {
        table.add_row(vec![
            Cell::new(warning.order_id()).fg(Color::Yellow),
            Cell::new(warning.message()),
        ]);
    }
    println!();
    println!("Warnings:");
    println!("{table}");
}

fn print_pending(pending: &[PendingCorrection]) {
    if pending.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Order"),
        header_cell("Product"),
        header_cell("Slot"),
        header_cell("Line"),
        header_cell("Address"),
        header_cell("Name"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for correction in pending {
        table.add_row(vec![
            Cell::new(&correction.key.order_id),
            Cell::new(&correction.key.product_code),
            Cell::new(correction.key.slot),
            Cell::new(correction.line),
            Cell::new(&correction.address),
            name_cell(&correction.name),
        ]);
    }
    println!();
    println!("Missing product names:");
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn name_cell(name: &str) -> Cell {
    if name.is_empty() {
        Cell::new("missing")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(name)
    }
}
