//! Building one output record per order.

use prepaid_model::{ColumnLayout, OutputRecord};

use crate::validate::{ItemLine, ValidatedGroup};

/// Separator between the quantity prefix and the product name.
pub const QUANTITY_MARK: char = '★';

/// Prefixes `name` with its quantity when two or more units were ordered.
pub fn format_name(name: &str, quantity: Option<i64>) -> String {
    match quantity {
        Some(count) if count >= 2 => format!("{count}{QUANTITY_MARK}{name}"),
        _ => name.to_string(),
    }
}

/// Writes an item's code and formatted `name` into its slot.
pub fn fill_slot(record: &mut OutputRecord, item: &ItemLine<'_>, name: &str, layout: &ColumnLayout) {
    record.set_slot(
        item.slot,
        layout,
        item.code,
        &format_name(name, item.quantity),
    );
}

/// Builds the output record for a validated order.
///
/// Items still missing a name leave their slot empty; the correction
/// workflow fills them in later.
pub fn merge_group(group: &ValidatedGroup<'_>, layout: &ColumnLayout) -> OutputRecord {
    let mut record = OutputRecord::from_base(group.base, layout);
    for item in group.items.iter().filter(|item| !item.is_missing_name()) {
        fill_slot(&mut record, item, item.name, layout);
    }
    record
}
