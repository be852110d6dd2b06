//! Per-order validation: item counts, missing names, quantities.

use prepaid_model::{
    ConversionOptions, EmptyGroupPolicy, ItemLimitPolicy, OrderId, RawLine, Slot,
    ValidationWarning,
};
use tracing::debug;

use crate::error::ConversionError;
use crate::group::OrderGroup;

/// Distinct product count at which an order is flagged.
pub const DISTINCT_PRODUCT_WARNING: usize = 3;

/// A merchandise line assigned to an output slot.
#[derive(Debug, Clone, Copy)]
pub struct ItemLine<'a> {
    pub slot: Slot,
    pub line: &'a RawLine,
    pub code: &'a str,
    pub name: &'a str,
    pub quantity: Option<i64>,
}

impl ItemLine<'_> {
    pub fn is_missing_name(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupStatus {
    /// Every slotted item has a product name.
    Ready,
    /// At least one product name must be supplied before merging.
    Pending,
}

/// An order that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedGroup<'a> {
    pub order_id: OrderId,
    pub base: &'a RawLine,
    /// At most two items, in slot order.
    pub items: Vec<ItemLine<'a>>,
}

impl<'a> ValidatedGroup<'a> {
    pub fn status(&self) -> GroupStatus {
        if self.items.iter().any(ItemLine::is_missing_name) {
            GroupStatus::Pending
        } else {
            GroupStatus::Ready
        }
    }

    pub fn missing_names(&self) -> impl Iterator<Item = &ItemLine<'a>> {
        self.items.iter().filter(|item| item.is_missing_name())
    }
}

/// Parses a quantity cell. Empty cells and inputs without a quantity column
/// yield `None`.
pub fn parse_quantity(raw: Option<&str>) -> Result<Option<i64>, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<i64>().map(Some).map_err(|_| value.to_string()),
    }
}

/// Runs every check on one order.
///
/// Warnings go to `warnings` as they are found, so the ones raised before a
/// fatal check still reach the caller.
pub fn validate_group<'a>(
    group: &OrderGroup<'a>,
    options: &ConversionOptions,
    warnings: &mut Vec<ValidationWarning>,
) -> Result<ValidatedGroup<'a>, ConversionError> {
    let layout = &options.layout;
    let order_id = group.order_id.clone();
    if order_id.is_empty() {
        return Err(ConversionError::MissingOrderId {
            line: group.first().line(),
        });
    }


    let mut codes: Vec<String> = Vec::new();
    for line in &group.lines {
        let code = line.product_code(layout);
        if !code.is_empty() && !codes.iter().any(|seen| seen == code) {
            codes.push(code.to_string());
        }
    }
    if codes.len() >= DISTINCT_PRODUCT_WARNING {
        warnings.push(ValidationWarning::ManyDistinctProducts {
            order_id: order_id.clone(),
            count: codes.len(),
            codes,
        });
    }

    let (mut merchandise, blank): (Vec<&RawLine>, Vec<&RawLine>) = group
        .lines
        .iter()
        .copied()
        .partition(|line| line.has_item(layout));

    if merchandise.is_empty() {
        match options.empty_group {
            EmptyGroupPolicy::Reject => return Err(ConversionError::NoItems { order_id }),
            EmptyGroupPolicy::BaseOnly => {
                debug!(order_id = %order_id, "order without items kept with base fields only");
            }
        }
    } else if !blank.is_empty() {
        warnings.push(ValidationWarning::BlankItemLines {
            order_id: order_id.clone(),
            lines: blank.iter().map(|line| line.line()).collect(),
        });
    }

    if merchandise.len() > Slot::ALL.len() {
        match options.item_limit {
            ItemLimitPolicy::Reject => {
                return Err(ConversionError::TooManyItems {
                    order_id,
                    count: merchandise.len(),
                });
            }
            ItemLimitPolicy::Truncate => {
                let dropped = merchandise
                    .split_off(Slot::ALL.len())
                    .iter()
                    .map(|line| line.product_code(layout).to_string())
                    .collect();
                warnings.push(ValidationWarning::ExcessItemsDropped {
                    order_id: order_id.clone(),
                    dropped,
                });
            }
        }
    }

    let mut items = Vec::with_capacity(merchandise.len());
    for (slot, line) in Slot::ALL.into_iter().zip(merchandise) {
        let quantity = parse_quantity(line.quantity(layout)).map_err(|value| {
            ConversionError::InvalidQuantity {
                order_id: order_id.clone(),
                line: line.line(),
                value,
            }
        })?;
        items.push(ItemLine {
            slot,
            line,
            code: line.product_code(layout),
            name: line.product_name(layout),
            quantity,
        });
    }

    Ok(ValidatedGroup {
        order_id,
        base: group.first(),
        items,
    })
}
