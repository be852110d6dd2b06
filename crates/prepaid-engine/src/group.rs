//! Partitioning raw lines into orders.

use std::collections::HashMap;

use prepaid_model::{ColumnLayout, OrderId, RawLine};

/// Lines sharing one order identifier, in input order.
#[derive(Debug, Clone)]
pub struct OrderGroup<'a> {
    pub order_id: OrderId,
    pub lines: Vec<&'a RawLine>,
}

impl<'a> OrderGroup<'a> {
    /// Line whose base fields make up the output record.
    pub fn first(&self) -> &'a RawLine {
        self.lines[0]
    }
}

/// Groups lines by trimmed order identifier. Groups appear in the order their
/// identifier first occurs.
pub fn group_lines<'a>(lines: &'a [RawLine], layout: &ColumnLayout) -> Vec<OrderGroup<'a>> {
    let mut index: HashMap<OrderId, usize> = HashMap::new();
    let mut groups: Vec<OrderGroup<'a>> = Vec::new();
    for line in lines {
        let order_id = line.order_id(layout);
        match index.get(&order_id) {
            Some(&position) => groups[position].lines.push(line),
            None => {
                index.insert(order_id.clone(), groups.len());
                groups.push(OrderGroup {
                    order_id,
                    lines: vec![line],
                });
            }
        }
    }
    groups
}
