//! Non-fatal findings raised while validating orders.

use serde::Serialize;

use crate::record::OrderId;

/// Validation warning - each variant carries only its needed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationWarning {
    /// Three or more distinct product codes share one order.
    ManyDistinctProducts {
        order_id: OrderId,
        count: usize,
        codes: Vec<String>,
    },
    /// Lines beyond the second were dropped under the truncate policy.
    ExcessItemsDropped {
        order_id: OrderId,
        dropped: Vec<String>,
    },
    /// Lines without product code or name were skipped.
    BlankItemLines { order_id: OrderId, lines: Vec<usize> },
}

impl ValidationWarning {
    pub fn order_id(&self) -> &OrderId {
        match self {
            ValidationWarning::ManyDistinctProducts { order_id, .. } => order_id,
            ValidationWarning::ExcessItemsDropped { order_id, .. } => order_id,
            ValidationWarning::BlankItemLines { order_id, .. } => order_id,
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> String {
        match self {
            ValidationWarning::ManyDistinctProducts {
                order_id,
                count,
                codes,
            } => format!(
                "order {order_id} contains {count} distinct products: {}",
                codes.join(", ")
            ),
            ValidationWarning::ExcessItemsDropped { order_id, dropped } => format!(
                "order {order_id}: ignored {} item(s) beyond the second: {}",
                dropped.len(),
                dropped.join(", ")
            ),
            ValidationWarning::BlankItemLines { order_id, lines } => {
                let lines: Vec<String> = lines.iter().map(ToString::to_string).collect();
                format!(
                    "order {order_id}: skipped line(s) {} without product code or name",
                    lines.join(", ")
                )
            }
        }
    }
}
