//! Error types for order consolidation.

use prepaid_model::{CorrectionKey, ModelError, OrderId};
use thiserror::Error;

/// Failures that abort a whole conversion run. No output is produced once
/// one of these is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// An order maps more than two lines to merchandise slots.
    #[error("order {order_id} contains {count} items; at most 2 fit the output record")]
    TooManyItems { order_id: OrderId, count: usize },

    /// An order has no line with a product code or name.
    #[error("order {order_id} has no merchandise lines")]
    NoItems { order_id: OrderId },

    /// A line carries no order identifier.
    #[error("line {line} has no order identifier")]
    MissingOrderId { line: usize },

    /// A quantity cell is not an integer.
    #[error("order {order_id}, line {line}: quantity '{value}' is not a number")]
    InvalidQuantity {
        order_id: OrderId,
        line: usize,
        value: String,
    },

    /// Nothing left to write after consolidation.
    #[error("conversion produced no orders; check the input data")]
    EmptyResult,
}

/// Errors returned by the engine entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown conversion run #{0}")]
    UnknownRun(u64),

    #[error("input contains no rows")]
    NoRows,

    #[error("line {line} has {found} columns, expected {expected}")]
    RaggedInput {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Layout(#[from] ModelError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("{} product name(s) still missing", unresolved.len())]
    StillCollecting { unresolved: Vec<CorrectionKey> },

    #[error("no pending correction for {0}")]
    UnknownCorrection(CorrectionKey),
}

pub type Result<T> = std::result::Result<T, EngineError>;
