//! Record model for freight-prepaid order consolidation.
//!
//! Shipment exports arrive as one headerless line per merchandise item with
//! the order identifier repeated across lines. The types here describe those
//! raw lines, the single-line-per-order output record, the fixed column
//! positions both share, and the correction keys used to fill in missing
//! product names.

pub mod correction;
pub mod error;
pub mod layout;
pub mod options;
pub mod record;
pub mod warning;

pub use correction::{CorrectionKey, PendingCorrection, Slot};
pub use error::{ModelError, Result};
pub use layout::{ColumnLayout, SlotColumns};
pub use options::{ConversionOptions, EmptyGroupPolicy, ItemLimitPolicy};
pub use record::{OrderId, OutputRecord, OutputTable, RawLine, normalize_field};
pub use warning::ValidationWarning;
