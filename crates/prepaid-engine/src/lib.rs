//! Order consolidation and validation engine.
//!
//! Raw export lines flow through grouping, validation, merging and an
//! optional name-correction cycle before being shaped into the final
//! freight-prepaid table:
//!
//! ```ignore
//! use prepaid_engine::{ConversionEngine, SubmitOutcome};
//! use prepaid_model::ConversionOptions;
//!
//! let mut engine = ConversionEngine::new(ConversionOptions::default());
//! let run = engine.ingest(rows)?;
//! for pending in engine.pending_corrections(run)? {
//!     names.insert(pending.key, ask_for_name(&pending));
//! }
//! if engine.submit_corrections(run, names)? == SubmitOutcome::Ready {
//!     let table = engine.finalize(run)?;
//! }
//! ```

pub mod correction;
pub mod engine;
pub mod error;
pub mod group;
pub mod merge;
pub mod shape;
pub mod validate;

pub use correction::CorrectionBook;
pub use engine::{ConversionEngine, RunHandle, RunStatus, SubmitOutcome};
pub use error::{ConversionError, EngineError, Result};
pub use group::{OrderGroup, group_lines};
pub use merge::{QUANTITY_MARK, fill_slot, format_name, merge_group};
pub use shape::shape_output;
pub use validate::{GroupStatus, ItemLine, ValidatedGroup, parse_quantity, validate_group};
