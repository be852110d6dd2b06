//! Reading and writing freight-prepaid shipment files.
//!
//! This crate turns the raw bytes of a headerless, legacy-encoded export into
//! string rows for the conversion engine, and serializes converted tables and
//! name-correction templates back into the same encoding.
//!
//! # Features
//!
//! - **Encodings**: Shift_JIS (CP932) by default, UTF-8 optional; malformed
//!   input and unmappable output characters are errors
//! - **CSV Loading**: headerless, all-string, fixed field count
//! - **CSV Writing**: CRLF-terminated output for the shipping software
//! - **Names Files**: pending-correction templates and their filled-in copies
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use prepaid_ingest::{SourceEncoding, read_input_file, write_output_file};
//!
//! let rows = read_input_file(Path::new("orders.csv"), SourceEncoding::ShiftJis)?;
//! // ... run the engine ...
//! write_output_file(Path::new("orders_prepaid.csv"), &table, SourceEncoding::ShiftJis)?;
//! ```

mod encoding;
mod error;
mod names;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === Encodings ===
pub use encoding::{SourceEncoding, decode_input, encode_output};

// === CSV Reading / Writing ===
pub use table::{read_input_file, read_rows, write_output, write_output_file};

// === Names Files ===
pub use names::{read_names, read_names_file, write_pending, write_pending_file};
