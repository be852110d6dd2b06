//! Product-name correction files.
//!
//! Pending corrections are written as a CSV with an empty `name` column for
//! staff to fill in; the same file is read back to supply the names.

use std::path::Path;

use csv::{ReaderBuilder, Terminator, WriterBuilder};
use prepaid_model::{CorrectionKey, OrderId, PendingCorrection, Slot};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::encoding::{SourceEncoding, decode_input, encode_output};
use crate::error::{IngestError, Result};

#[derive(Debug, Serialize)]
struct PendingRow<'a> {
    order_id: &'a str,
    product_code: &'a str,
    slot: Slot,
    address: &'a str,
    line: usize,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct NameRow {
    order_id: String,
    product_code: String,
    slot: Slot,
    #[serde(default)]
    name: String,
}

/// Renders pending corrections as a names template.
pub fn write_pending(pending: &[PendingCorrection], encoding: SourceEncoding) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    for correction in pending {
        writer.serialize(PendingRow {
            order_id: correction.key.order_id.as_str(),
            product_code: &correction.key.product_code,
            slot: correction.key.slot,
            address: &correction.address,
            line: correction.line,
            name: &correction.name,
        })?;
    }
    let buf = writer
        .into_inner()
        .map_err(|e| IngestError::Csv(e.into_error().into()))?;
    let text = String::from_utf8(buf).map_err(|_| IngestError::Malformed { encoding: "UTF-8" })?;
    encode_output(&text, encoding)
}

pub fn write_pending_file(
    path: &Path,
    pending: &[PendingCorrection],
    encoding: SourceEncoding,
) -> Result<()> {
    let bytes = write_pending(pending, encoding)?;
    std::fs::write(path, bytes).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), pending = pending.len(), "wrote names template");
    Ok(())
}

/// Parses a names file. Rows with an empty name are kept so the engine can
/// report them as unresolved.
pub fn read_names(bytes: &[u8], encoding: SourceEncoding) -> Result<Vec<(CorrectionKey, String)>> {
    let text = decode_input(bytes, encoding)?;
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(text.as_bytes());
    let mut names = Vec::new();
    for row in reader.deserialize::<NameRow>() {
        let row = row?;
        let key = CorrectionKey::new(OrderId::new(&row.order_id), row.product_code, row.slot);
        names.push((key, row.name));
    }
    Ok(names)
}

pub fn read_names_file(
    path: &Path,
    encoding: SourceEncoding,
) -> Result<Vec<(CorrectionKey, String)>> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::read(path, e))?;
    let names = read_names(&bytes, encoding).map_err(|err| match err {
        IngestError::Csv(source) => IngestError::NamesFile {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    info!(path = %path.display(), names = names.len(), "read names file");
    Ok(names)
}
