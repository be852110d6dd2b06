//! Writing the converted table.

use std::path::Path;

use csv::{Terminator, WriterBuilder};
use prepaid_model::OutputTable;
use tracing::info;

use crate::encoding::{SourceEncoding, encode_output};
use crate::error::{IngestError, Result};

/// Serializes the table as headerless CSV in the given encoding, one CRLF
/// terminated line per record.
pub fn write_output(table: &OutputTable, encoding: SourceEncoding) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    for record in &table.records {
        writer.write_record(record.fields())?;
    }
    let buf = writer
        .into_inner()
        .map_err(|e| IngestError::Csv(e.into_error().into()))?;
    let text = String::from_utf8(buf).map_err(|_| IngestError::Malformed { encoding: "UTF-8" })?;
    encode_output(&text, encoding)
}

/// Writes the converted table to `path`.
pub fn write_output_file(path: &Path, table: &OutputTable, encoding: SourceEncoding) -> Result<()> {
    let bytes = write_output(table, encoding)?;
    std::fs::write(path, &bytes).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        encoding = encoding.label(),
        rows = table.len(),
        "wrote output file"
    );
    Ok(())
}
