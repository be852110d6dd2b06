//! Reading the headerless shipment export.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::encoding::{SourceEncoding, decode_input};
use crate::error::{IngestError, Result};

/// Decodes file bytes and splits them into rows of string cells.
///
/// Every cell stays a string so leading zeros survive. Rows must all have
/// the same number of fields; rows whose cells are all empty are skipped.
pub fn read_rows(bytes: &[u8], encoding: SourceEncoding) -> Result<Vec<Vec<String>>> {
    let text = decode_input(bytes, encoding)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|value| value.trim().is_empty()) {
            skipped += 1;
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    if skipped > 0 {
        debug!(skipped, "skipped rows without any value");
    }
    Ok(rows)
}

/// Reads an export file from disk.
pub fn read_input_file(path: &Path, encoding: SourceEncoding) -> Result<Vec<Vec<String>>> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::read(path, e))?;
    let rows = read_rows(&bytes, encoding)?;
    info!(
        path = %path.display(),
        encoding = encoding.label(),
        rows = rows.len(),
        "read input file"
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::SHIFT_JIS;

    #[test]
    fn test_read_rows_keeps_leading_zeros() {
        let rows = read_rows(b"0012,00100,1001\n0013,00200,1002\n", SourceEncoding::Utf8).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["0012", "00100", "1001"]);
    }

    #[test]
    fn test_read_rows_skips_empty_rows() {
        let rows = read_rows(b"a,b,c\n,,\n\nd,e,f\n", SourceEncoding::Utf8).unwrap();
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["d", "e", "f"]]);
    }

    #[test]
    fn test_read_rows_rejects_unequal_lengths() {
        let err = read_rows(b"a,b,c\nd,e\n", SourceEncoding::Utf8).unwrap_err();
        assert!(matches!(err, IngestError::Csv(_)));
    }

    #[test]
    fn test_read_rows_shift_jis_quoted_field() {
        let (bytes, _, _) = SHIFT_JIS.encode("1001,\"東京都千代田区, 1-1\",ウィジェット\r\n");
        let rows = read_rows(&bytes, SourceEncoding::ShiftJis).unwrap();
        assert_eq!(rows, vec![vec!["1001", "東京都千代田区, 1-1", "ウィジェット"]]);
    }
}
