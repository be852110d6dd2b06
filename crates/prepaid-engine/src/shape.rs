use prepaid_model::{OutputRecord, OutputTable};

use crate::error::ConversionError;

/// Prepends the blank separator row the shipping system expects.
pub fn shape_output(
    records: Vec<OutputRecord>,
    width: usize,
) -> Result<OutputTable, ConversionError> {
    if records.is_empty() {
        return Err(ConversionError::EmptyResult);
    }
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(OutputRecord::blank(width));
    rows.extend(records);
    Ok(OutputTable {
        width,
        records: rows,
    })
}
