//! Legacy text encodings of the shipment files.

use encoding_rs::{Encoding, SHIFT_JIS, UTF_8};
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Encoding of the exported and re-imported files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceEncoding {
    /// Shift_JIS as written by Windows tools (CP932).
    #[default]
    ShiftJis,
    Utf8,
}

impl SourceEncoding {
    pub fn encoding(self) -> &'static Encoding {
        match self {
            SourceEncoding::ShiftJis => SHIFT_JIS,
            SourceEncoding::Utf8 => UTF_8,
        }
    }

    pub fn label(self) -> &'static str {
        self.encoding().name()
    }
}

/// Decodes file bytes, dropping a byte-order mark. Malformed sequences are an
/// error rather than being replaced.
pub fn decode_input(bytes: &[u8], encoding: SourceEncoding) -> Result<String> {
    let (text, had_errors) = encoding.encoding().decode_with_bom_removal(bytes);
    if had_errors {
        return Err(IngestError::Malformed {
            encoding: encoding.label(),
        });
    }
    Ok(text.into_owned())
}

/// Encodes text for output, refusing characters the encoding lacks.
pub fn encode_output(text: &str, encoding: SourceEncoding) -> Result<Vec<u8>> {
    let target = encoding.encoding();
    let (bytes, _, had_unmappable) = target.encode(text);
    if had_unmappable {
        let mut buf = [0u8; 4];
        let character = text
            .chars()
            .find(|ch| target.encode(ch.encode_utf8(&mut buf)).2)
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        return Err(IngestError::Unmappable {
            encoding: encoding.label(),
            character,
        });
    }
    Ok(bytes.into_owned())
}
