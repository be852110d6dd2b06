use std::fmt;

use crate::correction::Slot;
use crate::layout::ColumnLayout;

/// Text pandas-style exports write for a missing cell.
const NAN_TEXT: &str = "nan";

/// Trims a raw cell and maps the literal `nan` to the empty string.
pub fn normalize_field(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed == NAN_TEXT {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Grouping key shared by every line of one order.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(from = "String", into = "String")]
pub struct OrderId(String);

impl OrderId {
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for OrderId {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<OrderId> for String {
    fn from(value: OrderId) -> Self {
        value.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One line of the shipment export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    line: usize,
    fields: Vec<String>,
}

impl RawLine {
    /// Builds a line from raw cells. `line` is the 1-based source position.
    pub fn new<I, S>(line: usize, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            line,
            fields: fields
                .into_iter()
                .map(|value| normalize_field(value.as_ref()))
                .collect(),
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn width(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Field at `column`, or the empty string past the end of the line.
    pub fn field(&self, column: usize) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn order_id(&self, layout: &ColumnLayout) -> OrderId {
        OrderId::new(self.field(layout.order_id))
    }

    pub fn product_code(&self, layout: &ColumnLayout) -> &str {
        self.field(layout.item_code())
    }

    pub fn product_name(&self, layout: &ColumnLayout) -> &str {
        self.field(layout.item_name())
    }

    pub fn address(&self, layout: &ColumnLayout) -> &str {
        self.field(layout.address)
    }

    /// Raw quantity text, `None` when the line has no quantity column.
    pub fn quantity(&self, layout: &ColumnLayout) -> Option<&str> {
        self.fields.get(layout.quantity).map(String::as_str)
    }

    /// Whether the line carries an item at all.
    pub fn has_item(&self, layout: &ColumnLayout) -> bool {
        !self.product_code(layout).is_empty() || !self.product_name(layout).is_empty()
    }
}

/// One row of the converted file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct OutputRecord {
    fields: Vec<String>,
}

impl OutputRecord {
    pub fn blank(width: usize) -> Self {
        Self {
            fields: vec![String::new(); width],
        }
    }

    /// Copies every non-merchandise column of `line`.
    pub fn from_base(line: &RawLine, layout: &ColumnLayout) -> Self {
        let fields = line
            .fields()
            .iter()
            .enumerate()
            .map(|(column, value)| {
                if layout.is_reserved(column) {
                    String::new()
                } else {
                    value.clone()
                }
            })
            .collect();
        Self { fields }
    }

    pub fn width(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }

    pub fn field(&self, column: usize) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(String::is_empty)
    }

    /// Code and name currently stored in `slot`.
    pub fn slot(&self, slot: Slot, layout: &ColumnLayout) -> (&str, &str) {
        let columns = layout.slot(slot);
        (self.field(columns.code), self.field(columns.name))
    }

    pub fn set_slot(&mut self, slot: Slot, layout: &ColumnLayout, code: &str, name: &str) {
        let columns = layout.slot(slot);
        self.set(columns.code, code);
        self.set(columns.name, name);
    }

    fn set(&mut self, column: usize, value: &str) {
        if let Some(cell) = self.fields.get_mut(column) {
            *cell = value.to_string();
        }
    }
}

/// Final converted table: a blank separator row followed by one row per order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OutputTable {
    pub width: usize,
    pub records: Vec<OutputRecord>,
}

impl OutputTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows after the leading blank record.
    pub fn orders(&self) -> &[OutputRecord] {
        self.records.get(1..).unwrap_or(&[])
    }
}
