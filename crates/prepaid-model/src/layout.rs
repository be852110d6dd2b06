//! Fixed column positions shared by the raw export and the output record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::correction::Slot;
use crate::error::{ModelError, Result};

/// Code/name column pair for one merchandise slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotColumns {
    pub code: usize,
    pub name: usize,
}

/// Zero-based column positions of the shipment export.
///
/// Raw lines carry their single item in the first slot's columns; the output
/// record uses both slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    /// Order identifier shared by every line of one order.
    pub order_id: usize,
    /// Shipping address, shown next to pending corrections.
    pub address: usize,
    /// Merchandise slots in output order.
    pub slots: [SlotColumns; 2],
    /// Item quantity. Inputs narrower than this column carry no quantity.
    pub quantity: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            order_id: 32,
            address: 11,
            slots: [
                SlotColumns { code: 26, name: 27 },
                SlotColumns { code: 28, name: 29 },
            ],
            quantity: 41,
        }
    }
}

impl ColumnLayout {
    pub fn slot(&self, slot: Slot) -> SlotColumns {
        self.slots[slot.index()]
    }

    /// Column holding a raw line's product code.
    pub fn item_code(&self) -> usize {
        self.slots[0].code
    }

    /// Column holding a raw line's product name.
    pub fn item_name(&self) -> usize {
        self.slots[0].name
    }

    /// Whether `column` belongs to a merchandise slot and is left out of the
    /// base-field copy.
    pub fn is_reserved(&self, column: usize) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.code == column || slot.name == column)
    }

    /// Smallest input width that still contains every required column.
    pub fn required_width(&self) -> usize {
        let mut widest = self.order_id.max(self.address);
        for slot in &self.slots {
            widest = widest.max(slot.code).max(slot.name);
        }
        widest + 1
    }

    pub fn has_quantity(&self, width: usize) -> bool {
        self.quantity < width
    }

    /// Rejects inputs that are too narrow and layouts whose required columns
    /// collide.
    pub fn check_width(&self, width: usize) -> Result<()> {
        let mut seen = BTreeSet::new();
        let slot_columns = self.slots.iter().flat_map(|slot| [slot.code, slot.name]);
        for column in [self.order_id].into_iter().chain(slot_columns) {
            if !seen.insert(column) {
                return Err(ModelError::OverlappingColumns(column));
            }
        }
        let required = self.required_width();
        if width < required {
            return Err(ModelError::LayoutMismatch { width, required });
        }
        Ok(())
    }
}
