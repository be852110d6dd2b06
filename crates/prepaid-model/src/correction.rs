use std::fmt;

use crate::error::ModelError;
use crate::record::OrderId;

/// One of the two merchandise positions of an output record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::First, Slot::Second];

    pub fn from_index(index: usize) -> Result<Self, ModelError> {
        match index {
            0 => Ok(Slot::First),
            1 => Ok(Slot::Second),
            other => Err(ModelError::InvalidSlot(other)),
        }
    }

    pub fn index(self) -> usize {
        match self {
            Slot::First => 0,
            Slot::Second => 1,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

impl serde::Serialize for Slot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.index() as u64)
    }
}

impl<'de> serde::Deserialize<'de> for Slot {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let index = usize::deserialize(deserializer)?;
        Slot::from_index(index).map_err(serde::de::Error::custom)
    }
}

/// Identifies one missing product name within a run.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CorrectionKey {
    pub order_id: OrderId,
    pub product_code: String,
    pub slot: Slot,
}

impl CorrectionKey {
    pub fn new(order_id: impl Into<OrderId>, product_code: impl Into<String>, slot: Slot) -> Self {
        Self {
            order_id: order_id.into(),
            product_code: product_code.into(),
            slot,
        }
    }
}

impl fmt::Display for CorrectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "order {} / product {} / slot {}",
            self.order_id, self.product_code, self.slot
        )
    }
}

/// An outstanding correction as shown to whoever supplies the name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PendingCorrection {
    pub key: CorrectionKey,
    /// Shipping address of the order, to help staff identify it.
    pub address: String,
    /// 1-based row number of the item among the ingested rows.
    pub line: usize,
    /// Name supplied so far; empty until one is given.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_round_trips_through_its_index() {
        for slot in Slot::ALL {
            assert_eq!(Slot::from_index(slot.index()), Ok(slot));
        }
        assert_eq!(Slot::from_index(2), Err(ModelError::InvalidSlot(2)));
    }

    #[test]
    fn key_display_names_every_part() {
        let key = CorrectionKey::new("1001", "A2", Slot::Second);
        assert_eq!(key.to_string(), "order 1001 / product A2 / slot 1");
    }
}
