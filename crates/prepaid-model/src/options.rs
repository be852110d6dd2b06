//! Configuration options for order consolidation.

use serde::{Deserialize, Serialize};

use crate::layout::ColumnLayout;

/// What to do with an order that has more than two merchandise lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemLimitPolicy {
    /// Abort the whole run.
    #[default]
    Reject,
    /// Keep the first two lines and warn about the rest.
    Truncate,
}

/// What to do with an order whose lines carry no product code or name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyGroupPolicy {
    /// Abort the whole run.
    #[default]
    Reject,
    /// Emit the order with its base fields and both slots empty.
    BaseOnly,
}

/// Options controlling a conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    pub item_limit: ItemLimitPolicy,
    pub empty_group: EmptyGroupPolicy,
    pub layout: ColumnLayout,
}

impl ConversionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_item_limit(mut self, policy: ItemLimitPolicy) -> Self {
        self.item_limit = policy;
        self
    }

    #[must_use]
    pub fn with_empty_group(mut self, policy: EmptyGroupPolicy) -> Self {
        self.empty_group = policy;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }
}
