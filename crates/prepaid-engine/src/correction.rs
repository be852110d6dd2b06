//! Suspend/resume cycle for product names missing from the export.
//!
//! Orders with a missing name are held here with their partially built
//! record. Names supplied by the caller accumulate across submissions; the
//! held records are released only once every outstanding request has a
//! non-empty name.

use std::collections::{HashMap, HashSet};

use prepaid_model::{ColumnLayout, CorrectionKey, OrderId, OutputRecord, PendingCorrection};
use tracing::debug;

use crate::error::EngineError;
use crate::merge::format_name;
use crate::validate::ValidatedGroup;

/// One item whose product name must be supplied.
#[derive(Debug, Clone)]
struct CorrectionRequest {
    key: CorrectionKey,
    quantity: Option<i64>,
    address: String,
    line: usize,
    /// Index of the held order the name belongs to.
    order: usize,
}

#[derive(Debug, Clone)]
struct HeldOrder {
    order_id: OrderId,
    record: OutputRecord,
}

#[derive(Debug, Clone, Default)]
pub struct CorrectionBook {
    orders: Vec<HeldOrder>,
    requests: Vec<CorrectionRequest>,
    /// Keys of every open request, checked by `supply`.
    keys: HashSet<CorrectionKey>,
    supplied: HashMap<CorrectionKey, String>,
}

impl CorrectionBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Holds a pending order and opens a request for each missing name.
    pub fn hold(&mut self, group: &ValidatedGroup<'_>, record: OutputRecord, layout: &ColumnLayout) {
        let order = self.orders.len();
        self.orders.push(HeldOrder {
            order_id: group.order_id.clone(),
            record,
        });
        for item in group.missing_names() {
            let key = CorrectionKey::new(group.order_id.clone(), item.code, item.slot);
            self.keys.insert(key.clone());
            debug!(%key, line = item.line.line(), "product name missing");
            self.requests.push(CorrectionRequest {
                key,
                quantity: item.quantity,
                address: item.line.address(layout).to_string(),
                line: item.line.line(),
                order,
            });
        }
    }

    /// Number of outstanding requests.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn pending(&self) -> Vec<PendingCorrection> {
        self.requests
            .iter()
            .map(|request| PendingCorrection {
                key: request.key.clone(),
                address: request.address.clone(),
                line: request.line,
                name: self.supplied(&request.key).unwrap_or("").to_string(),
            })
            .collect()
    }

    /// Name supplied so far for `key`, if any.
    pub fn supplied(&self, key: &CorrectionKey) -> Option<&str> {
        self.supplied.get(key).map(String::as_str)
    }

    /// Records caller-supplied names. A key without an outstanding request
    /// rejects the whole submission.
    pub fn supply<I>(&mut self, names: I) -> Result<(), EngineError>
    where
        I: IntoIterator<Item = (CorrectionKey, String)>,
    {
        let names: Vec<(CorrectionKey, String)> = names.into_iter().collect();
        if let Some((key, _)) = names.iter().find(|(key, _)| !self.keys.contains(key)) {
            return Err(EngineError::UnknownCorrection(key.clone()));
        }
        for (key, name) in names {
            self.supplied.insert(key, name.trim().to_string());
        }
        Ok(())
    }

    /// Requests that still lack a non-empty name.
    pub fn unresolved(&self) -> Vec<CorrectionKey> {
        self.requests
            .iter()
            .filter(|request| self.supplied(&request.key).is_none_or(str::is_empty))
            .map(|request| request.key.clone())
            .collect()
    }

    /// Writes every supplied name into its held record and releases the
    /// records in the order they were held. Returns `None`, changing nothing,
    /// while any request is unresolved.
    pub fn resolve(&mut self, layout: &ColumnLayout) -> Option<Vec<OutputRecord>> {
        if !self.unresolved().is_empty() {
            return None;
        }
        for request in self.requests.drain(..) {
            let name = self.supplied.get(&request.key).map(String::as_str).unwrap_or("");
            let held = &mut self.orders[request.order];
            held.record.set_slot(
                request.key.slot,
                layout,
                &request.key.product_code,
                &format_name(name, request.quantity),
            );
        }
        self.keys.clear();
        self.supplied.clear();
        let released: Vec<OutputRecord> = self
            .orders
            .drain(..)
            .map(|held| {
                debug!(order_id = %held.order_id, "order released after correction");
                held.record
            })
            .collect();
        Some(released)
    }
}
