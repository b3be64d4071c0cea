//! FOCUS-style cloud cost/usage dataset
//!
//! Expected CSV columns: usage_date, service, cost_usd, usage_qty, tags.
//! `tags` holds a JSON blob ({"bu":..,"app":..,"env":..}) decoded later by
//! the tag service.

use serde::Deserialize;
use std::path::Path;

use super::{lenient_f64, month_prefix, read_records};
use crate::types::Result;

/// One raw cost/usage event. Immutable once loaded.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CostRecord {
    #[serde(default)]
    pub usage_date: String,
    #[serde(default)]
    pub service: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cost_usd: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub usage_qty: f64,
    /// Raw JSON tag blob, possibly empty or malformed.
    #[serde(default)]
    pub tags: String,
}

impl CostRecord {
    /// Month key for this event: YYYY-MM.
    pub fn ym(&self) -> String {
        month_prefix(&self.usage_date)
    }

    /// Billing month for this event: YYYY-MM-01.
    pub fn month(&self) -> String {
        format!("{}-01", self.ym())
    }
}

/// Load cost records from a FOCUS sandbox CSV export.
pub fn load_cost_records(path: &Path) -> Result<Vec<CostRecord>> {
    read_records(path, None)
}
