//! Compute chargeback allocation
//!
//! Allocates compute-service cost to (business unit, application) buckets at
//! a fixed rate per usage unit. Buckets keep the raw tag casing for grouping
//! (unlike the spend normalizer) and are only title-cased for display.
//! Records missing either dimension feed the unallocated total.

use std::collections::BTreeMap;

use crate::datasets::CostRecord;
use crate::services::tags::decode_tags;
use crate::services::title_first;
use crate::types::{ChargebackReport, ChargebackRow, ChargebackSummary};

/// Fixed chargeback rate, $ per usage unit.
pub const RATE_PER_UNIT: f64 = 0.45;
/// Only this service is charged back by usage units.
pub const CHARGEBACK_SERVICE: &str = "compute";

/// Allocate compute cost across tagged buckets, rows in (bu, app) order.
pub fn allocate(records: &[CostRecord]) -> ChargebackReport {
    let mut buckets: BTreeMap<(String, String), f64> = BTreeMap::new();
    let mut unallocated_cost = 0.0;

    for record in records {
        if !record.service.eq_ignore_ascii_case(CHARGEBACK_SERVICE) {
            continue;
        }
        let tags = decode_tags(&record.tags);
        if tags.business_unit.is_empty() || tags.application.is_empty() {
            unallocated_cost += record.cost_usd;
            continue;
        }
        *buckets
            .entry((tags.business_unit, tags.application))
            .or_insert(0.0) += record.usage_qty;
    }

    let rows: Vec<ChargebackRow> = buckets
        .into_iter()
        .map(|((bu, app), usage)| ChargebackRow {
            business_unit: title_first(&bu),
            application: title_first(&app),
            usage_units: usage.round() as i64,
            rate_per_unit: RATE_PER_UNIT,
            allocated_cost: (usage * RATE_PER_UNIT).round() as i64,
        })
        .collect();

    let summary = ChargebackSummary {
        total_allocated: rows.iter().map(|r| r.allocated_cost).sum(),
        unallocated: unallocated_cost.round() as i64,
    };

    ChargebackReport { rows, summary }
}
