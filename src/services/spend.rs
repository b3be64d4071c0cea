//! Spend normalization and per-service spend trends
//!
//! The normalizer emits one display-ready row per cost record, in input
//! order. Grouping is deferred to downstream consumers; only the service
//! trend report aggregates here.

use std::collections::BTreeMap;

use crate::datasets::CostRecord;
use crate::services::tags::decode_tags;
use crate::services::title_first;
use crate::types::{ServiceTrendRow, SpendRow};

/// Display fallback for an absent business unit or application tag.
pub const UNASSIGNED: &str = "Unassigned";
/// Display fallback for an absent environment tag.
pub const UNKNOWN_ENV: &str = "Unknown";

/// Normalize raw cost records for display: one row per record, order
/// preserved. Never emits an empty business unit or application.
pub fn normalize_spend(records: &[CostRecord]) -> Vec<SpendRow> {
    records
        .iter()
        .map(|record| {
            let tags = decode_tags(&record.tags);
            let environment = if tags.environment.is_empty() {
                UNKNOWN_ENV.to_string()
            } else if tags.environment.eq_ignore_ascii_case("prod") {
                "Prod".to_string()
            } else {
                tags.environment.to_uppercase()
            };
            SpendRow {
                usage_date: record.usage_date.clone(),
                business_unit: if tags.business_unit.is_empty() {
                    UNASSIGNED.to_string()
                } else {
                    title_first(&tags.business_unit)
                },
                application: if tags.application.is_empty() {
                    UNASSIGNED.to_string()
                } else {
                    title_first(&tags.application)
                },
                environment,
                spend: record.cost_usd,
            }
        })
        .collect()
}

/// Monthly spend per service, in (month, service) order.
pub fn service_trends(records: &[CostRecord]) -> Vec<ServiceTrendRow> {
    let mut buckets: BTreeMap<(String, String), f64> = BTreeMap::new();
    for record in records {
        let service = if record.service.is_empty() {
            "unknown".to_string()
        } else {
            record.service.clone()
        };
        *buckets.entry((record.month(), service)).or_insert(0.0) += record.cost_usd;
    }

    buckets
        .into_iter()
        .map(|((month, service), spend)| ServiceTrendRow {
            month,
            service,
            spend: spend.round() as i64,
        })
        .collect()
}
