//! Tagging hygiene and service-mapping coverage
//!
//! A record counts as untagged when any of bu/app/env is absent, including
//! decode failures. Observed service names are title-cased before matching
//! against the dimension seed, which stores display-cased names.

use std::collections::BTreeSet;

use crate::datasets::{CostRecord, ServiceDimension};
use crate::services::tags::decode_tags;
use crate::services::title_first;
use crate::types::HygieneReport;

/// Untagged-share target surfaced beside the computed figure.
pub const TARGET_UNTAGGED_PCT: i64 = 5;
/// FOCUS conformance target on the standalone hygiene report.
pub const TARGET_FOCUS_PCT: i64 = 95;
/// Weight of the untagged share in the derived conformance score.
pub const CONFORMANCE_UNTAGGED_WEIGHT: f64 = 0.5;

/// Round to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Count of records missing any of bu/app/env.
pub(crate) fn untagged_count(records: &[CostRecord]) -> usize {
    records
        .iter()
        .filter(|r| decode_tags(&r.tags).missing_any())
        .count()
}

/// Share of records missing any of bu/app/env, one decimal place.
/// Zero for an empty dataset.
pub fn untagged_share(records: &[CostRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    round1(untagged_count(records) as f64 / records.len() as f64 * 100.0)
}

/// Distinct observed services whose title-cased name is not in the dimension
/// seed.
pub(crate) fn unmapped_service_count(
    records: &[CostRecord],
    dimensions: &[ServiceDimension],
) -> usize {
    let mapped: BTreeSet<&str> = dimensions
        .iter()
        .map(|d| d.service_name.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    let observed: BTreeSet<&str> = records
        .iter()
        .map(|r| r.service.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    observed
        .iter()
        .filter(|s| !mapped.contains(title_first(s).as_str()))
        .count()
}

/// Standalone hygiene report. Unlike the executive summary, conformance here
/// is derived from the untagged share rather than fixed.
pub fn score(records: &[CostRecord], dimensions: &[ServiceDimension]) -> HygieneReport {
    let untagged_pct = untagged_share(records);
    let focus_conformance_pct = (100.0 - untagged_pct * CONFORMANCE_UNTAGGED_WEIGHT)
        .round()
        .clamp(0.0, 100.0) as i64;
    HygieneReport {
        untagged_pct,
        unmapped_services: unmapped_service_count(records, dimensions),
        focus_conformance_pct,
        target_untagged_pct: TARGET_UNTAGGED_PCT,
        target_focus_pct: TARGET_FOCUS_PCT,
    }
}
