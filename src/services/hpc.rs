//! HPC cluster utilization
//!
//! Job hours and cluster cost fold into per-month buckets; the summary looks
//! at the lexicographically-latest month, measures CPU usage against owned
//! capacity, and flags cloud bursting while the cluster sits idle.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Utc};

use crate::datasets::{HpcBurstRecord, HpcClusterCost, HpcJobRecord};
use crate::types::{HpcSummary, HpcUtilizationRow};

/// Owned cluster size used for capacity computation.
pub const NODE_COUNT: i64 = 50;
/// Idle share above which the cluster counts as over-provisioned.
pub const IDLE_ALERT_PCT: f64 = 40.0;

#[derive(Debug, Clone, Copy, Default)]
struct MonthAgg {
    cpu: f64,
    gpu: f64,
    cost: f64,
}

fn monthly_buckets(
    jobs: &[HpcJobRecord],
    costs: &[HpcClusterCost],
) -> BTreeMap<String, MonthAgg> {
    let mut buckets: BTreeMap<String, MonthAgg> = BTreeMap::new();
    for cost in costs {
        buckets.entry(cost.month.clone()).or_default().cost += cost.total_cost_usd;
    }
    for job in jobs {
        let agg = buckets.entry(job.month.clone()).or_default();
        agg.cpu += job.cpu_hours;
        agg.gpu += job.gpu_hours;
    }
    buckets
}

/// Hours in the calendar month containing `iso` (UTC). Unparseable input
/// falls back to the current month.
fn hours_in_month(iso: &str) -> i64 {
    let date = NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .unwrap_or_else(|_| Utc::now().date_naive());
    let first = date.with_day(1).unwrap_or(date);
    let next_first = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
    .unwrap_or(first);
    (next_first - first).num_days() * 24
}

/// Monthly utilization rows, in month order.
pub fn utilization(jobs: &[HpcJobRecord], costs: &[HpcClusterCost]) -> Vec<HpcUtilizationRow> {
    monthly_buckets(jobs, costs)
        .into_iter()
        .map(|(month, agg)| HpcUtilizationRow {
            hours_in_month: hours_in_month(&month),
            month,
            node_count: NODE_COUNT,
            used_cpu_hours: agg.cpu.round() as i64,
            used_gpu_hours: agg.gpu.round() as i64,
            cluster_cost: agg.cost.round() as i64,
        })
        .collect()
}

/// Latest-month capacity summary with burst-while-idle detection.
pub fn summary(
    jobs: &[HpcJobRecord],
    costs: &[HpcClusterCost],
    bursts: &[HpcBurstRecord],
) -> HpcSummary {
    let buckets = monthly_buckets(jobs, costs);
    let latest = buckets.keys().next_back().cloned();
    let agg = latest
        .as_ref()
        .and_then(|month| buckets.get(month))
        .copied()
        .unwrap_or_default();

    let capacity = NODE_COUNT as f64 * hours_in_month(latest.as_deref().unwrap_or("")) as f64;
    let avg_utilization_pct = if capacity > 0.0 {
        (agg.cpu / capacity * 1000.0).round() / 10.0
    } else {
        0.0
    };
    let idle_pct = 100.0 - avg_utilization_pct;
    let over_provisioned = idle_pct > IDLE_ALERT_PCT;

    let burst_latest: f64 = bursts
        .iter()
        .filter(|b| Some(&b.month) == latest.as_ref())
        .map(|b| b.spend_usd)
        .sum();
    let total_burst: f64 = bursts.iter().map(|b| b.spend_usd).sum();

    HpcSummary {
        avg_utilization_pct,
        over_provisioned,
        burst_while_idle_flag: over_provisioned && burst_latest > 0.0,
        total_burst_spend: total_burst.round() as i64,
        cluster_monthly_cost: agg.cost.round() as i64,
    }
}
