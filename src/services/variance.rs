//! Budget/forecast variance reconciliation
//!
//! Actual spend is bucketed by (month, business unit, application) using the
//! raw tag text; forecast rows match on lower-cased text and carry their own
//! casing through to display. Buckets with actuals but no plan are emitted
//! with a title-cased display name. This asymmetry is intentional.
//!
//! A demo-realism pass then substitutes synthetic budgets/forecasts wherever
//! plan data is missing or implausibly far from actuals, so every row shows a
//! bounded, mixed-sign variance. Downstream consumers (top-variance lists,
//! decision text) depend on that output distribution.

use std::collections::{BTreeMap, BTreeSet};

use crate::datasets::{CostRecord, ForecastRecord};
use crate::services::tags::decode_tags;
use crate::services::title_first;
use crate::types::VarianceRow;

/// Fixed month -> budget-nudge delta table (keyed by MM).
pub const MONTH_DELTAS: [(&str, f64); 12] = [
    ("01", 0.04),
    ("02", -0.02),
    ("03", 0.05),
    ("04", -0.06),
    ("05", 0.01),
    ("06", -0.03),
    ("07", 0.02),
    ("08", 0.0),
    ("09", 0.03),
    ("10", -0.02),
    ("11", 0.01),
    ("12", -0.04),
];

/// Budgets further than this (relative) from actuals are replaced.
pub const BUDGET_DRIFT_LIMIT: f64 = 0.20;
/// Forecasts further than this (relative) from actuals are replaced.
pub const FORECAST_DRIFT_LIMIT: f64 = 0.25;
/// Fraction of the month delta applied when synthesizing a forecast.
pub const FORECAST_DELTA_SCALE: f64 = 0.3;

/// Delta for a YYYY-MM-DD month key. Months outside the fixed table fall back
/// to a small deterministic nudge derived from `seed`.
fn month_delta(month: &str, seed: usize) -> f64 {
    let mm: String = month.chars().skip(5).take(2).collect();
    MONTH_DELTAS
        .iter()
        .find(|(key, _)| *key == mm)
        .map(|(_, delta)| *delta)
        .unwrap_or(0.01 * ((seed % 3) as f64 - 1.0))
}

/// Reconcile actuals against the forecast seed table. One row per forecast
/// bucket, plus one per actual bucket with no matching plan, in sorted
/// bucket order for the unplanned tail.
pub fn reconcile(records: &[CostRecord], forecast: &[ForecastRecord]) -> Vec<VarianceRow> {
    // Actuals keyed by raw tag text.
    let mut actuals: BTreeMap<(String, String, String), f64> = BTreeMap::new();
    for record in records {
        let tags = decode_tags(&record.tags);
        *actuals
            .entry((record.month(), tags.business_unit, tags.application))
            .or_insert(0.0) += record.cost_usd;
    }

    let mut out = Vec::new();
    let mut seen: BTreeSet<(String, String, String)> = BTreeSet::new();
    for plan in forecast {
        // Forecast buckets match on lower-cased text.
        let key = (
            plan.month.clone(),
            plan.business_unit.to_lowercase(),
            plan.application.to_lowercase(),
        );
        let actual = actuals.get(&key).copied().unwrap_or(0.0).round() as i64;
        seen.insert(key);
        out.push(VarianceRow {
            month: plan.month.clone(),
            business_unit: Some(plan.business_unit.clone()),
            application: Some(plan.application.clone()),
            actual,
            budget: plan.budget,
            forecast: plan.forecast,
            variance_vs_budget: plan.budget.map(|b| actual as f64 - b),
            variance_vs_forecast: plan.forecast.map(|f| actual as f64 - f),
        });
    }

    // Actual buckets the seed table never planned for.
    for ((month, bu, app), cost) in &actuals {
        if seen.contains(&(month.clone(), bu.clone(), app.clone())) {
            continue;
        }
        out.push(VarianceRow {
            month: month.clone(),
            business_unit: (!bu.is_empty()).then(|| title_first(bu)),
            application: (!app.is_empty()).then(|| title_first(app)),
            actual: cost.round() as i64,
            budget: None,
            forecast: None,
            variance_vs_budget: None,
            variance_vs_forecast: None,
        });
    }

    out
}

/// Demo-realism pass: substitute synthetic budgets/forecasts for rows whose
/// plan is absent or drifts past the limits, then recompute both variances.
/// Rows within the limits pass through untouched.
pub fn apply_demo_adjustment(rows: Vec<VarianceRow>) -> Vec<VarianceRow> {
    rows.into_iter()
        .map(|mut row| {
            let actual = row.actual as f64;
            let seed = (row.business_unit.as_deref().unwrap_or("").chars().count()
                + row.application.as_deref().unwrap_or("").chars().count())
            .max(1);
            let delta = month_delta(&row.month, seed);

            let mut budget = row.budget;
            let replace_budget = match budget {
                None => true,
                Some(b) => actual > 0.0 && (actual - b).abs() / b.max(1.0) > BUDGET_DRIFT_LIMIT,
            };
            if replace_budget {
                budget = Some((actual * (1.0 - delta)).round());
            }

            let mut forecast = row.forecast;
            let replace_forecast = match forecast {
                None => true,
                Some(f) => actual > 0.0 && (actual - f).abs() / f.max(1.0) > FORECAST_DRIFT_LIMIT,
            };
            if replace_forecast {
                // A substituted budget of exactly 0 falls back to actuals.
                let base = match budget {
                    Some(b) if b != 0.0 => b,
                    _ => actual,
                };
                let sign = if delta >= 0.0 { 1.0 } else { -1.0 };
                forecast = Some((base * (1.0 + delta.abs() * FORECAST_DELTA_SCALE * sign)).round());
            }

            row.budget = budget;
            row.forecast = forecast;
            row.variance_vs_budget = budget.map(|b| actual - b);
            row.variance_vs_forecast = forecast.map(|f| actual - f);
            row
        })
        .collect()
}

/// Full variance report: reconcile then apply the demo-realism pass.
pub fn variance_report(records: &[CostRecord], forecast: &[ForecastRecord]) -> Vec<VarianceRow> {
    apply_demo_adjustment(reconcile(records, forecast))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(date: &str, cost: f64, tags: &str) -> CostRecord {
        CostRecord {
            usage_date: date.to_string(),
            service: "compute".to_string(),
            cost_usd: cost,
            usage_qty: 0.0,
            tags: tags.to_string(),
        }
    }

    fn make_plan(
        month: &str,
        bu: &str,
        app: &str,
        budget: Option<f64>,
        forecast: Option<f64>,
    ) -> ForecastRecord {
        ForecastRecord {
            month: month.to_string(),
            business_unit: bu.to_string(),
            application: app.to_string(),
            budget,
            forecast,
        }
    }

    // ========== reconcile tests ==========

    #[test]
    fn test_reconcile_matches_on_lowercased_plan_key() {
        let records = vec![make_record(
            "2025-03-15",
            98000.0,
            r#"{"bu":"sales","app":"crm","env":"prod"}"#,
        )];
        let plans = vec![make_plan(
            "2025-03-01",
            "Sales",
            "CRM",
            Some(100000.0),
            Some(105000.0),
        )];
        let rows = reconcile(&records, &plans);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].actual, 98000);
        // Display carries the plan's own casing.
        assert_eq!(rows[0].business_unit.as_deref(), Some("Sales"));
        assert_eq!(rows[0].application.as_deref(), Some("CRM"));
        assert_eq!(rows[0].variance_vs_budget, Some(-2000.0));
        assert_eq!(rows[0].variance_vs_forecast, Some(-7000.0));
    }

    #[test]
    fn test_reconcile_sums_actuals_per_bucket() {
        let records = vec![
            make_record("2025-03-02", 450.0, r#"{"bu":"sales","app":"crm"}"#),
            make_record("2025-03-05", 97550.0, r#"{"bu":"sales","app":"crm"}"#),
        ];
        let plans = vec![make_plan("2025-03-01", "sales", "crm", Some(100000.0), None)];
        let rows = reconcile(&records, &plans);
        assert_eq!(rows[0].actual, 98000);
    }

    #[test]
    fn test_reconcile_unplanned_actual_is_title_cased() {
        let records = vec![make_record(
            "2025-03-02",
            5000.4,
            r#"{"bu":"sales","app":"billing"}"#,
        )];
        let rows = reconcile(&records, &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].month, "2025-03-01");
        assert_eq!(rows[0].business_unit.as_deref(), Some("Sales"));
        assert_eq!(rows[0].application.as_deref(), Some("Billing"));
        assert_eq!(rows[0].actual, 5000);
        assert_eq!(rows[0].budget, None);
        assert_eq!(rows[0].variance_vs_budget, None);
    }

    #[test]
    fn test_reconcile_untagged_actual_keeps_null_dimensions() {
        let records = vec![make_record("2025-03-02", 2000.0, "not json")];
        let rows = reconcile(&records, &[]);
        assert_eq!(rows[0].business_unit, None);
        assert_eq!(rows[0].application, None);
        assert_eq!(rows[0].actual, 2000);
    }

    #[test]
    fn test_reconcile_plan_with_no_actuals_reports_zero() {
        let plans = vec![make_plan("2025-06-01", "ops", "infra", Some(500.0), None)];
        let rows = reconcile(&[], &plans);
        assert_eq!(rows[0].actual, 0);
        assert_eq!(rows[0].variance_vs_budget, Some(-500.0));
        assert_eq!(rows[0].variance_vs_forecast, None);
    }

    // ========== month_delta tests ==========

    #[test]
    fn test_month_delta_fixed_table() {
        assert!((month_delta("2025-03-01", 1) - 0.05).abs() < f64::EPSILON);
        assert!((month_delta("2025-04-01", 1) - (-0.06)).abs() < f64::EPSILON);
        assert!((month_delta("2025-08-01", 1) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_month_delta_unlisted_month_uses_seed() {
        // "99" is not in the table: delta = 0.01 * ((seed % 3) - 1)
        assert!((month_delta("2025-99-01", 3) - (-0.01)).abs() < f64::EPSILON);
        assert!((month_delta("2025-99-01", 4) - 0.0).abs() < f64::EPSILON);
        assert!((month_delta("2025-99-01", 5) - 0.01).abs() < f64::EPSILON);
    }

    // ========== apply_demo_adjustment tests ==========

    #[test]
    fn test_adjustment_within_drift_passes_through() {
        // |98000 - 100000| / 100000 = 0.02 <= 0.20: budget must not change.
        let rows = vec![VarianceRow {
            month: "2025-03-01".into(),
            business_unit: Some("sales".into()),
            application: Some("crm".into()),
            actual: 98000,
            budget: Some(100000.0),
            forecast: Some(105000.0),
            variance_vs_budget: Some(-2000.0),
            variance_vs_forecast: Some(-7000.0),
        }];
        let out = apply_demo_adjustment(rows);
        assert_eq!(out[0].budget, Some(100000.0));
        assert_eq!(out[0].forecast, Some(105000.0));
        assert_eq!(out[0].variance_vs_budget, Some(-2000.0));
        assert_eq!(out[0].variance_vs_forecast, Some(-7000.0));
    }

    #[test]
    fn test_adjustment_replaces_missing_budget_and_forecast() {
        let rows = vec![VarianceRow {
            month: "2025-03-01".into(),
            business_unit: Some("sales".into()),
            application: Some("billing".into()),
            actual: 5000,
            budget: None,
            forecast: None,
            variance_vs_budget: None,
            variance_vs_forecast: None,
        }];
        let out = apply_demo_adjustment(rows);
        // March delta is +5%: budget = 5000 * 0.95, forecast = budget * 1.015
        assert_eq!(out[0].budget, Some(4750.0));
        assert_eq!(out[0].forecast, Some(4821.0));
        assert_eq!(out[0].variance_vs_budget, Some(250.0));
        assert_eq!(out[0].variance_vs_forecast, Some(179.0));
    }

    #[test]
    fn test_adjustment_replaces_drifted_budget() {
        // |1500 - 5000| / 5000 = 0.7 > 0.20: synthetic budget kicks in.
        let rows = vec![VarianceRow {
            month: "2025-03-01".into(),
            business_unit: Some("mkt".into()),
            application: Some("web".into()),
            actual: 1500,
            budget: Some(5000.0),
            forecast: None,
            variance_vs_budget: Some(-3500.0),
            variance_vs_forecast: None,
        }];
        let out = apply_demo_adjustment(rows);
        assert_eq!(out[0].budget, Some(1425.0));
        assert_eq!(out[0].forecast, Some(1446.0));
        assert_eq!(out[0].variance_vs_budget, Some(75.0));
    }

    #[test]
    fn test_adjustment_zero_actual_keeps_existing_plan() {
        // Drift triggers require positive actuals.
        let rows = vec![VarianceRow {
            month: "2025-03-01".into(),
            business_unit: Some("ops".into()),
            application: Some("infra".into()),
            actual: 0,
            budget: Some(500.0),
            forecast: Some(600.0),
            variance_vs_budget: Some(-500.0),
            variance_vs_forecast: Some(-600.0),
        }];
        let out = apply_demo_adjustment(rows);
        assert_eq!(out[0].budget, Some(500.0));
        assert_eq!(out[0].forecast, Some(600.0));
    }

    #[test]
    fn test_adjustment_negative_delta_month() {
        // April delta is -6%: synthetic budget sits above actuals and the
        // forecast is nudged below the budget.
        let rows = vec![VarianceRow {
            month: "2025-04-01".into(),
            business_unit: Some("sales".into()),
            application: Some("crm".into()),
            actual: 10000,
            budget: None,
            forecast: None,
            variance_vs_budget: None,
            variance_vs_forecast: None,
        }];
        let out = apply_demo_adjustment(rows);
        assert_eq!(out[0].budget, Some(10600.0));
        // 10600 * (1 - 0.06 * 0.3) = 10600 * 0.982 = 10409.2
        assert_eq!(out[0].forecast, Some(10409.0));
        assert_eq!(out[0].variance_vs_budget, Some(-600.0));
    }

    #[test]
    fn test_adjustment_variance_identity() {
        let records = vec![
            make_record("2025-03-02", 450.0, r#"{"bu":"sales","app":"crm"}"#),
            make_record("2025-02-15", 12000.0, r#"{"bu":"platform","app":"data"}"#),
        ];
        let plans = vec![make_plan("2025-03-01", "sales", "crm", Some(400.0), None)];
        for row in variance_report(&records, &plans) {
            let actual = row.actual as f64;
            if let Some(b) = row.budget {
                assert_eq!(row.variance_vs_budget, Some(actual - b));
            }
            if let Some(f) = row.forecast {
                assert_eq!(row.variance_vs_forecast, Some(actual - f));
            }
        }
    }

    #[test]
    fn test_zero_budget_treated_as_absent_by_guard() {
        // budget 0 with positive actuals: |a - 0| / max(0,1) = a > 0.20,
        // so the synthetic budget replaces it instead of dividing by zero.
        let rows = vec![VarianceRow {
            month: "2025-08-01".into(),
            business_unit: Some("ops".into()),
            application: Some("infra".into()),
            actual: 100,
            budget: Some(0.0),
            forecast: None,
            variance_vs_budget: Some(100.0),
            variance_vs_forecast: None,
        }];
        let out = apply_demo_adjustment(rows);
        // August delta is 0: budget = actual.
        assert_eq!(out[0].budget, Some(100.0));
        assert_eq!(out[0].variance_vs_budget, Some(0.0));
    }
}
