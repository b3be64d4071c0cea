//! Report row types produced by the aggregation services
//!
//! Every report is a plain structure of primitives, ready for JSON or CSV
//! serialization by the presentation layer. The services never format output
//! themselves.

use serde::Serialize;

/// One normalized spend row per input cost record, input order preserved.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpendRow {
    pub usage_date: String,
    pub business_unit: String,
    pub application: String,
    pub environment: String,
    pub spend: f64,
}

/// Monthly spend total per service.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServiceTrendRow {
    /// YYYY-MM-01
    pub month: String,
    pub service: String,
    pub spend: i64,
}

/// Actual vs plan for one (month, business unit, application) bucket.
///
/// `business_unit`/`application` are `None` when the bucket came from an
/// actual whose tag dimension was absent. Variances are `actual - plan`,
/// `None` while the plan side is absent.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VarianceRow {
    pub month: String,
    pub business_unit: Option<String>,
    pub application: Option<String>,
    pub actual: i64,
    pub budget: Option<f64>,
    pub forecast: Option<f64>,
    pub variance_vs_budget: Option<f64>,
    pub variance_vs_forecast: Option<f64>,
}

/// One allocated (business unit, application) chargeback bucket.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChargebackRow {
    pub business_unit: String,
    pub application: String,
    pub usage_units: i64,
    pub rate_per_unit: f64,
    pub allocated_cost: i64,
}

/// Chargeback totals, with cost that could not be attributed to any bucket.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChargebackSummary {
    pub total_allocated: i64,
    pub unallocated: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChargebackReport {
    pub rows: Vec<ChargebackRow>,
    pub summary: ChargebackSummary,
}

/// Tagging completeness and service-dimension mapping coverage.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HygieneReport {
    /// Share of records missing any of bu/app/env, one decimal place.
    pub untagged_pct: f64,
    pub unmapped_services: usize,
    pub focus_conformance_pct: i64,
    pub target_untagged_pct: i64,
    pub target_focus_pct: i64,
}

/// Standalone untagged-share report.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UntaggedReport {
    pub untagged_pct: f64,
}

/// One TBM tower rollup bucket.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RollupRow {
    pub cost_pool: String,
    pub tower: String,
    pub service: String,
    pub application: String,
    pub monthly_cost: i64,
}

/// Monthly HPC cluster usage against owned capacity.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HpcUtilizationRow {
    /// YYYY-MM-01
    pub month: String,
    pub node_count: i64,
    pub hours_in_month: i64,
    pub used_cpu_hours: i64,
    pub used_gpu_hours: i64,
    pub cluster_cost: i64,
}

/// Latest-month HPC capacity summary with over-provisioning flags.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HpcSummary {
    pub avg_utilization_pct: f64,
    pub over_provisioned: bool,
    pub burst_while_idle_flag: bool,
    pub total_burst_spend: i64,
    pub cluster_monthly_cost: i64,
}

// ---------------------------------------------------------------------------
// Executive summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct YtdSummary {
    pub actual: i64,
    pub plan: i64,
    pub delta: i64,
    pub delta_pct: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct RunRate {
    /// YYYY-MM-01, empty when no actuals exist
    pub month: String,
    pub actual: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct EoySummary {
    pub forecast: i64,
    pub budget: i64,
    pub delta: i64,
    pub delta_pct: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct SavingsSummary {
    pub committed: i64,
    pub inflight: i64,
}

/// Hygiene snapshot embedded in the executive summary. Unlike the standalone
/// hygiene report, the conformance figure here is a fixed demo constant.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct HygieneSnapshot {
    pub untagged_usd: i64,
    pub untagged_pct: f64,
    pub focus_conformance_pct: i64,
    pub target_focus_pct: i64,
    pub target_untagged_pct: i64,
    pub unmapped_services: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct RiskSummary {
    pub count: usize,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct ExecSummary {
    /// YYYY-MM-01; empty with no actuals, and then left out of the JSON body
    #[serde(skip_serializing_if = "String::is_empty")]
    pub latest_month: String,
    pub ytd: YtdSummary,
    pub run_rate: RunRate,
    pub eoy: EoySummary,
    pub savings: SavingsSummary,
    pub hygiene: HygieneSnapshot,
    pub risks: RiskSummary,
}
