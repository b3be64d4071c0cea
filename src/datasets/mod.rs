//! Typed CSV dataset readers
//!
//! One module per dataset family. All readers share the same contract:
//! header-based deserialization, whitespace trimming, and best-effort row
//! handling. A row that fails to deserialize is skipped with a warning,
//! never fatal.

mod dimensions;
mod focus;
mod forecast;
mod hpc;

pub use dimensions::{load_dimensions, ServiceDimension};
pub use focus::{load_cost_records, CostRecord};
pub use forecast::{load_forecast, ForecastRecord};
pub use hpc::{
    load_burst_records, load_cluster_costs, load_job_records, HpcBurstRecord, HpcClusterCost,
    HpcJobRecord,
};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::path::Path;

use crate::types::Result;

/// Read all records from a headered CSV file, skipping malformed rows.
///
/// `comment` marks a line-comment byte: lines starting with it are ignored
/// by the reader (used for `#` comment rows in seed files).
pub(crate) fn read_records<T: DeserializeOwned>(
    path: &Path,
    comment: Option<u8>,
) -> Result<Vec<T>> {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).trim(csv::Trim::All);
    if comment.is_some() {
        builder.comment(comment);
    }
    let mut reader = builder.from_path(path)?;

    let mut records = Vec::new();
    for (idx, result) in reader.deserialize().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                eprintln!(
                    "[tbmtrack] Warning: skipping row {} of {}: {}",
                    idx + 2,
                    path.display(),
                    e
                );
            }
        }
    }
    Ok(records)
}

/// Lenient numeric field: empty or non-numeric values become 0.
///
/// Shared by every dataset so missing-cost semantics never drift between
/// aggregators.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse().unwrap_or(0.0))
}

/// Lenient optional numeric field: empty or non-numeric values become `None`.
pub(crate) fn lenient_opt_f64<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse().ok())
}

/// First seven characters of an ISO date: the YYYY-MM month key.
pub(crate) fn month_prefix(date: &str) -> String {
    date.chars().take(7).collect()
}
