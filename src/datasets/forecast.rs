//! Budget/forecast seed dataset
//!
//! Expected CSV columns: month, business_unit, application, budget, forecast.
//! Lines starting with `#` are comments and never reach the aggregators.

use serde::Deserialize;
use std::path::Path;

use super::{lenient_opt_f64, read_records};
use crate::types::Result;

/// One planned (month, business unit, application) row.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ForecastRecord {
    /// YYYY-MM-DD, first of month by convention.
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub business_unit: String,
    #[serde(default)]
    pub application: String,
    /// Absent when the seed table has no budget for this bucket.
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub budget: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub forecast: Option<f64>,
}

/// Load forecast seed rows, dropping `#` comment lines.
pub fn load_forecast(path: &Path) -> Result<Vec<ForecastRecord>> {
    read_records(path, Some(b'#'))
}
