//! HPC cluster datasets: job usage, cluster cost, cloud-burst spend
//!
//! All three are monthly, keyed by a YYYY-MM-01 `month` column.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{lenient_f64, read_records};
use crate::types::Result;

/// Aggregate job hours submitted in one month.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HpcJobRecord {
    #[serde(default)]
    pub month: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cpu_hours: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub gpu_hours: f64,
}

/// Amortized cluster cost (capex + opex + power) for one month.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HpcClusterCost {
    #[serde(default)]
    pub month: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_cost_usd: f64,
}

/// Spend bursting workloads to external capacity in one month.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct HpcBurstRecord {
    #[serde(default)]
    pub month: String,
    /// on_demand | reserved | spot
    #[serde(default)]
    pub pricing_model: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub spend_usd: f64,
}

pub fn load_job_records(path: &Path) -> Result<Vec<HpcJobRecord>> {
    read_records(path, None)
}

pub fn load_cluster_costs(path: &Path) -> Result<Vec<HpcClusterCost>> {
    read_records(path, None)
}

pub fn load_burst_records(path: &Path) -> Result<Vec<HpcBurstRecord>> {
    read_records(path, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_job_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"month,cpu_hours,gpu_hours\n\
              2025-02-01,20000,3000\n\
              2025-03-01,21000,\n",
        )
        .unwrap();
        let jobs = load_job_records(file.path()).unwrap();
        assert_eq!(jobs.len(), 2);
        assert!((jobs[0].cpu_hours - 20000.0).abs() < f64::EPSILON);
        assert!((jobs[1].gpu_hours - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_burst_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"month,pricing_model,spend_usd\n\
              2025-03-01,spot,2500\n",
        )
        .unwrap();
        let bursts = load_burst_records(file.path()).unwrap();
        assert_eq!(bursts.len(), 1);
        assert_eq!(bursts[0].pricing_model, "spot");
        assert!((bursts[0].spend_usd - 2500.0).abs() < f64::EPSILON);
    }
}
