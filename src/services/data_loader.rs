//! Dataset loading facade
//!
//! Resolves the on-disk layout (sandbox exports under `data/`, seed tables
//! under `seeds/`) and loads every dataset the aggregators need. Missing
//! files are normal in a fresh sandbox and yield empty datasets; unreadable
//! files warn and fall back to empty rather than aborting a report run.

use std::path::{Path, PathBuf};

use crate::datasets::{
    load_burst_records, load_cluster_costs, load_cost_records, load_dimensions, load_forecast,
    load_job_records, CostRecord, ForecastRecord, HpcBurstRecord, HpcClusterCost, HpcJobRecord,
    ServiceDimension,
};
use crate::types::Result;

pub const FOCUS_FILE: &str = "data/focus_sandbox.csv";
pub const FORECAST_FILE: &str = "seeds/forecast.csv";
pub const DIMENSIONS_FILE: &str = "seeds/tbm_dimensions.csv";
pub const HPC_JOBS_FILE: &str = "data/hpc_job_usage.csv";
pub const HPC_COST_FILE: &str = "data/hpc_cluster_cost.csv";
pub const HPC_BURST_FILE: &str = "data/hpc_cloud_burst.csv";

/// Everything a full report run needs, loaded in one pass.
#[derive(Debug, Default)]
pub struct LoadedDatasets {
    pub records: Vec<CostRecord>,
    pub forecast: Vec<ForecastRecord>,
    pub dimensions: Vec<ServiceDimension>,
    pub hpc_jobs: Vec<HpcJobRecord>,
    pub hpc_costs: Vec<HpcClusterCost>,
    pub hpc_burst: Vec<HpcBurstRecord>,
}

pub struct DataLoaderService {
    data_dir: PathBuf,
}

impl DataLoaderService {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn cost_records(&self) -> Vec<CostRecord> {
        self.load_or_empty(FOCUS_FILE, load_cost_records)
    }

    pub fn forecast(&self) -> Vec<ForecastRecord> {
        self.load_or_empty(FORECAST_FILE, load_forecast)
    }

    pub fn dimensions(&self) -> Vec<ServiceDimension> {
        self.load_or_empty(DIMENSIONS_FILE, load_dimensions)
    }

    pub fn hpc_jobs(&self) -> Vec<HpcJobRecord> {
        self.load_or_empty(HPC_JOBS_FILE, load_job_records)
    }

    pub fn hpc_costs(&self) -> Vec<HpcClusterCost> {
        self.load_or_empty(HPC_COST_FILE, load_cluster_costs)
    }

    pub fn hpc_burst(&self) -> Vec<HpcBurstRecord> {
        self.load_or_empty(HPC_BURST_FILE, load_burst_records)
    }

    /// Load every dataset, fanning the independent reads across the rayon
    /// pool.
    pub fn load_all(&self) -> LoadedDatasets {
        let ((records, forecast), (dimensions, (hpc_jobs, (hpc_costs, hpc_burst)))) = rayon::join(
            || rayon::join(|| self.cost_records(), || self.forecast()),
            || {
                rayon::join(
                    || self.dimensions(),
                    || {
                        rayon::join(
                            || self.hpc_jobs(),
                            || rayon::join(|| self.hpc_costs(), || self.hpc_burst()),
                        )
                    },
                )
            },
        );
        LoadedDatasets {
            records,
            forecast,
            dimensions,
            hpc_jobs,
            hpc_costs,
            hpc_burst,
        }
    }

    fn load_or_empty<T, F>(&self, relative: &str, load: F) -> Vec<T>
    where
        F: Fn(&Path) -> Result<Vec<T>>,
    {
        let path = self.data_dir.join(relative);
        if !path.exists() {
            return Vec::new();
        }
        match load(&path) {
            Ok(records) => records,
            Err(e) => {
                eprintln!("[tbmtrack] Warning: failed to read {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }
}
