//! TBM spend reporting core
//!
//! Loads FOCUS-style cost exports and planning seed tables, then aggregates
//! them into the reports a technology business management review needs:
//! normalized spend, service trends, variance vs plan, chargeback, tag
//! hygiene, tower rollups, HPC utilization and an executive summary.

pub mod cli;
pub mod datasets;
pub mod services;
pub mod types;
