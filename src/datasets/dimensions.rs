//! TBM service dimension reference dataset
//!
//! Only `service_name` participates in hygiene scoring; any additional
//! taxonomy columns in the seed file are ignored.

use serde::Deserialize;
use std::path::Path;

use super::read_records;
use crate::types::Result;

/// One mapped service name from the TBM dimension seed.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServiceDimension {
    #[serde(default)]
    pub service_name: String,
}

/// Load the service dimension reference table.
pub fn load_dimensions(path: &Path) -> Result<Vec<ServiceDimension>> {
    read_records(path, None)
}
