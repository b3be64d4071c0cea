//! Report rendering
//!
//! Turns report structures into JSON (default) or CSV and writes them to
//! stdout or a file. CSV is only offered for row-shaped reports; nested
//! summaries stay JSON.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::types::{ChargebackReport, Result, TbmError};

pub fn to_json<T: Serialize>(report: &T) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(|e| TbmError::Parse(e.to_string()))
}

pub fn rows_to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| TbmError::Parse(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TbmError::Parse(e.to_string()))
}

/// Chargeback CSV carries the unallocated remainder as a trailer row so the
/// column totals reconcile with the summary.
pub fn chargeback_to_csv(report: &ChargebackReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in &report.rows {
        writer.serialize(row)?;
    }
    let unallocated = report.summary.unallocated.to_string();
    writer.write_record(["—", "Unallocated", "", "", unallocated.as_str()])?;
    let bytes = writer
        .into_inner()
        .map_err(|e| TbmError::Parse(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TbmError::Parse(e.to_string()))
}

/// Write rendered output to `output` if given, stdout otherwise.
pub fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, rendered)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}
