mod render;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::services::{self, DataLoaderService};

/// TBM spend reporting from FOCUS sandbox exports and planning seeds
#[derive(Parser)]
#[command(name = "tbmtrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Root directory holding data/ and seeds/
    #[arg(long, global = true, default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ReportArgs {
    /// Output as CSV instead of JSON
    #[arg(long)]
    csv: bool,

    /// Write the report to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalized spend rows, one per cost record
    Spend {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Monthly spend totals per service
    Services {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Actual vs plan variance per month and application
    Variance {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Usage-based chargeback allocation
    Chargeback {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Tagging and dimension-mapping hygiene score
    Hygiene {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Share of records missing required tags
    Untagged {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// TBM tower rollup across cloud and HPC spend
    Rollup {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Monthly HPC cluster utilization
    HpcUtilization {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Latest-month HPC capacity summary
    HpcSummary {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Raw HPC cloud-burst spend records
    HpcBurst {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Executive summary across all datasets
    Summary {
        /// Write the report to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let loader = DataLoaderService::new(&self.data_dir);
        match self.command {
            Commands::Spend { report } => {
                let rows = services::spend::normalize_spend(&loader.cost_records());
                emit_rows(&rows, &report)?;
            }
            Commands::Services { report } => {
                let rows = services::spend::service_trends(&loader.cost_records());
                emit_rows(&rows, &report)?;
            }
            Commands::Variance { report } => {
                let rows =
                    services::variance::variance_report(&loader.cost_records(), &loader.forecast());
                emit_rows(&rows, &report)?;
            }
            Commands::Chargeback { report } => {
                let allocation = services::chargeback::allocate(&loader.cost_records());
                let rendered = if report.csv {
                    render::chargeback_to_csv(&allocation)?
                } else {
                    render::to_json(&allocation)?
                };
                render::emit(&rendered, report.output.as_deref())?;
            }
            Commands::Hygiene { report } => {
                let score = services::hygiene::score(&loader.cost_records(), &loader.dimensions());
                emit_single(&score, &report)?;
            }
            Commands::Untagged { report } => {
                let untagged = crate::types::UntaggedReport {
                    untagged_pct: services::hygiene::untagged_share(&loader.cost_records()),
                };
                emit_single(&untagged, &report)?;
            }
            Commands::Rollup { report } => {
                let rows =
                    services::rollup::tower_rollup(&loader.cost_records(), &loader.hpc_costs());
                emit_rows(&rows, &report)?;
            }
            Commands::HpcUtilization { report } => {
                let rows = services::hpc::utilization(&loader.hpc_jobs(), &loader.hpc_costs());
                emit_rows(&rows, &report)?;
            }
            Commands::HpcSummary { report } => {
                let summary = services::hpc::summary(
                    &loader.hpc_jobs(),
                    &loader.hpc_costs(),
                    &loader.hpc_burst(),
                );
                emit_single(&summary, &report)?;
            }
            Commands::HpcBurst { report } => {
                let rows = loader.hpc_burst();
                emit_rows(&rows, &report)?;
            }
            Commands::Summary { output } => {
                let datasets = loader.load_all();
                let summary = services::exec_summary::summarize(
                    &datasets.records,
                    &datasets.forecast,
                    &datasets.dimensions,
                );
                render::emit(&render::to_json(&summary)?, output.as_deref())?;
            }
        }
        Ok(())
    }
}

fn emit_rows<T: serde::Serialize>(rows: &[T], report: &ReportArgs) -> anyhow::Result<()> {
    let rendered = if report.csv {
        render::rows_to_csv(rows)?
    } else {
        render::to_json(&rows)?
    };
    render::emit(&rendered, report.output.as_deref())?;
    Ok(())
}

/// Flat single-struct reports render as JSON or a one-row CSV.
fn emit_single<T: serde::Serialize>(value: &T, report: &ReportArgs) -> anyhow::Result<()> {
    let rendered = if report.csv {
        render::rows_to_csv(std::slice::from_ref(value))?
    } else {
        render::to_json(value)?
    };
    render::emit(&rendered, report.output.as_deref())?;
    Ok(())
}
