//! TBM tower rollup
//!
//! Folds cloud spend into (cost pool, tower, service, application) buckets
//! via a fixed service -> tower map, and HPC cluster cost into a single
//! shared on-prem bucket.

use std::collections::BTreeMap;

use crate::datasets::{CostRecord, HpcClusterCost};
use crate::services::tags::decode_tags;
use crate::services::title_first;
use crate::types::RollupRow;

/// FOCUS service -> TBM tower; anything unlisted lands in Other.
pub const SERVICE_TOWERS: [(&str, &str); 4] = [
    ("compute", "Compute"),
    ("storage", "Storage"),
    ("db", "Database"),
    ("network", "Network"),
];

/// Application bucket for cost with no application tag.
pub const SHARED_APPLICATION: &str = "Shared";

/// Roll cloud and HPC cost up into tower buckets, sorted by bucket key.
pub fn tower_rollup(records: &[CostRecord], cluster_costs: &[HpcClusterCost]) -> Vec<RollupRow> {
    let mut buckets: BTreeMap<(String, String, String, String), f64> = BTreeMap::new();

    for record in records {
        let tower = SERVICE_TOWERS
            .iter()
            .find(|(service, _)| record.service.eq_ignore_ascii_case(service))
            .map(|(_, tower)| *tower)
            .unwrap_or("Other");
        let tags = decode_tags(&record.tags);
        let application = if tags.application.is_empty() {
            SHARED_APPLICATION.to_string()
        } else {
            title_first(&tags.application)
        };
        let key = (
            "Cloud".to_string(),
            tower.to_string(),
            title_first(&record.service),
            application,
        );
        *buckets.entry(key).or_insert(0.0) += record.cost_usd;
    }

    if !cluster_costs.is_empty() {
        let hpc_total: f64 = cluster_costs.iter().map(|c| c.total_cost_usd).sum();
        let key = (
            "On-Prem".to_string(),
            "HPC".to_string(),
            "Cluster".to_string(),
            SHARED_APPLICATION.to_string(),
        );
        *buckets.entry(key).or_insert(0.0) += hpc_total;
    }

    buckets
        .into_iter()
        .map(|((cost_pool, tower, service, application), cost)| RollupRow {
            cost_pool,
            tower,
            service,
            application,
            monthly_cost: cost.round() as i64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(service: &str, cost: f64, tags: &str) -> CostRecord {
        CostRecord {
            usage_date: "2025-03-02".to_string(),
            service: service.to_string(),
            cost_usd: cost,
            usage_qty: 0.0,
            tags: tags.to_string(),
        }
    }

    #[test]
    fn test_rollup_maps_known_services_to_towers() {
        let records = vec![
            make_record("compute", 100.0, r#"{"app":"crm"}"#),
            make_record("storage", 50.0, r#"{"app":"crm"}"#),
            make_record("db", 25.0, r#"{"app":"crm"}"#),
            make_record("network", 10.0, r#"{"app":"crm"}"#),
        ];
        let rows = tower_rollup(&records, &[]);
        let towers: Vec<&str> = rows.iter().map(|r| r.tower.as_str()).collect();
        assert!(towers.contains(&"Compute"));
        assert!(towers.contains(&"Storage"));
        assert!(towers.contains(&"Database"));
        assert!(towers.contains(&"Network"));
    }

    #[test]
    fn test_rollup_unknown_service_lands_in_other() {
        let rows = tower_rollup(&[make_record("ml-platform", 42.0, "")], &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tower, "Other");
        assert_eq!(rows[0].service, "Ml-platform");
        assert_eq!(rows[0].application, "Shared");
    }

    #[test]
    fn test_rollup_every_record_lands_in_exactly_one_bucket() {
        let records = vec![
            make_record("compute", 100.0, r#"{"app":"crm"}"#),
            make_record("compute", 40.0, r#"{"app":"crm"}"#),
            make_record("compute", 7.0, ""),
        ];
        let rows = tower_rollup(&records, &[]);
        let total: i64 = rows.iter().map(|r| r.monthly_cost).sum();
        assert_eq!(total, 147);
    }

    #[test]
    fn test_rollup_hpc_cost_in_shared_on_prem_bucket() {
        let costs = vec![
            HpcClusterCost {
                month: "2025-02-01".into(),
                total_cost_usd: 180000.0,
            },
            HpcClusterCost {
                month: "2025-03-01".into(),
                total_cost_usd: 190000.0,
            },
        ];
        let rows = tower_rollup(&[], &costs);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cost_pool, "On-Prem");
        assert_eq!(rows[0].tower, "HPC");
        assert_eq!(rows[0].service, "Cluster");
        assert_eq!(rows[0].application, "Shared");
        assert_eq!(rows[0].monthly_cost, 370000);
    }

    #[test]
    fn test_rollup_no_hpc_bucket_without_cluster_costs() {
        let rows = tower_rollup(&[make_record("compute", 1.0, "")], &[]);
        assert!(rows.iter().all(|r| r.cost_pool == "Cloud"));
    }
}
