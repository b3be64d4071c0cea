//! Aggregation services for the TBM reports
//!
//! Each service is a pure pass over freshly loaded records. Normalization
//! rules deliberately differ between services (see the module docs of
//! `spend`, `chargeback`, and `variance`); do not unify them.

pub mod chargeback;
pub mod data_loader;
pub mod exec_summary;
pub mod hpc;
pub mod hygiene;
pub mod rollup;
pub mod spend;
pub mod tags;
pub mod variance;

pub use data_loader::DataLoaderService;

/// Uppercase the first character only; interior casing is preserved.
/// "sales" -> "Sales", "webShop" -> "WebShop".
pub fn title_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
