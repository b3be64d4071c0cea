//! Type definitions for tbmtrack

mod error;
mod reports;

pub use error::*;
pub use reports::*;
