//! Core data models for the dashboard.

mod dataset;
mod ids;
mod records;
mod stats;
mod table;

pub use dataset::*;
pub use ids::*;
pub use records::*;
pub use stats::*;
pub use table::*;
