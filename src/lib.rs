//! # Cricket Dash
//!
//! Upload a cricket matches file and a ball-by-ball deliveries file, then
//! browse aggregate statistics over them.
//!
//! ## Architecture
//!
//! - **models**: Typed tables, match/delivery records, summary types
//! - **ingest**: Parsing, cleaning and validation of the uploaded files
//! - **calculate**: Aggregation routines, one per view
//! - **storage**: In-memory sessions and CSV export
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod ingest;
pub mod models;
pub mod storage;

pub use models::*;
