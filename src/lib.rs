//! # Cricket Ledger
//!
//! A local cricket statistics tracker for a recreational cricket group.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, match days, matches, entries)
//! - **storage**: Filesystem data lake operations (JSONL)
//! - **stats**: Filter resolution, grouped aggregation, derived metrics
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod config;
pub mod models;
pub mod stats;
pub mod storage;

pub use models::*;
