//! Business logic
//!
//! - [`catalog`] - filtering, sorting, and selection over a catalog snapshot
//! - [`export`] - archive batching, reporting, and export orchestration

pub mod catalog;
pub mod export;
