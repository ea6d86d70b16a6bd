//! Core domain types for signpack
//!
//! This module contains the domain model shared by the catalog pipeline,
//! the archive batcher, and the signing-service adapter: identifiers,
//! document records, request specifications, and the error hierarchy.

pub mod document;
pub mod errors;
pub mod ids;
pub mod request;
pub mod result;

pub use document::{DocumentRecord, DocumentStatus, Vault};
pub use errors::{SignPackError, SignServiceError, ValidationError};
pub use ids::{DocumentId, VaultId};
pub use request::{DateRange, FilterSpec, Selection, SortDirection, SortField, SortSpec};
pub use result::Result;
