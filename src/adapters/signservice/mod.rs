//! Signing-service adapter
//!
//! Catalog and content retrieval from the external e-signature service.
//! The [`vendor::SignServiceVendor`] trait is the seam the core depends on;
//! [`client::SignServiceClient`] selects and wraps a concrete vendor.

pub mod client;
pub mod models;
pub mod vendor;

pub use client::SignServiceClient;
pub use vendor::{D4SignVendor, SignServiceVendor};
