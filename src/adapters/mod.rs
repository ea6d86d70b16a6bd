//! External integrations
//!
//! Adapters wrap external services behind traits so the core pipeline can be
//! exercised without network access.

pub mod signservice;
