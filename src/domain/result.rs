//! Result type alias for signpack operations

use crate::domain::errors::SignPackError;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, SignPackError>;
