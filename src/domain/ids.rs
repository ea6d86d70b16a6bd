//! Domain identifier types with validation
//!
//! Newtype wrappers for signing-service identifiers. Each type ensures
//! non-empty values and gives the compiler a way to keep document and
//! vault identifiers apart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Document identifier newtype wrapper
///
/// Unique within one catalog snapshot. The service issues opaque UUID-like
/// strings; no structure beyond non-emptiness is assumed.
///
/// # Examples
///
/// ```
/// use signpack::domain::ids::DocumentId;
/// use std::str::FromStr;
///
/// let id = DocumentId::from_str("f6c3a1d2-9e4b-47a8-b1aa-0d92f3c4e5a6").unwrap();
/// assert_eq!(id.as_str(), "f6c3a1d2-9e4b-47a8-b1aa-0d92f3c4e5a6");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a new DocumentId from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty or whitespace-only
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Document ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Vault identifier newtype wrapper
///
/// Identifies a vault (the service's "safe"/fund grouping of documents).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VaultId(String);

impl VaultId {
    /// Creates a new VaultId from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty or whitespace-only
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Vault ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for VaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VaultId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for VaultId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
