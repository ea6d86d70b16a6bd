//! Document catalog records
//!
//! A [`DocumentRecord`] is one row of the catalog snapshot fetched from the
//! signing service. Records are immutable for the lifetime of a request; the
//! catalog is re-fetched per request and never persisted locally.

use crate::domain::ids::{DocumentId, VaultId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Signature lifecycle status of a document
///
/// The service defines its own status vocabulary; the variants cover the
/// statuses the pipeline cares about and `Other` carries anything else
/// verbatim so no information is lost.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Awaiting one or more signatures
    Pending,
    /// All parties signed; the document is final
    Finalized,
    /// Signature flow was cancelled on the service side
    Canceled,
    /// Any other service-defined status, kept verbatim
    Other(String),
}

impl DocumentStatus {
    /// Map a service status label to a status value
    ///
    /// Accepts both the service's Portuguese labels and English spellings.
    pub fn from_service_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "finalizado" | "finalized" => DocumentStatus::Finalized,
            "em andamento" | "aguardando assinaturas" | "pending" => DocumentStatus::Pending,
            "cancelado" | "canceled" | "cancelled" => DocumentStatus::Canceled,
            _ => DocumentStatus::Other(label.trim().to_string()),
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentStatus::Pending => write!(f, "pending"),
            DocumentStatus::Finalized => write!(f, "finalized"),
            DocumentStatus::Canceled => write!(f, "canceled"),
            DocumentStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for DocumentStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_service_label(s))
    }
}

/// A vault ("safe") grouping documents on the service side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    /// Vault identifier
    pub id: VaultId,
    /// Human-facing vault name
    pub name: String,
}

/// One document in a catalog snapshot
///
/// The display name is cleaned for presentation (date prefix and embedded
/// price removed); the original name is kept verbatim and treated as an
/// opaque string by the filter engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Unique identifier within the snapshot
    pub id: DocumentId,

    /// Cleaned display name
    pub display_name: String,

    /// Original name as reported by the service, uninterpreted
    pub original_name: String,

    /// Timestamp of the last signature, when known
    pub signed_at: Option<DateTime<Utc>>,

    /// Current signature status
    pub status: DocumentStatus,

    /// Owning vault, when the service reports one
    pub vault_id: Option<VaultId>,

    /// Owning vault display name, when known
    pub vault_name: Option<String>,
}

impl DocumentRecord {
    /// Filename to use for this document inside an archive
    ///
    /// Prefers the original name so the user can cross-reference entries
    /// with the service UI; falls back to the identifier.
    pub fn archive_entry_name(&self) -> String {
        if self.original_name.trim().is_empty() {
            format!("{}.pdf", self.id)
        } else {
            self.original_name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Finalizado", DocumentStatus::Finalized; "portuguese finalized")]
    #[test_case("finalized", DocumentStatus::Finalized; "english finalized")]
    #[test_case("Em andamento", DocumentStatus::Pending; "portuguese pending")]
    #[test_case("Cancelado", DocumentStatus::Canceled; "portuguese canceled")]
    fn test_status_from_service_label(label: &str, expected: DocumentStatus) {
        assert_eq!(DocumentStatus::from_service_label(label), expected);
    }

    #[test]
    fn test_status_unknown_kept_verbatim() {
        let status = DocumentStatus::from_service_label("Arquivado");
        assert_eq!(status, DocumentStatus::Other("Arquivado".to_string()));
        assert_eq!(status.to_string(), "Arquivado");
    }

    #[test]
    fn test_archive_entry_name_prefers_original() {
        let record = DocumentRecord {
            id: DocumentId::new("doc-1").unwrap(),
            display_name: "Contract Alpha".to_string(),
            original_name: "20250110 Contract Alpha R$ 1.200,00.pdf".to_string(),
            signed_at: None,
            status: DocumentStatus::Finalized,
            vault_id: None,
            vault_name: None,
        };
        assert_eq!(
            record.archive_entry_name(),
            "20250110 Contract Alpha R$ 1.200,00.pdf"
        );
    }

    #[test]
    fn test_archive_entry_name_falls_back_to_id() {
        let record = DocumentRecord {
            id: DocumentId::new("doc-1").unwrap(),
            display_name: String::new(),
            original_name: "  ".to_string(),
            signed_at: None,
            status: DocumentStatus::Finalized,
            vault_id: None,
            vault_name: None,
        };
        assert_eq!(record.archive_entry_name(), "doc-1.pdf");
    }
}
