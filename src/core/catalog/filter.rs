//! Catalog filtering
//!
//! Applies the [`FilterSpec`] predicates to a catalog snapshot. Matching is
//! case-insensitive and accent-insensitive for names and vault labels, so
//! "relatório" and "RELATORIO" find the same documents.

use crate::domain::errors::ValidationError;
use crate::domain::{DocumentRecord, FilterSpec};
use deunicode::deunicode;

/// Fold a string for comparison: strip accents, lowercase
fn fold(s: &str) -> String {
    deunicode(s).to_lowercase()
}

/// Filter a catalog snapshot
///
/// Every returned record satisfies every specified predicate: effective
/// status (finalized when unspecified), folded name substring, vault label
/// or id, and inclusive signature date range. Records without a signature
/// timestamp never match a bounded date range.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDateRange`] when the range is inverted.
pub fn apply_filter(
    catalog: &[DocumentRecord],
    spec: &FilterSpec,
) -> Result<Vec<DocumentRecord>, ValidationError> {
    spec.validate()?;

    let status = spec.effective_status();
    let needle = spec.name_contains.as_deref().map(fold);
    let vault = spec.vault.as_deref().map(fold);

    let view = catalog
        .iter()
        .filter(|record| record.status == status)
        .filter(|record| match &needle {
            Some(needle) => fold(&record.display_name).contains(needle.as_str()),
            None => true,
        })
        .filter(|record| match &vault {
            Some(vault) => {
                let name_matches = record
                    .vault_name
                    .as_deref()
                    .map(|name| fold(name) == *vault)
                    .unwrap_or(false);
                let id_matches = record
                    .vault_id
                    .as_ref()
                    .map(|id| id.as_str() == spec.vault.as_deref().unwrap_or_default())
                    .unwrap_or(false);
                name_matches || id_matches
            }
            None => true,
        })
        .filter(|record| {
            if !spec.signed.is_bounded() {
                return true;
            }
            match record.signed_at {
                Some(at) => spec.signed.contains(at),
                None => false,
            }
        })
        .cloned()
        .collect();

    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{DocumentId, VaultId};
    use crate::domain::request::DateRange;
    use crate::domain::DocumentStatus;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn record(id: &str, name: &str, status: DocumentStatus) -> DocumentRecord {
        DocumentRecord {
            id: DocumentId::new(id).unwrap(),
            display_name: name.to_string(),
            original_name: format!("{name}.pdf"),
            signed_at: None,
            status,
            vault_id: None,
            vault_name: None,
        }
    }

    fn signed(mut r: DocumentRecord, y: i32, m: u32, d: u32) -> DocumentRecord {
        r.signed_at = Some(Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap());
        r
    }

    #[test]
    fn test_default_filter_keeps_finalized_only() {
        let catalog = vec![
            record("a", "Alpha", DocumentStatus::Finalized),
            record("b", "Beta", DocumentStatus::Pending),
        ];

        let view = apply_filter(&catalog, &FilterSpec::default()).unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id.as_str(), "a");
    }

    #[test]
    fn test_explicit_status_filter() {
        let catalog = vec![
            record("a", "Alpha", DocumentStatus::Finalized),
            record("b", "Beta", DocumentStatus::Pending),
        ];

        let spec = FilterSpec {
            status: Some(DocumentStatus::Pending),
            ..Default::default()
        };
        let view = apply_filter(&catalog, &spec).unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id.as_str(), "b");
    }

    #[test]
    fn test_name_filter_is_accent_and_case_insensitive() {
        let catalog = vec![
            record("a", "Relatório Mensal", DocumentStatus::Finalized),
            record("b", "Contrato", DocumentStatus::Finalized),
        ];

        let spec = FilterSpec {
            name_contains: Some("RELATORIO".to_string()),
            ..Default::default()
        };
        let view = apply_filter(&catalog, &spec).unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id.as_str(), "a");
    }

    #[test]
    fn test_vault_filter_matches_label_or_id() {
        let mut a = record("a", "Alpha", DocumentStatus::Finalized);
        a.vault_id = Some(VaultId::new("vault-1").unwrap());
        a.vault_name = Some("Fundo Ações".to_string());
        let b = record("b", "Beta", DocumentStatus::Finalized);

        let by_label = FilterSpec {
            vault: Some("fundo acoes".to_string()),
            ..Default::default()
        };
        let view = apply_filter(&[a.clone(), b.clone()], &by_label).unwrap();
        assert_eq!(view.len(), 1);

        let by_id = FilterSpec {
            vault: Some("vault-1".to_string()),
            ..Default::default()
        };
        let view = apply_filter(&[a, b], &by_id).unwrap();
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn test_date_range_filter() {
        let catalog = vec![
            signed(record("a", "Alpha", DocumentStatus::Finalized), 2025, 1, 5),
            signed(record("b", "Beta", DocumentStatus::Finalized), 2025, 2, 5),
            record("c", "Gamma", DocumentStatus::Finalized), // no timestamp
        ];

        let spec = FilterSpec {
            signed: DateRange {
                start: Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
                end: Some(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()),
            },
            ..Default::default()
        };

        let view = apply_filter(&catalog, &spec).unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id.as_str(), "a");
    }

    #[test]
    fn test_inverted_range_rejected_before_filtering() {
        let spec = FilterSpec {
            signed: DateRange {
                start: Some(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()),
                end: Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
            },
            ..Default::default()
        };

        let result = apply_filter(&[], &spec);
        assert!(matches!(
            result,
            Err(ValidationError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_empty_catalog_yields_empty_view() {
        let view = apply_filter(&[], &FilterSpec::default()).unwrap();
        assert!(view.is_empty());
    }
}
