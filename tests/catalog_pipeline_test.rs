//! Integration tests for the catalog view pipeline
//!
//! Property-style checks over randomly generated catalogs: filtering always
//! yields a subset satisfying every predicate, sorting is deterministic with
//! the identifier tiebreak, and selection resolution is all-or-nothing.

use chrono::{TimeZone, Utc};
use fake::faker::company::en::Buzzword;
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use signpack::core::catalog::{apply_filter, build_view, resolve_selection};
use signpack::domain::{
    DateRange, DocumentId, DocumentRecord, DocumentStatus, FilterSpec, Selection, SortDirection,
    SortField, SortSpec, ValidationError,
};

fn random_catalog(seed: u64, size: usize) -> Vec<DocumentRecord> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..size)
        .map(|i| {
            let word: String = Buzzword().fake_with_rng(&mut rng);
            let status = match rng.gen_range(0..4) {
                0 | 1 => DocumentStatus::Finalized,
                2 => DocumentStatus::Pending,
                _ => DocumentStatus::Canceled,
            };
            let signed_at = if rng.gen_bool(0.8) {
                let day = rng.gen_range(1..=28);
                let month = rng.gen_range(1..=12);
                Some(Utc.with_ymd_and_hms(2025, month, day, 12, 0, 0).unwrap())
            } else {
                None
            };

            DocumentRecord {
                id: DocumentId::new(format!("doc-{i:04}")).unwrap(),
                display_name: format!("{word} {i}"),
                original_name: format!("{word} {i}.pdf"),
                signed_at,
                status,
                vault_id: None,
                vault_name: None,
            }
        })
        .collect()
}

#[test]
fn test_filtered_view_is_subset_satisfying_all_predicates() {
    let catalog = random_catalog(7, 200);
    let spec = FilterSpec {
        signed: DateRange {
            start: Some(chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
            end: Some(chrono::NaiveDate::from_ymd_opt(2025, 9, 30).unwrap()),
        },
        ..Default::default()
    };

    let view = apply_filter(&catalog, &spec).unwrap();

    assert!(view.len() <= catalog.len());
    for record in &view {
        assert_eq!(record.status, DocumentStatus::Finalized);
        let at = record.signed_at.expect("bounded range admits no missing timestamps");
        assert!(spec.signed.contains(at));
        assert!(catalog.iter().any(|c| c.id == record.id));
    }

    // Nothing that satisfies the predicates was dropped.
    let expected = catalog
        .iter()
        .filter(|r| r.status == DocumentStatus::Finalized)
        .filter(|r| r.signed_at.map(|at| spec.signed.contains(at)).unwrap_or(false))
        .count();
    assert_eq!(view.len(), expected);
}

#[test]
fn test_sorted_view_is_totally_ordered_with_id_tiebreak() {
    let catalog = random_catalog(11, 150);

    for (field, direction) in [
        (SortField::SignedAt, SortDirection::Descending),
        (SortField::SignedAt, SortDirection::Ascending),
        (SortField::Name, SortDirection::Ascending),
        (SortField::Name, SortDirection::Descending),
    ] {
        let spec = SortSpec { field, direction };
        let view = build_view(&catalog, &FilterSpec::default(), &spec).unwrap();

        for pair in view.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            match field {
                SortField::SignedAt => {
                    match (a.signed_at, b.signed_at) {
                        (Some(at_a), Some(at_b)) => match direction {
                            SortDirection::Ascending => assert!(at_a <= at_b),
                            SortDirection::Descending => assert!(at_a >= at_b),
                        },
                        // Missing timestamps always trail.
                        (None, Some(_)) => panic!("record without timestamp sorted first"),
                        _ => {}
                    }
                    if a.signed_at == b.signed_at {
                        assert!(a.id < b.id);
                    }
                }
                SortField::Name => {
                    // Generated names are ASCII, so lowercasing matches the
                    // pipeline's folding.
                    let (fa, fb) = (a.display_name.to_lowercase(), b.display_name.to_lowercase());
                    match direction {
                        SortDirection::Ascending => assert!(fa <= fb),
                        SortDirection::Descending => assert!(fa >= fb),
                    }
                    if fa == fb {
                        assert!(a.id < b.id);
                    }
                }
            }
        }
    }
}

#[test]
fn test_same_inputs_always_produce_same_view() {
    let catalog = random_catalog(23, 100);
    let spec = SortSpec::default();

    let first = build_view(&catalog, &FilterSpec::default(), &spec).unwrap();
    let second = build_view(&catalog, &FilterSpec::default(), &spec).unwrap();

    let ids = |view: &[DocumentRecord]| {
        view.iter().map(|r| r.id.as_str().to_string()).collect::<Vec<_>>()
    };
    assert_eq!(ids(&first), ids(&second));
}

#[test]
fn test_empty_view_is_not_an_error() {
    let catalog = random_catalog(3, 50);
    let spec = FilterSpec {
        name_contains: Some("no-document-is-called-this".to_string()),
        ..Default::default()
    };

    let view = build_view(&catalog, &spec, &SortSpec::default()).unwrap();
    assert!(view.is_empty());
}

#[test]
fn test_inverted_range_never_reaches_filtering() {
    let catalog = random_catalog(5, 50);
    let spec = FilterSpec {
        signed: DateRange {
            start: Some(chrono::NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()),
            end: Some(chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
        },
        ..Default::default()
    };

    let result = build_view(&catalog, &spec, &SortSpec::default());
    assert!(matches!(
        result,
        Err(ValidationError::InvalidDateRange { .. })
    ));
}

#[test]
fn test_selection_resolution_keeps_view_order() {
    let catalog = random_catalog(13, 80);
    let view = build_view(&catalog, &FilterSpec::default(), &SortSpec::default()).unwrap();
    assert!(view.len() >= 3, "seed must produce a non-trivial view");

    // Select every other view entry, supplied in reversed order.
    let mut picked: Vec<DocumentId> =
        view.iter().step_by(2).map(|r| r.id.clone()).collect();
    picked.reverse();

    let selection = Selection::new(picked).unwrap();
    let resolved = resolve_selection(&view, &selection).unwrap();

    let expected: Vec<&str> = view.iter().step_by(2).map(|r| r.id.as_str()).collect();
    let actual: Vec<&str> = resolved.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_selection_with_unknown_id_is_rejected() {
    let catalog = random_catalog(17, 40);
    let view = build_view(&catalog, &FilterSpec::default(), &SortSpec::default()).unwrap();

    let mut ids: Vec<DocumentId> = view.iter().take(2).map(|r| r.id.clone()).collect();
    ids.push(DocumentId::new("doc-9999").unwrap());

    let selection = Selection::new(ids).unwrap();
    let result = resolve_selection(&view, &selection);

    match result {
        Err(ValidationError::DocumentNotInView(id)) => assert_eq!(id.as_str(), "doc-9999"),
        other => panic!("Expected DocumentNotInView, got {other:?}"),
    }
}

#[test]
fn test_empty_selection_is_rejected_at_construction() {
    let result = Selection::new(Vec::new());
    assert!(matches!(result, Err(ValidationError::EmptySelection)));
}

#[test]
fn test_selection_deduplicates_repeated_ids() {
    let ids = vec![
        DocumentId::new("doc-1").unwrap(),
        DocumentId::new("doc-1").unwrap(),
        DocumentId::new("doc-2").unwrap(),
    ];

    let selection = Selection::new(ids).unwrap();
    assert_eq!(selection.len(), 2);
}
