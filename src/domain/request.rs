//! Request specifications for listing and export
//!
//! [`FilterSpec`], [`SortSpec`], and [`Selection`] are explicit, request-scoped
//! parameters. There is no process-wide sort or filter state; the pipeline is a
//! pure function of (catalog snapshot, filter, sort) and (view, selection).

use crate::domain::errors::ValidationError;
use crate::domain::ids::DocumentId;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive date range with independently optional endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Inclusive start date
    pub start: Option<NaiveDate>,
    /// Inclusive end date (extended to end-of-day when matching timestamps)
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Create a range from optional endpoints, validating their order
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDateRange`] when both endpoints are
    /// present and start is after end. The order is never silently swapped.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, ValidationError> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(ValidationError::InvalidDateRange { start: s, end: e });
            }
        }
        Ok(Self { start, end })
    }

    /// Whether any endpoint is set
    pub fn is_bounded(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Whether a timestamp falls inside the range (inclusive)
    ///
    /// The end date covers the whole day, i.e. `end` means `end 23:59:59`.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        if let Some(start) = self.start {
            let start_at = Utc.from_utc_datetime(&start.and_time(NaiveTime::MIN));
            if at < start_at {
                return false;
            }
        }
        if let Some(end) = self.end {
            let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
            let end_at = Utc.from_utc_datetime(&end.and_time(end_of_day));
            if at > end_at {
                return false;
            }
        }
        true
    }
}

/// Filter parameters for a catalog listing or export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Case- and accent-insensitive substring matched against the display name
    pub name_contains: Option<String>,

    /// Status to match; `None` defaults to finalized documents
    pub status: Option<crate::domain::DocumentStatus>,

    /// Vault label to match (case-insensitive equality)
    pub vault: Option<String>,

    /// Inclusive last-signature date range
    pub signed: DateRange,
}

impl FilterSpec {
    /// Validate the filter before any catalog access
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDateRange`] for an inverted range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        // DateRange::new re-checks the invariant for specs built literally.
        DateRange::new(self.signed.start, self.signed.end).map(|_| ())
    }

    /// Effective status predicate: explicit value or the finalized default
    pub fn effective_status(&self) -> crate::domain::DocumentStatus {
        self.status
            .clone()
            .unwrap_or(crate::domain::DocumentStatus::Finalized)
    }
}

/// Orderable fields of a document record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Last-signature timestamp
    SignedAt,
    /// Display name
    Name,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort key for the catalog view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field to order by
    pub field: SortField,
    /// Direction to order in
    pub direction: SortDirection,
}

impl Default for SortSpec {
    /// Newest signatures first
    fn default() -> Self {
        Self {
            field: SortField::SignedAt,
            direction: SortDirection::Descending,
        }
    }
}

/// A set of document identifiers chosen for export
///
/// Construction rejects empty selections; duplicates collapse. Membership
/// against the current view is checked by the selection resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    ids: Vec<DocumentId>,
}

impl Selection {
    /// Build a selection from caller-supplied identifiers
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptySelection`] when no identifiers remain
    /// after deduplication.
    pub fn new(ids: impl IntoIterator<Item = DocumentId>) -> Result<Self, ValidationError> {
        let mut seen = std::collections::HashSet::new();
        let ids: Vec<DocumentId> = ids.into_iter().filter(|id| seen.insert(id.clone())).collect();
        if ids.is_empty() {
            return Err(ValidationError::EmptySelection);
        }
        Ok(Self { ids })
    }

    /// The selected identifiers, deduplicated, in submission order
    pub fn ids(&self) -> &[DocumentId] {
        &self.ids
    }

    /// Number of selected identifiers
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the selection is empty (never true for a constructed value)
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Membership test
    pub fn contains(&self, id: &DocumentId) -> bool {
        self.ids.iter().any(|candidate| candidate == id)
    }
}
