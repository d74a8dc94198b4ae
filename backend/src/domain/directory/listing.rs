//! Assembled directory listing.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::AlumniRecord;

use super::filter::{DirectoryFilter, FilterOptions, apply_filters};

/// Whether a listing has anything to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ListingOutcome {
    /// At least one member matched.
    Results,
    /// The filtered view is empty; the caller should offer to clear filters.
    NoMatches,
}

/// Filtered view of a base snapshot with the option vocabularies.
///
/// Options are always derived from the base snapshot so a narrowing filter
/// never hides the choices needed to widen it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryListing {
    pub members: Vec<AlumniRecord>,
    /// Size of the base snapshot.
    pub total: usize,
    pub options: FilterOptions,
    pub filter: DirectoryFilter,
}

impl DirectoryListing {
    /// Recompute the listing from scratch.
    ///
    /// # Examples
    /// ```
    /// use alumni_backend::domain::directory::{DirectoryFilter, DirectoryListing, ListingOutcome};
    ///
    /// let listing = DirectoryListing::assemble(&[], DirectoryFilter::cleared());
    /// assert_eq!(listing.total, 0);
    /// assert_eq!(listing.outcome(), ListingOutcome::NoMatches);
    /// ```
    pub fn assemble(base: &[AlumniRecord], filter: DirectoryFilter) -> Self {
        Self {
            members: apply_filters(base, &filter),
            total: base.len(),
            options: FilterOptions::derive(base),
            filter,
        }
    }

    /// Number of members in the filtered view.
    pub fn matched(&self) -> usize {
        self.members.len()
    }

    pub fn outcome(&self) -> ListingOutcome {
        if self.members.is_empty() {
            ListingOutcome::NoMatches
        } else {
            ListingOutcome::Results
        }
    }
}
