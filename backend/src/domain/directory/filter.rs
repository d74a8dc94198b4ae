//! Pure filtering over a loaded alumni snapshot.
//!
//! Every function here is a function of `(records, filter)` only. Results are
//! stable subsequences of the input and are always recomputed from the base
//! snapshot, never from a previous filtered view.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::AlumniRecord;

/// The three independent directory constraints.
///
/// An empty string imposes no restriction. A whitespace-only search term is a
/// real constraint and only matches names containing that whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryFilter {
    /// Case-insensitive substring matched against `name`.
    #[serde(default)]
    pub search_term: String,
    /// Exact batch value.
    #[serde(default)]
    pub batch: String,
    /// Exact profession value.
    #[serde(default)]
    pub profession: String,
}

impl DirectoryFilter {
    /// Build a filter from its three constraints.
    pub fn new(
        search_term: impl Into<String>,
        batch: impl Into<String>,
        profession: impl Into<String>,
    ) -> Self {
        Self {
            search_term: search_term.into(),
            batch: batch.into(),
            profession: profession.into(),
        }
    }

    /// Filter with every constraint cleared.
    pub fn cleared() -> Self {
        Self::default()
    }

    /// True when no constraint is set.
    pub fn is_unconstrained(&self) -> bool {
        self.search_term.is_empty() && self.batch.is_empty() && self.profession.is_empty()
    }

    /// Whether `record` satisfies all three constraints.
    ///
    /// # Examples
    /// ```
    /// use alumni_backend::domain::directory::DirectoryFilter;
    ///
    /// let filter = DirectoryFilter::new("SARAH", "", "");
    /// assert!(filter.matches_name("Dr. Sarah Johnson"));
    /// ```
    pub fn matches(&self, record: &AlumniRecord) -> bool {
        self.matches_name(record.name.as_ref())
            && exact(&self.batch, record.batch.as_deref())
            && exact(&self.profession, record.profession.as_deref())
    }

    /// Search-term half of [`DirectoryFilter::matches`].
    pub fn matches_name(&self, name: &str) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        name.to_lowercase()
            .contains(&self.search_term.to_lowercase())
    }
}

fn exact(selected: &str, value: Option<&str>) -> bool {
    selected.is_empty() || value == Some(selected)
}

/// Lazily yield the records matching `filter`, in input order.
pub fn filter_records<'a>(
    records: &'a [AlumniRecord],
    filter: &'a DirectoryFilter,
) -> impl Iterator<Item = &'a AlumniRecord> + 'a {
    records.iter().filter(move |record| filter.matches(record))
}

/// Owned stable subsequence of `records` matching `filter`.
pub fn apply_filters(records: &[AlumniRecord], filter: &DirectoryFilter) -> Vec<AlumniRecord> {
    filter_records(records, filter).cloned().collect()
}

/// Distinct batch values, sorted ascending. Absent values are skipped.
pub fn derive_batch_options(records: &[AlumniRecord]) -> Vec<String> {
    distinct(records.iter().filter_map(|record| record.batch.as_deref()))
}

/// Distinct profession values, sorted ascending. Absent values are skipped.
pub fn derive_profession_options(records: &[AlumniRecord]) -> Vec<String> {
    distinct(records.iter().filter_map(|record| record.profession.as_deref()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Option vocabularies offered by the directory dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub batches: Vec<String>,
    pub professions: Vec<String>,
}

impl FilterOptions {
    /// Derive both vocabularies from the base snapshot.
    pub fn derive(records: &[AlumniRecord]) -> Self {
        Self {
            batches: derive_batch_options(records),
            professions: derive_profession_options(records),
        }
    }
}
