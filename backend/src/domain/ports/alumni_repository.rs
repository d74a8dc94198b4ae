//! Record store gateway port.
//!
//! The gateway is the only path to the remote collection. Adapters translate
//! transport and storage failures into [`AlumniRepositoryError`] so the domain
//! can tell "store unreachable" apart from "store rejected the request".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{AlumniDraft, AlumniId, AlumniPatch, AlumniRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by record store adapters.
    pub enum AlumniRepositoryError {
        /// The store could not be reached or asked the caller to back off.
        Connection { message: String } =>
            "alumni store connection failed: {message}",
        /// The store rejected or failed to execute the operation.
        Query { message: String } =>
            "alumni store query failed: {message}",
        /// An update targeted an identifier with no record.
        NotFound { id: String } =>
            "alumni record {id} does not exist",
    }
}

/// Categorical field usable in an equality query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryField {
    Batch,
    Profession,
}

impl CategoryField {
    /// Field name as stored.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Batch => "batch",
            Self::Profession => "profession",
        }
    }

    /// Read this field from a record.
    pub fn value_of(self, record: &AlumniRecord) -> Option<&str> {
        match self {
            Self::Batch => record.batch.as_deref(),
            Self::Profession => record.profession.as_deref(),
        }
    }
}

/// Upper bound appended to a prefix to form the name range.
pub const NAME_PREFIX_SENTINEL: char = '\u{f8ff}';

/// Store-side search executed remotely.
///
/// Results are ordered by name. Name matching is a case-sensitive prefix
/// range, which is why the in-process engine stays authoritative for the
/// directory view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreQuery {
    /// Exact match on a categorical field.
    FieldEquals { field: CategoryField, value: String },
    /// `term <= name <= term + U+F8FF`.
    NamePrefix(String),
}

impl StoreQuery {
    /// Evaluate the query against a record the way the store does.
    ///
    /// # Examples
    /// ```
    /// use alumni_backend::domain::ports::StoreQuery;
    ///
    /// let query = StoreQuery::NamePrefix("Mic".into());
    /// assert!(query.matches_name("Michael Chen"));
    /// assert!(!query.matches_name("michael chen"));
    /// ```
    pub fn matches(&self, record: &AlumniRecord) -> bool {
        match self {
            Self::FieldEquals { field, value } => field.value_of(record) == Some(value.as_str()),
            Self::NamePrefix(_) => self.matches_name(record.name.as_ref()),
        }
    }

    /// Name-only half of [`StoreQuery::matches`].
    pub fn matches_name(&self, name: &str) -> bool {
        match self {
            Self::FieldEquals { .. } => true,
            Self::NamePrefix(term) => {
                let upper = format!("{term}{NAME_PREFIX_SENTINEL}");
                name >= term.as_str() && name <= upper.as_str()
            }
        }
    }
}

/// Port for the alumni collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlumniRepository: Send + Sync {
    /// Every record, ordered by name ascending.
    async fn list_all(&self) -> Result<Vec<AlumniRecord>, AlumniRepositoryError>;

    /// Fetch one record; `None` when no record has this id.
    async fn find_by_id(&self, id: &AlumniId)
    -> Result<Option<AlumniRecord>, AlumniRepositoryError>;

    /// Insert a record, letting the store assign id and timestamps.
    async fn create(&self, draft: &AlumniDraft) -> Result<AlumniRecord, AlumniRepositoryError>;

    /// Merge provided fields into an existing record.
    ///
    /// Returns [`AlumniRepositoryError::NotFound`] when the id is unknown.
    async fn update(&self, id: &AlumniId, patch: &AlumniPatch) -> Result<(), AlumniRepositoryError>;

    /// Remove a record. Deleting a missing id succeeds.
    async fn delete(&self, id: &AlumniId) -> Result<(), AlumniRepositoryError>;

    /// Run a store-side search.
    async fn query(&self, query: &StoreQuery) -> Result<Vec<AlumniRecord>, AlumniRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Mic", "Michael Chen", true)]
    #[case("Michael Chen", "Michael Chen", true)]
    #[case("Mic", "Mia", false)]
    #[case("mic", "Michael Chen", false)]
    #[case("", "Anyone", true)]
    fn name_prefix_is_a_case_sensitive_range(
        #[case] term: &str,
        #[case] name: &str,
        #[case] expected: bool,
    ) {
        let query = StoreQuery::NamePrefix(term.to_owned());
        assert_eq!(query.matches_name(name), expected);
    }

    #[rstest]
    fn connection_error_mentions_message() {
        let err = AlumniRepositoryError::connection("timed out");
        assert_eq!(
            err.to_string(),
            "alumni store connection failed: timed out"
        );
    }

    #[rstest]
    fn not_found_names_the_id() {
        let err = AlumniRepositoryError::not_found("abc");
        assert_eq!(err.to_string(), "alumni record abc does not exist");
    }
}
