//! Alumni record model.
//!
//! [`AlumniRecord`] is the denormalised read model returned by the record
//! store. [`AlumniDraft`] carries the client-settable fields for an insert and
//! [`AlumniPatch`] the subset of fields merged by a partial update. Identifiers
//! and timestamps are assigned by the store and never accepted from clients.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Longest identifier the document store accepts, in bytes.
pub const ALUMNI_ID_MAX_BYTES: usize = 1500;

/// Validation errors raised by alumni constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlumniValidationError {
    #[error("alumni id must not be empty")]
    EmptyId,
    #[error("alumni id must not contain '/' or surrounding whitespace")]
    InvalidId,
    #[error("alumni id must be at most {max} bytes")]
    IdTooLong { max: usize },
    #[error("name must not be empty")]
    EmptyName,
    #[error("{field} must not be empty")]
    BlankField { field: &'static str },
    #[error("update must change at least one field")]
    EmptyPatch,
}

/// Opaque record identifier assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AlumniId(String);

impl AlumniId {
    /// Validate and construct an [`AlumniId`].
    ///
    /// # Examples
    /// ```
    /// use alumni_backend::domain::AlumniId;
    ///
    /// assert!(AlumniId::new("Xy7Qm2Lp9Rt4Vb8Nc1Dz").is_ok());
    /// assert!(AlumniId::new("alumni/abc").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, AlumniValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(AlumniValidationError::EmptyId);
        }
        if id.trim() != id || id.contains('/') {
            return Err(AlumniValidationError::InvalidId);
        }
        if id.len() > ALUMNI_ID_MAX_BYTES {
            return Err(AlumniValidationError::IdTooLong {
                max: ALUMNI_ID_MAX_BYTES,
            });
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for AlumniId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AlumniId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<AlumniId> for String {
    fn from(value: AlumniId) -> Self {
        value.0
    }
}

impl TryFrom<String> for AlumniId {
    type Error = AlumniValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Display name of a member; the directory ordering key and search target.
///
/// Ordering is byte-wise, matching the store's default string ordering, so
/// `"Zed"` sorts before `"ann"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AlumniName(String);

impl AlumniName {
    /// Validate and construct an [`AlumniName`].
    pub fn new(name: impl Into<String>) -> Result<Self, AlumniValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AlumniValidationError::EmptyName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for AlumniName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AlumniName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<AlumniName> for String {
    fn from(value: AlumniName) -> Self {
        value.0
    }
}

impl TryFrom<String> for AlumniName {
    type Error = AlumniValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Optional descriptive fields shared by records, drafts, and patches.
///
/// Sequence fields keep insertion order; when present they are complete
/// sequences, never partially omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlumniDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "San Francisco, CA")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Google")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}

impl AlumniDetails {
    /// Field names, in store spelling, that carry a value.
    pub fn present_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        let text = [
            ("location", &self.location),
            ("company", &self.company),
            ("email", &self.email),
            ("linkedin", &self.linkedin),
            ("photo", &self.photo),
            ("bio", &self.bio),
            ("education", &self.education),
        ];
        fields.extend(text.iter().filter(|(_, v)| v.is_some()).map(|(k, _)| *k));
        let lists = [
            ("achievements", &self.achievements),
            ("interests", &self.interests),
            ("skills", &self.skills),
        ];
        fields.extend(lists.iter().filter(|(_, v)| v.is_some()).map(|(k, _)| *k));
        fields
    }

    /// Overwrite every field that `other` provides.
    pub fn merge_from(&mut self, other: &AlumniDetails) {
        fn take<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if let Some(value) = value {
                *slot = Some(value.clone());
            }
        }
        take(&mut self.location, &other.location);
        take(&mut self.company, &other.company);
        take(&mut self.email, &other.email);
        take(&mut self.linkedin, &other.linkedin);
        take(&mut self.photo, &other.photo);
        take(&mut self.bio, &other.bio);
        take(&mut self.education, &other.education);
        take(&mut self.achievements, &other.achievements);
        take(&mut self.interests, &other.interests);
        take(&mut self.skills, &other.skills);
    }
}

/// One directory member as stored.
///
/// ## Invariants
/// - `id` is unique across the collection and immutable.
/// - `name` is non-empty.
/// - `created_at` and `updated_at` are written by the store only.
///
/// `batch` and `profession` are required on insert but optional here so
/// records written without them still load; such records never match a batch
/// or profession constraint and contribute nothing to the filter options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlumniRecord {
    #[schema(value_type = String, example = "Xy7Qm2Lp9Rt4Vb8Nc1Dz")]
    pub id: AlumniId,
    #[schema(value_type = String, example = "Michael Chen")]
    pub name: AlumniName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "2018")]
    pub batch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Software Engineer")]
    pub profession: Option<String>,
    #[serde(flatten)]
    pub details: AlumniDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AlumniRecord {
    /// Build the record a store produces for a freshly inserted draft.
    pub fn from_draft(id: AlumniId, draft: &AlumniDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            batch: Some(draft.batch.clone()),
            profession: Some(draft.profession.clone()),
            details: draft.details.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a patch into the record and stamp `updated_at`.
    ///
    /// `created_at` and `id` are never touched.
    pub fn apply_patch(&mut self, patch: &AlumniPatch, now: DateTime<Utc>) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(batch) = &patch.batch {
            self.batch = Some(batch.clone());
        }
        if let Some(profession) = &patch.profession {
            self.profession = Some(profession.clone());
        }
        self.details.merge_from(&patch.details);
        self.updated_at = now;
    }
}

/// Client-settable fields for a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlumniDraft {
    #[schema(value_type = String, example = "Michael Chen")]
    pub name: AlumniName,
    #[schema(example = "2018")]
    pub batch: String,
    #[schema(example = "Software Engineer")]
    pub profession: String,
    #[serde(flatten)]
    pub details: AlumniDetails,
}

impl AlumniDraft {
    /// Construct a validated draft with no optional details.
    ///
    /// # Examples
    /// ```
    /// use alumni_backend::domain::{AlumniDraft, AlumniName};
    ///
    /// let name = AlumniName::new("Ann").expect("valid name");
    /// let draft = AlumniDraft::new(name, "2015", "Doctor").expect("valid draft");
    /// assert_eq!(draft.batch, "2015");
    /// assert!(AlumniDraft::new(AlumniName::new("Ben").unwrap(), " ", "Doctor").is_err());
    /// ```
    pub fn new(
        name: AlumniName,
        batch: impl Into<String>,
        profession: impl Into<String>,
    ) -> Result<Self, AlumniValidationError> {
        let draft = Self {
            name,
            batch: batch.into(),
            profession: profession.into(),
            details: AlumniDetails::default(),
        };
        draft.validate()?;
        Ok(draft)
    }

    /// Attach optional details.
    pub fn with_details(mut self, details: AlumniDetails) -> Self {
        self.details = details;
        self
    }

    /// Check the required categorical fields.
    ///
    /// Drafts decoded from JSON bypass [`AlumniDraft::new`], so services call
    /// this before handing a draft to the store.
    pub fn validate(&self) -> Result<(), AlumniValidationError> {
        ensure_not_blank("batch", &self.batch)?;
        ensure_not_blank("profession", &self.profession)
    }
}

/// Partial update; only provided fields are merged.
///
/// Fields outside this shape (such as `id` or timestamps) are ignored when
/// decoding, so clients cannot set them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlumniPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub name: Option<AlumniName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(flatten)]
    pub details: AlumniDetails,
}

impl AlumniPatch {
    /// Field names, in store spelling, touched by this patch.
    pub fn field_paths(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.batch.is_some() {
            fields.push("batch");
        }
        if self.profession.is_some() {
            fields.push("profession");
        }
        fields.extend(self.details.present_fields());
        fields
    }

    /// Reject empty patches and blank categorical values.
    pub fn validate(&self) -> Result<(), AlumniValidationError> {
        if self.field_paths().is_empty() {
            return Err(AlumniValidationError::EmptyPatch);
        }
        if let Some(batch) = &self.batch {
            ensure_not_blank("batch", batch)?;
        }
        if let Some(profession) = &self.profession {
            ensure_not_blank("profession", profession)?;
        }
        Ok(())
    }
}

fn ensure_not_blank(field: &'static str, value: &str) -> Result<(), AlumniValidationError> {
    if value.trim().is_empty() {
        return Err(AlumniValidationError::BlankField { field });
    }
    Ok(())
}
