//! Seed entry type.

use serde::{Deserialize, Serialize};

/// One directory member as described by the seed dataset.
///
/// Required fields are plain strings here; the dataset loader rejects blank
/// values before an entry is handed out. Sequence fields keep the order they
/// were written in, which is the order profiles display them.
///
/// # Example
///
/// ```
/// use alumni_seed::SeedAlumnus;
///
/// let entry: SeedAlumnus = serde_json::from_str(
///     r#"{"name": "Ann", "batch": "2015", "profession": "Doctor"}"#,
/// )
/// .expect("valid entry");
/// assert_eq!(entry.name, "Ann");
/// assert!(entry.skills.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeedAlumnus {
    /// Display name; also the directory ordering key.
    pub name: String,
    /// Graduation cohort.
    pub batch: String,
    /// Current profession.
    pub profession: String,
    /// City and region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Current employer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Contact email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Profile URL on LinkedIn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    /// Portrait image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// Free-text biography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Free-text education summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    /// Notable achievements in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Vec<String>>,
    /// Interests in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    /// Skills in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}
