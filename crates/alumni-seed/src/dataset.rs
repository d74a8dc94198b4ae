//! Seed dataset parsing and validation.
//!
//! A dataset is a versioned JSON document holding an ordered list of
//! directory entries. Entries are inserted in file order, so the order here
//! is the insertion order observed by operators in the seeding logs.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::entry::SeedAlumnus;
use crate::error::DatasetError;

/// Current supported dataset version.
pub const SUPPORTED_VERSION: u32 = 1;

const BUNDLED_DATASET: &str = include_str!("../fixtures/alumni.json");

/// A validated, ordered collection of seed entries.
///
/// # Example
///
/// ```
/// use alumni_seed::SeedDataset;
///
/// let json = r#"{
///     "version": 1,
///     "alumni": [{"name": "Ann", "batch": "2015", "profession": "Doctor"}]
/// }"#;
///
/// let dataset = SeedDataset::from_json(json).expect("valid dataset");
/// assert_eq!(dataset.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDataset {
    entries: Vec<SeedAlumnus>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSeedDataset {
    version: u32,
    alumni: Vec<SeedAlumnus>,
}

impl SeedDataset {
    /// Parses the dataset compiled into this crate.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the bundled fixture fails validation,
    /// which indicates a packaging regression.
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_json(BUNDLED_DATASET)
    }

    /// Parses a dataset from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if:
    /// - The JSON is malformed or carries unknown fields
    /// - The version is unsupported
    /// - The entry list is empty
    /// - A name, batch, or profession is blank
    /// - Two entries share a name
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let raw: RawSeedDataset =
            serde_json::from_str(json).map_err(|e| DatasetError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, DatasetError> {
        let contents = fs::read_to_string(path).map_err(|e| DatasetError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedDataset) -> Result<Self, DatasetError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(DatasetError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.alumni.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut seen = HashSet::with_capacity(raw.alumni.len());
        for (index, entry) in raw.alumni.iter().enumerate() {
            validate_required(index, "name", &entry.name)?;
            validate_required(index, "batch", &entry.batch)?;
            validate_required(index, "profession", &entry.profession)?;

            if !seen.insert(entry.name.as_str()) {
                return Err(DatasetError::DuplicateName {
                    index,
                    name: entry.name.clone(),
                });
            }
        }

        Ok(Self {
            entries: raw.alumni,
        })
    }

    /// Returns the entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[SeedAlumnus] {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the dataset has no entries.
    ///
    /// Validated datasets are never empty; this exists for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the dataset, returning its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<SeedAlumnus> {
        self.entries
    }
}

fn validate_required(index: usize, field: &'static str, value: &str) -> Result<(), DatasetError> {
    if value.trim().is_empty() {
        return Err(DatasetError::BlankField { index, field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn bundled_dataset_holds_the_six_founding_members() {
        let dataset = SeedDataset::bundled().expect("bundled dataset");
        let names: Vec<&str> = dataset.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Dr. Sarah Johnson",
                "Michael Chen",
                "Emily Rodriguez",
                "David Kim",
                "Lisa Thompson",
                "James Wilson",
            ]
        );
    }

    #[test]
    fn bundled_dataset_keeps_sequence_order() {
        let dataset = SeedDataset::bundled().expect("bundled dataset");
        let chen = dataset
            .entries()
            .iter()
            .find(|e| e.name == "Michael Chen")
            .expect("Michael Chen present");
        assert_eq!(
            chen.skills.as_deref(),
            Some(
                &[
                    "Python".to_owned(),
                    "TensorFlow".to_owned(),
                    "Distributed Systems".to_owned(),
                    "Machine Learning".to_owned(),
                    "Go".to_owned(),
                    "Kubernetes".to_owned(),
                ][..]
            )
        );
    }

    #[rstest]
    #[case::wrong_version(
        r#"{"version": 2, "alumni": [{"name": "Ann", "batch": "2015", "profession": "Doctor"}]}"#,
        DatasetError::UnsupportedVersion { expected: 1, actual: 2 }
    )]
    #[case::empty(r#"{"version": 1, "alumni": []}"#, DatasetError::Empty)]
    #[case::blank_name(
        r#"{"version": 1, "alumni": [{"name": "  ", "batch": "2015", "profession": "Doctor"}]}"#,
        DatasetError::BlankField { index: 0, field: "name" }
    )]
    #[case::blank_profession(
        r#"{"version": 1, "alumni": [
            {"name": "Ann", "batch": "2015", "profession": "Doctor"},
            {"name": "Ben", "batch": "2015", "profession": ""}
        ]}"#,
        DatasetError::BlankField { index: 1, field: "profession" }
    )]
    #[case::duplicate(
        r#"{"version": 1, "alumni": [
            {"name": "Ann", "batch": "2015", "profession": "Doctor"},
            {"name": "Ann", "batch": "2016", "profession": "Engineer"}
        ]}"#,
        DatasetError::DuplicateName { index: 1, name: "Ann".to_owned() }
    )]
    fn invalid_datasets_are_rejected(#[case] json: &str, #[case] expected: DatasetError) {
        assert_eq!(SeedDataset::from_json(json), Err(expected));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = SeedDataset::from_json("not json");
        assert!(matches!(result, Err(DatasetError::ParseError { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = Path::new("/definitely/not/here/alumni.json");
        let result = SeedDataset::from_file(path);
        assert!(matches!(result, Err(DatasetError::IoError { .. })));
    }
}
