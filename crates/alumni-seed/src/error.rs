//! Error types for the alumni-seed crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a seed dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("failed to read dataset file at '{path}': {message}")]
    IoError {
        /// Path to the dataset file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The dataset JSON is malformed or missing required fields.
    #[error("invalid dataset JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The dataset version is not supported.
    #[error("unsupported dataset version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the dataset.
        actual: u32,
    },

    /// The dataset contains no entries.
    #[error("dataset contains no alumni entries")]
    Empty,

    /// A required field is blank.
    #[error("entry {index} has a blank {field}")]
    BlankField {
        /// Position of the offending entry.
        index: usize,
        /// Name of the blank field.
        field: &'static str,
    },

    /// Two entries share the same name.
    #[error("entry {index} duplicates the name '{name}'")]
    DuplicateName {
        /// Position of the second occurrence.
        index: usize,
        /// The duplicated name.
        name: String,
    },
}
