//! Bundled initial alumni dataset used to seed the directory collection.
//!
//! This crate owns the fixed set of founding directory entries and the JSON
//! format they are stored in. It is deliberately independent of backend
//! domain types: entries are plain strings and the backend converts them into
//! its own draft type at the point of insertion.
//!
//! # Overview
//!
//! - [`SeedDataset::bundled`] parses the dataset compiled into the crate.
//! - [`SeedDataset::from_json`] and [`SeedDataset::from_file`] accept
//!   operator-supplied datasets in the same format.
//! - Every dataset is validated on load: supported version, at least one
//!   entry, non-blank required fields, and unique names.
//!
//! # Example
//!
//! ```
//! use alumni_seed::SeedDataset;
//!
//! let dataset = SeedDataset::bundled().expect("bundled dataset is valid");
//! assert_eq!(dataset.len(), 6);
//! assert!(dataset.entries().iter().any(|entry| entry.name == "Michael Chen"));
//! ```

mod dataset;
mod entry;
mod error;

pub use dataset::{SUPPORTED_VERSION, SeedDataset};
pub use entry::SeedAlumnus;
pub use error::DatasetError;
