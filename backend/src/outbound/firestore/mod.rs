//! Firestore outbound adapter.
//!
//! This module provides a thin HTTP implementation of the
//! `AlumniRepository` port over the Firestore REST v1 API.

mod dto;
mod http_store;

pub use http_store::{
    DEFAULT_COLLECTION, FirestoreAlumniRepository, FirestoreConfig, FirestoreConfigError,
};
