//! Driving port for directory listings.
//!
//! Inbound adapters call this port with the filter taken from the request and
//! receive a fully assembled [`DirectoryListing`]; they never see the store.

use async_trait::async_trait;

use crate::domain::directory::{DirectoryFilter, DirectoryListing};
use crate::domain::{AlumniRecord, Error};

use super::StoreQuery;
use super::fixtures::fixture_member;

/// Domain use-case port for browsing the directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryQuery: Send + Sync {
    /// Load the base snapshot and apply `filter` to it.
    async fn list_directory(&self, filter: &DirectoryFilter) -> Result<DirectoryListing, Error>;

    /// Run a store-side search; prefix and equality semantics only.
    async fn search_store(&self, query: &StoreQuery) -> Result<Vec<AlumniRecord>, Error>;
}

/// Fixture directory holding a single member.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDirectoryQuery;

#[async_trait]
impl DirectoryQuery for FixtureDirectoryQuery {
    async fn list_directory(&self, filter: &DirectoryFilter) -> Result<DirectoryListing, Error> {
        let base = vec![fixture_member()?];
        Ok(DirectoryListing::assemble(&base, filter.clone()))
    }

    async fn search_store(&self, query: &StoreQuery) -> Result<Vec<AlumniRecord>, Error> {
        let member = fixture_member()?;
        Ok(if query.matches(&member) {
            vec![member]
        } else {
            Vec::new()
        })
    }
}
