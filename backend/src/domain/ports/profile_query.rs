//! Driving port for single-member lookups.

use async_trait::async_trait;

use crate::domain::{AlumniId, Error, ProfileLookup};

use super::fixtures::fixture_member;

/// Domain use-case port for the profile page.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Resolve one member. A missing member is [`ProfileLookup::NotFound`].
    async fn lookup_profile(&self, id: &AlumniId) -> Result<ProfileLookup, Error>;
}

/// Fixture lookup that only knows the fixture member.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileQuery;

#[async_trait]
impl ProfileQuery for FixtureProfileQuery {
    async fn lookup_profile(&self, id: &AlumniId) -> Result<ProfileLookup, Error> {
        let member = fixture_member()?;
        Ok(if &member.id == id {
            ProfileLookup::Found(member)
        } else {
            ProfileLookup::NotFound
        })
    }
}
