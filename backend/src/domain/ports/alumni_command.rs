//! Driving port for alumni mutations.

use async_trait::async_trait;

use crate::domain::{AlumniDraft, AlumniId, AlumniPatch, AlumniRecord, Error};

use super::fixtures::fixture_member;

/// Domain use-case port for creating, updating, and deleting members.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlumniCommand: Send + Sync {
    /// Validate and insert a new member.
    async fn create(&self, draft: AlumniDraft) -> Result<AlumniRecord, Error>;

    /// Validate and merge a partial update. Unknown ids are `not_found`.
    async fn update(&self, id: &AlumniId, patch: AlumniPatch) -> Result<(), Error>;

    /// Remove a member; removing an unknown id succeeds.
    async fn delete(&self, id: &AlumniId) -> Result<(), Error>;
}

/// Fixture command port that accepts valid input without storing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAlumniCommand;

#[async_trait]
impl AlumniCommand for FixtureAlumniCommand {
    async fn create(&self, draft: AlumniDraft) -> Result<AlumniRecord, Error> {
        draft
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let member = fixture_member()?;
        Ok(AlumniRecord::from_draft(member.id, &draft, member.created_at))
    }

    async fn update(&self, id: &AlumniId, patch: AlumniPatch) -> Result<(), Error> {
        patch
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        if fixture_member()?.id == *id {
            Ok(())
        } else {
            Err(Error::not_found("member not found"))
        }
    }

    async fn delete(&self, _id: &AlumniId) -> Result<(), Error> {
        Ok(())
    }
}
