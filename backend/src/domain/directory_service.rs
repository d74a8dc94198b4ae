//! Alumni directory domain service.
//!
//! [`DirectoryService`] implements every driving port over a single
//! [`AlumniRepository`]. It validates input, delegates to the gateway, runs
//! the pure directory engine, and maps gateway failures onto the domain
//! error taxonomy.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::directory::{DirectoryFilter, DirectoryListing};
use crate::domain::ports::{
    AlumniCommand, AlumniRepository, AlumniRepositoryError, DirectoryQuery, ProfileQuery,
    StoreQuery,
};
use crate::domain::{
    AlumniDraft, AlumniId, AlumniPatch, AlumniRecord, AlumniValidationError, Error,
    ProfileLookup,
};

/// Map a gateway failure onto the domain taxonomy.
///
/// `Connection` becomes retryable `service_unavailable`, `Query` becomes
/// `internal_error` (logged here, redacted at the HTTP edge), and `NotFound`
/// becomes `not_found`.
pub(crate) fn map_repository_error(error: AlumniRepositoryError) -> Error {
    let kind = error.kind();
    match error {
        AlumniRepositoryError::Connection { message } => {
            warn!(kind, %message, "alumni store unreachable");
            Error::service_unavailable(format!("alumni store unavailable: {message}"))
        }
        AlumniRepositoryError::Query { message } => {
            error!(kind, %message, "alumni store query failed");
            Error::internal(format!("alumni store error: {message}"))
        }
        AlumniRepositoryError::NotFound { id } => {
            Error::not_found("member not found").with_details(json!({ "id": id }))
        }
    }
}

fn map_validation_error(error: AlumniValidationError) -> Error {
    let field = match &error {
        AlumniValidationError::BlankField { field } => Some(*field),
        AlumniValidationError::EmptyName => Some("name"),
        _ => None,
    };
    let err = Error::invalid_request(error.to_string());
    match field {
        Some(field) => err.with_details(json!({ "field": field })),
        None => err,
    }
}

/// Directory service implementing the driving ports.
#[derive(Clone)]
pub struct DirectoryService<R> {
    repository: Arc<R>,
}

impl<R> DirectoryService<R> {
    /// Create a new service over the given gateway.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Gateway shared with other collaborators such as the seeder.
    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }
}

#[async_trait]
impl<R> DirectoryQuery for DirectoryService<R>
where
    R: AlumniRepository,
{
    async fn list_directory(&self, filter: &DirectoryFilter) -> Result<DirectoryListing, Error> {
        let base = self
            .repository
            .list_all()
            .await
            .map_err(map_repository_error)?;
        Ok(DirectoryListing::assemble(&base, filter.clone()))
    }

    async fn search_store(&self, query: &StoreQuery) -> Result<Vec<AlumniRecord>, Error> {
        let (StoreQuery::FieldEquals { value, .. } | StoreQuery::NamePrefix(value)) = query;
        if value.is_empty() {
            return Err(Error::invalid_request("search value must not be empty"));
        }
        self.repository
            .query(query)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> ProfileQuery for DirectoryService<R>
where
    R: AlumniRepository,
{
    async fn lookup_profile(&self, id: &AlumniId) -> Result<ProfileLookup, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map(ProfileLookup::from)
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> AlumniCommand for DirectoryService<R>
where
    R: AlumniRepository,
{
    async fn create(&self, draft: AlumniDraft) -> Result<AlumniRecord, Error> {
        draft.validate().map_err(map_validation_error)?;
        let record = self
            .repository
            .create(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(id = %record.id, "alumni record created");
        Ok(record)
    }

    async fn update(&self, id: &AlumniId, patch: AlumniPatch) -> Result<(), Error> {
        patch.validate().map_err(map_validation_error)?;
        self.repository
            .update(id, &patch)
            .await
            .map_err(map_repository_error)?;
        info!(%id, fields = ?patch.field_paths(), "alumni record updated");
        Ok(())
    }

    async fn delete(&self, id: &AlumniId) -> Result<(), Error> {
        self.repository
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        info!(%id, "alumni record deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "directory_service_tests.rs"]
mod tests;
