//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every alumni and health endpoint together with the
//! schemas they exchange. The generated document is served by Swagger UI in
//! debug builds and exported via `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::domain::directory::{DirectoryFilter, ListingOutcome};
use crate::domain::{AlumniDetails, AlumniDraft, AlumniPatch, AlumniRecord, Error, ErrorCode};
use crate::inbound::http::alumni::DirectoryResponse;
use crate::inbound::http::health::{ProbeBody, ProbeStatus};
use crate::settings::StoreBackend;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Alumni directory API",
        description = "Browse, filter, and maintain the alumni directory."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::alumni::list_alumni,
        crate::inbound::http::alumni::search_alumni,
        crate::inbound::http::alumni::get_alumnus,
        crate::inbound::http::alumni::create_alumnus,
        crate::inbound::http::alumni::update_alumnus,
        crate::inbound::http::alumni::delete_alumnus,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        AlumniRecord,
        AlumniDraft,
        AlumniPatch,
        AlumniDetails,
        DirectoryResponse,
        DirectoryFilter,
        ListingOutcome,
        Error,
        ErrorCode,
        ProbeBody,
        ProbeStatus,
        StoreBackend
    )),
    tags(
        (name = "alumni", description = "Directory listing, profiles, and maintenance"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the registered paths and schema fields.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema_has_field(schema: &RefOr<Schema>, field: &str) -> bool {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.contains_key(field),
            RefOr::T(Schema::AllOf(all)) => all
                .items
                .iter()
                .any(|item| schema_has_field(item, field)),
            _ => false,
        }
    }

    #[rstest]
    #[case("/api/v1/alumni")]
    #[case("/api/v1/alumni:search")]
    #[case("/api/v1/alumni/{id}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn paths_are_registered(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "message")]
    #[case("DirectoryResponse", "outcome")]
    #[case("DirectoryResponse", "members")]
    #[case("AlumniDraft", "profession")]
    #[case("ProbeBody", "store")]
    #[case("ProbeBody", "seededMembers")]
    fn schemas_expose_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).unwrap_or_else(|| panic!("{name} schema"));
        assert!(schema_has_field(schema, field), "{name}.{field}");
    }
}
