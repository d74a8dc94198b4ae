//! Alumni directory API handlers.
//!
//! ```text
//! GET    /api/v1/alumni?search=sarah&batch=2015&profession=Medical%20Doctor
//! GET    /api/v1/alumni:search?namePrefix=Mic
//! GET    /api/v1/alumni/{id}
//! POST   /api/v1/alumni {"name":"Ann","batch":"2015","profession":"Doctor"}
//! PATCH  /api/v1/alumni/{id} {"company":"Clinic"}
//! DELETE /api/v1/alumni/{id}
//! ```

use actix_web::{HttpResponse, delete, get, http::header, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::directory::{DirectoryFilter, DirectoryListing, ListingOutcome};
use crate::domain::ports::{CategoryField, StoreQuery};
use crate::domain::{AlumniDraft, AlumniId, AlumniPatch, AlumniRecord, Error, ProfileLookup};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

const MEMBER_NOT_FOUND: &str = "member not found";

/// Directory filter taken from the query string. Missing means unconstrained.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DirectoryParams {
    /// Case-insensitive substring of the member name.
    pub search: Option<String>,
    /// Exact batch.
    pub batch: Option<String>,
    /// Exact profession.
    pub profession: Option<String>,
}

impl From<DirectoryParams> for DirectoryFilter {
    fn from(value: DirectoryParams) -> Self {
        DirectoryFilter::new(
            value.search.unwrap_or_default(),
            value.batch.unwrap_or_default(),
            value.profession.unwrap_or_default(),
        )
    }
}

/// Listing response for `GET /api/v1/alumni`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryResponse {
    pub members: Vec<AlumniRecord>,
    /// Size of the unfiltered collection.
    pub total: usize,
    /// Size of the filtered view.
    pub matched: usize,
    pub outcome: ListingOutcome,
    /// Distinct batches across the unfiltered collection.
    pub batches: Vec<String>,
    /// Distinct professions across the unfiltered collection.
    pub professions: Vec<String>,
    /// Filter that produced this view.
    pub filter: DirectoryFilter,
}

impl From<DirectoryListing> for DirectoryResponse {
    fn from(listing: DirectoryListing) -> Self {
        let matched = listing.matched();
        let outcome = listing.outcome();
        Self {
            members: listing.members,
            total: listing.total,
            matched,
            outcome,
            batches: listing.options.batches,
            professions: listing.options.professions,
            filter: listing.filter,
        }
    }
}

/// Store-side search; exactly one parameter must be set.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StoreSearchParams {
    /// Case-sensitive name prefix.
    pub name_prefix: Option<String>,
    /// Exact batch.
    pub batch: Option<String>,
    /// Exact profession.
    pub profession: Option<String>,
}

impl TryFrom<StoreSearchParams> for StoreQuery {
    type Error = Error;

    fn try_from(value: StoreSearchParams) -> Result<Self, Self::Error> {
        match (value.name_prefix, value.batch, value.profession) {
            (Some(term), None, None) => Ok(StoreQuery::NamePrefix(term)),
            (None, Some(value), None) => Ok(StoreQuery::FieldEquals {
                field: CategoryField::Batch,
                value,
            }),
            (None, None, Some(value)) => Ok(StoreQuery::FieldEquals {
                field: CategoryField::Profession,
                value,
            }),
            _ => Err(Error::invalid_request(
                "exactly one of namePrefix, batch, or profession is required",
            )
            .with_details(json!({ "code": "ambiguous_search" }))),
        }
    }
}

fn parse_id(raw: &str) -> Option<AlumniId> {
    AlumniId::new(raw).ok()
}

fn member_not_found(raw: &str) -> Error {
    Error::not_found(MEMBER_NOT_FOUND).with_details(json!({ "id": raw }))
}

/// List the directory with the given filter applied.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use alumni_backend::inbound::http::alumni::list_alumni;
///
/// let app = App::new().service(list_alumni);
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/alumni",
    params(DirectoryParams),
    responses(
        (status = 200, description = "Filtered directory", body = DirectoryResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Record store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["alumni"],
    operation_id = "listAlumni"
)]
#[get("/alumni")]
pub async fn list_alumni(
    state: web::Data<HttpState>,
    params: web::Query<DirectoryParams>,
) -> ApiResult<web::Json<DirectoryResponse>> {
    let filter = DirectoryFilter::from(params.into_inner());
    let listing = state.directory.list_directory(&filter).await?;
    Ok(web::Json(DirectoryResponse::from(listing)))
}

/// Run a store-side prefix or equality search.
///
/// Results follow store semantics: the name prefix is case-sensitive.
#[utoipa::path(
    get,
    path = "/api/v1/alumni:search",
    params(StoreSearchParams),
    responses(
        (status = 200, description = "Matching members ordered by name", body = [AlumniRecord]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Record store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["alumni"],
    operation_id = "searchAlumni"
)]
#[get("/alumni:search")]
pub async fn search_alumni(
    state: web::Data<HttpState>,
    params: web::Query<StoreSearchParams>,
) -> ApiResult<web::Json<Vec<AlumniRecord>>> {
    let query = StoreQuery::try_from(params.into_inner())?;
    let members = state.directory.search_store(&query).await?;
    Ok(web::Json(members))
}

/// Fetch one member for the profile page.
#[utoipa::path(
    get,
    path = "/api/v1/alumni/{id}",
    params(("id" = String, Path, description = "Member identifier")),
    responses(
        (status = 200, description = "Member", body = AlumniRecord),
        (status = 404, description = "Member not found", body = Error),
        (status = 503, description = "Record store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["alumni"],
    operation_id = "getAlumnus"
)]
#[get("/alumni/{id}")]
pub async fn get_alumnus(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<AlumniRecord>> {
    let raw = path.into_inner();
    let Some(id) = parse_id(&raw) else {
        return Err(member_not_found(&raw));
    };
    match state.profiles.lookup_profile(&id).await? {
        ProfileLookup::Found(record) => Ok(web::Json(record)),
        ProfileLookup::NotFound => Err(member_not_found(&raw)),
    }
}

/// Create a member; the store assigns id and timestamps.
#[utoipa::path(
    post,
    path = "/api/v1/alumni",
    request_body = AlumniDraft,
    responses(
        (status = 201, description = "Member created", body = AlumniRecord,
            headers(("Location" = String, description = "URL of the new member"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Record store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["alumni"],
    operation_id = "createAlumnus"
)]
#[post("/alumni")]
pub async fn create_alumnus(
    state: web::Data<HttpState>,
    payload: web::Json<AlumniDraft>,
) -> ApiResult<HttpResponse> {
    let record = state.alumni.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/v1/alumni/{}", record.id)))
        .json(record))
}

/// Merge the provided fields into a member.
#[utoipa::path(
    patch,
    path = "/api/v1/alumni/{id}",
    params(("id" = String, Path, description = "Member identifier")),
    request_body = AlumniPatch,
    responses(
        (status = 204, description = "Member updated"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Member not found", body = Error),
        (status = 503, description = "Record store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["alumni"],
    operation_id = "updateAlumnus"
)]
#[patch("/alumni/{id}")]
pub async fn update_alumnus(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AlumniPatch>,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    let Some(id) = parse_id(&raw) else {
        return Err(member_not_found(&raw));
    };
    state.alumni.update(&id, payload.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Remove a member. Unknown ids succeed.
#[utoipa::path(
    delete,
    path = "/api/v1/alumni/{id}",
    params(("id" = String, Path, description = "Member identifier")),
    responses(
        (status = 204, description = "Member removed or never existed"),
        (status = 503, description = "Record store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["alumni"],
    operation_id = "deleteAlumnus"
)]
#[delete("/alumni/{id}")]
pub async fn delete_alumnus(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    if let Some(id) = parse_id(&path.into_inner()) {
        state.alumni.delete(&id).await?;
    }
    Ok(HttpResponse::NoContent().finish())
}

/// Register every alumni handler on a scope or app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_alumni)
        .service(search_alumni)
        .service(get_alumnus)
        .service(create_alumnus)
        .service(update_alumnus)
        .service(delete_alumnus);
}

#[cfg(test)]
#[path = "alumni_tests.rs"]
mod tests;
