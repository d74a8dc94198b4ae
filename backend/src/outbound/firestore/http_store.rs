//! Reqwest-backed Firestore gateway.
//!
//! This adapter owns transport details only: URL construction, request
//! bodies, status mapping, and decoding documents into records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use super::dto::{
    CREATED_AT_FIELD, CommitResponseDto, DocumentDto, ListDocumentsDto, RunQueryItemDto,
    UPDATED_AT_FIELD, encode_details, encode_text,
};
use crate::domain::ports::{
    AlumniRepository, AlumniRepositoryError, NAME_PREFIX_SENTINEL, StoreQuery,
};
use crate::domain::{AlumniDraft, AlumniId, AlumniPatch, AlumniRecord};
use crate::outbound::auto_id::generate_auto_id;

/// Default collection holding alumni documents.
pub const DEFAULT_COLLECTION: &str = "alumni";

/// Connection settings for the Firestore REST API.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    /// API root, for example `https://firestore.googleapis.com/v1`.
    pub base_url: Url,
    pub project_id: String,
    /// Database id; `(default)` for the default database.
    pub database: String,
    pub collection: String,
    /// Page size used while listing the collection.
    pub page_size: u32,
    pub timeout: Duration,
    /// Sent as the `key` query parameter when set.
    pub api_key: Option<String>,
    /// Sent as a bearer token when set.
    pub bearer_token: Option<String>,
}

/// Errors raised while constructing the gateway.
#[derive(Debug, thiserror::Error)]
pub enum FirestoreConfigError {
    #[error("firestore base URL cannot carry a path: {0}")]
    UnsupportedBaseUrl(Url),
    #[error("firestore {field} must not be empty")]
    Blank { field: &'static str },
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Gateway adapter speaking the Firestore REST v1 API.
pub struct FirestoreAlumniRepository {
    client: Client,
    config: FirestoreConfig,
}

impl FirestoreAlumniRepository {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is unusable or the reqwest
    /// client cannot be constructed.
    pub fn new(mut config: FirestoreConfig) -> Result<Self, FirestoreConfigError> {
        if config.base_url.cannot_be_a_base() {
            return Err(FirestoreConfigError::UnsupportedBaseUrl(config.base_url));
        }
        for (field, value) in [
            ("project id", &config.project_id),
            ("database", &config.database),
            ("collection", &config.collection),
        ] {
            if value.trim().is_empty() {
                return Err(FirestoreConfigError::Blank { field });
            }
        }
        config.page_size = config.page_size.max(1);
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// `projects/{project}/databases/{database}/documents`.
    fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents",
            self.config.project_id, self.config.database
        )
    }

    /// Full resource name of one document, as used inside write bodies.
    fn document_name(&self, id: &AlumniId) -> String {
        format!(
            "{}/{}/{}",
            self.documents_root(),
            self.config.collection,
            id
        )
    }

    fn url(&self, tail: &[&str]) -> Result<Url, AlumniRepositoryError> {
        let mut url = self.config.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                AlumniRepositoryError::query("firestore base URL cannot carry a path")
            })?;
            segments.pop_if_empty().extend([
                "projects",
                self.config.project_id.as_str(),
                "databases",
                self.config.database.as_str(),
            ]);
            segments.extend(tail);
        }
        if let Some(key) = &self.config.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }

    fn collection_url(&self) -> Result<Url, AlumniRepositoryError> {
        self.url(&["documents", self.config.collection.as_str()])
    }

    fn document_url(&self, id: &AlumniId) -> Result<Url, AlumniRepositoryError> {
        self.url(&["documents", self.config.collection.as_str(), id.as_ref()])
    }

    fn rpc_url(&self, method: &str) -> Result<Url, AlumniRepositoryError> {
        self.url(&[format!("documents:{method}").as_str()])
    }

    fn authorise(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(reqwest::header::ACCEPT, "application/json");
        match &self.config.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AlumniRepositoryError> {
        self.authorise(request)
            .send()
            .await
            .map_err(map_transport_error)
    }

    /// Commit one write; `None` when a precondition targets a missing document.
    async fn commit(&self, write: Value) -> Result<Option<CommitResponseDto>, AlumniRepositoryError> {
        let url = self.rpc_url("commit")?;
        let response = self
            .send(self.client.post(url).json(&json!({ "writes": [write] })))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode_success(response).await.map(Some)
    }

    async fn run_query(&self, query: &StoreQuery) -> Result<Vec<AlumniRecord>, AlumniRepositoryError> {
        let url = self.rpc_url("runQuery")?;
        let body = build_structured_query(&self.config.collection, query);
        let response = self.send(self.client.post(url).json(&body)).await?;
        let items: Vec<RunQueryItemDto> = decode_success(response).await?;
        let mut records = records_from_documents(items.into_iter().filter_map(|item| item.document));
        records.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }

    fn create_write(&self, id: &AlumniId, draft: &AlumniDraft) -> Value {
        let mut fields = Map::new();
        fields.insert("name".to_owned(), encode_text(draft.name.as_ref()));
        fields.insert("batch".to_owned(), encode_text(&draft.batch));
        fields.insert("profession".to_owned(), encode_text(&draft.profession));
        encode_details(&draft.details, &mut fields);
        json!({
            "update": { "name": self.document_name(id), "fields": fields },
            "currentDocument": { "exists": false },
            "updateTransforms": [
                { "fieldPath": CREATED_AT_FIELD, "setToServerValue": "REQUEST_TIME" },
                { "fieldPath": UPDATED_AT_FIELD, "setToServerValue": "REQUEST_TIME" },
            ],
        })
    }

    fn update_write(&self, id: &AlumniId, patch: &AlumniPatch) -> Value {
        let mut fields = Map::new();
        if let Some(name) = &patch.name {
            fields.insert("name".to_owned(), encode_text(name.as_ref()));
        }
        if let Some(batch) = &patch.batch {
            fields.insert("batch".to_owned(), encode_text(batch));
        }
        if let Some(profession) = &patch.profession {
            fields.insert("profession".to_owned(), encode_text(profession));
        }
        encode_details(&patch.details, &mut fields);
        json!({
            "update": { "name": self.document_name(id), "fields": fields },
            "updateMask": { "fieldPaths": patch.field_paths() },
            "currentDocument": { "exists": true },
            "updateTransforms": [
                { "fieldPath": UPDATED_AT_FIELD, "setToServerValue": "REQUEST_TIME" },
            ],
        })
    }
}

#[async_trait]
impl AlumniRepository for FirestoreAlumniRepository {
    async fn list_all(&self) -> Result<Vec<AlumniRecord>, AlumniRepositoryError> {
        let mut records = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut url = self.collection_url()?;
            {
                let mut query = url.query_pairs_mut();
                query
                    .append_pair("orderBy", "name")
                    .append_pair("pageSize", &self.config.page_size.to_string());
                if let Some(token) = &page_token {
                    query.append_pair("pageToken", token);
                }
            }
            let response = self.send(self.client.get(url)).await?;
            let page: ListDocumentsDto = decode_success(response).await?;
            records.extend(records_from_documents(page.documents));
            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
        debug!(count = records.len(), "listed alumni documents");
        Ok(records)
    }

    async fn find_by_id(
        &self,
        id: &AlumniId,
    ) -> Result<Option<AlumniRecord>, AlumniRepositoryError> {
        let response = self.send(self.client.get(self.document_url(id)?)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let document: DocumentDto = decode_success(response).await?;
        Ok(record_from_document(id, document))
    }

    async fn create(&self, draft: &AlumniDraft) -> Result<AlumniRecord, AlumniRepositoryError> {
        let id = generate_auto_id()?;
        let committed = self
            .commit(self.create_write(&id, draft))
            .await?
            .ok_or_else(|| AlumniRepositoryError::query("status 404: database not found"))?;
        let written_at = committed.request_time().ok_or_else(|| {
            AlumniRepositoryError::query("commit response carried no server timestamp")
        })?;
        Ok(AlumniRecord::from_draft(id, draft, written_at))
    }

    async fn update(&self, id: &AlumniId, patch: &AlumniPatch) -> Result<(), AlumniRepositoryError> {
        match self.commit(self.update_write(id, patch)).await? {
            Some(_) => Ok(()),
            None => Err(AlumniRepositoryError::not_found(id.to_string())),
        }
    }

    async fn delete(&self, id: &AlumniId) -> Result<(), AlumniRepositoryError> {
        let response = self.send(self.client.delete(self.document_url(id)?)).await?;
        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, body.as_ref()))
    }

    async fn query(&self, query: &StoreQuery) -> Result<Vec<AlumniRecord>, AlumniRepositoryError> {
        self.run_query(query).await
    }
}

/// Single-document lookup treats an unreadable document as absent, the same
/// way listings skip it.
fn record_from_document(id: &AlumniId, document: DocumentDto) -> Option<AlumniRecord> {
    match document.into_record() {
        Ok(record) => Some(record),
        Err(reason) => {
            warn!(%id, %reason, "alumni document unreadable; reporting it as missing");
            None
        }
    }
}

fn records_from_documents(documents: impl IntoIterator<Item = DocumentDto>) -> Vec<AlumniRecord> {
    documents
        .into_iter()
        .filter_map(|document| match document.into_record() {
            Ok(record) => Some(record),
            Err(reason) => {
                warn!(%reason, "skipping unreadable alumni document");
                None
            }
        })
        .collect()
}

fn build_structured_query(collection: &str, query: &StoreQuery) -> Value {
    let filter = match query {
        StoreQuery::FieldEquals { field, value } => field_filter(field.as_str(), "EQUAL", value),
        StoreQuery::NamePrefix(term) => json!({
            "compositeFilter": {
                "op": "AND",
                "filters": [
                    field_filter("name", "GREATER_THAN_OR_EQUAL", term),
                    field_filter(
                        "name",
                        "LESS_THAN_OR_EQUAL",
                        &format!("{term}{NAME_PREFIX_SENTINEL}"),
                    ),
                ],
            }
        }),
    };
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "where": filter,
        }
    })
}

fn field_filter(field: &str, op: &str, value: &str) -> Value {
    json!({
        "fieldFilter": {
            "field": { "fieldPath": field },
            "op": op,
            "value": encode_text(value),
        }
    })
}

async fn decode_success<T: DeserializeOwned>(response: Response) -> Result<T, AlumniRepositoryError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    parse_body(body.as_ref())
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AlumniRepositoryError> {
    serde_json::from_slice(body).map_err(|error| {
        AlumniRepositoryError::query(format!("invalid Firestore JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> AlumniRepositoryError {
    AlumniRepositoryError::connection(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> AlumniRepositoryError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::TOO_MANY_REQUESTS
        | StatusCode::REQUEST_TIMEOUT
        | StatusCode::GATEWAY_TIMEOUT => AlumniRepositoryError::connection(message),
        _ => AlumniRepositoryError::query(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
#[path = "http_store_tests.rs"]
mod tests;
