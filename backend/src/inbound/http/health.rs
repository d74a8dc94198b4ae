//! Liveness and readiness probes.
//!
//! Readiness is published by the server once the listener is bound, which
//! happens only after the store state has been built and seeded. The ready
//! body names the store backend and how many members seeding inserted.

use std::sync::OnceLock;

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::settings::StoreBackend;

/// Startup facts published once the store can serve traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreReadiness {
    pub store: StoreBackend,
    /// Members inserted by startup seeding; `None` when seeding did not run.
    pub seeded_members: Option<usize>,
}

impl StoreReadiness {
    pub fn unseeded(store: StoreBackend) -> Self {
        Self {
            store,
            seeded_members: None,
        }
    }

    pub fn seeded(store: StoreBackend, inserted: usize) -> Self {
        Self {
            store,
            seeded_members: Some(inserted),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Starting,
    Ready,
    Live,
}

/// Probe response body.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProbeBody {
    pub status: ProbeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreBackend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seeded_members: Option<usize>,
}

impl ProbeBody {
    fn with_status(status: ProbeStatus) -> Self {
        Self {
            status,
            store: None,
            seeded_members: None,
        }
    }
}

/// Shared probe state; starts not ready.
#[derive(Debug, Default)]
pub struct HealthState {
    readiness: OnceLock<StoreReadiness>,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the startup facts. Only the first call takes effect.
    pub fn mark_ready(&self, readiness: StoreReadiness) {
        if self.readiness.set(readiness).is_err() {
            warn!(?readiness, "readiness already published; ignoring");
        }
    }

    pub fn readiness(&self) -> Option<StoreReadiness> {
        self.readiness.get().copied()
    }

    pub fn is_ready(&self) -> bool {
        self.readiness.get().is_some()
    }
}

fn probe_response(ok: bool, body: ProbeBody) -> HttpResponse {
    let mut response = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(body)
}

/// Readiness probe. 200 with the store summary once startup has finished,
/// 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Store is built and seeded", body = ProbeBody),
        (status = 503, description = "Startup has not finished", body = ProbeBody)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    match state.readiness() {
        Some(readiness) => probe_response(
            true,
            ProbeBody {
                status: ProbeStatus::Ready,
                store: Some(readiness.store),
                seeded_members: readiness.seeded_members,
            },
        ),
        None => probe_response(false, ProbeBody::with_status(ProbeStatus::Starting)),
    }
}

/// Liveness probe. 200 whenever the worker answers.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses((status = 200, description = "Worker is answering", body = ProbeBody))
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    probe_response(true, ProbeBody::with_status(ProbeStatus::Live))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn get_ready(state: web::Data<HealthState>) -> (StatusCode, Option<String>, Value) {
        let app = actix_test::init_service(App::new().app_data(state).service(ready)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        let status = response.status();
        let cache = response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        (status, cache, actix_test::read_body_json(response).await)
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_is_unavailable_until_startup_finishes() {
        let (status, cache, body) = get_ready(web::Data::new(HealthState::new())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(cache.as_deref(), Some("no-store"));
        assert_eq!(body, json!({ "status": "starting" }));
    }

    #[rstest]
    #[case(
        StoreReadiness::seeded(StoreBackend::Memory, 6),
        json!({ "status": "ready", "store": "memory", "seededMembers": 6 })
    )]
    #[case(
        StoreReadiness::unseeded(StoreBackend::Firestore),
        json!({ "status": "ready", "store": "firestore" })
    )]
    #[actix_web::test]
    async fn readiness_reports_the_store(#[case] readiness: StoreReadiness, #[case] expected: Value) {
        let state = web::Data::new(HealthState::new());
        state.mark_ready(readiness);
        let (status, cache, body) = get_ready(state).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache.as_deref(), Some("no-store"));
        assert_eq!(body, expected);
    }

    #[rstest]
    fn readiness_is_published_once() {
        let state = HealthState::new();
        state.mark_ready(StoreReadiness::seeded(StoreBackend::Memory, 6));
        state.mark_ready(StoreReadiness::unseeded(StoreBackend::Firestore));
        assert_eq!(
            state.readiness(),
            Some(StoreReadiness::seeded(StoreBackend::Memory, 6))
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn liveness_answers_before_readiness() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(HealthState::new()))
                .service(live),
        )
        .await;
        let body: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get().uri("/health/live").to_request(),
        )
        .await;
        assert_eq!(body, json!({ "status": "live" }));
    }
}
