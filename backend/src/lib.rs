//! Alumni directory backend library.
//!
//! The crate is laid out as a hexagonal service:
//!
//! - [`domain`] holds the record model, the directory query engine, view
//!   state with request generations, and the domain services.
//! - [`domain::ports`] declares the record store gateway and the driving
//!   ports consumed by inbound adapters.
//! - [`outbound`] implements the gateway for an in-memory collection and for
//!   the hosted document database.
//! - [`inbound`] exposes the REST surface.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
/// Request tracing middleware.
pub use middleware::Trace;
