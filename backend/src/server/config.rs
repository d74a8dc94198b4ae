//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::web;
use alumni_backend::inbound::http::health::StoreReadiness;
use alumni_backend::inbound::http::state::HttpState;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: web::Data<HttpState>,
    pub(crate) readiness: StoreReadiness,
}

impl ServerConfig {
    /// Construct a server configuration around pre-built handler state and
    /// the readiness facts published once the listener is bound.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, http_state: HttpState, readiness: StoreReadiness) -> Self {
        Self {
            bind_addr,
            http_state: web::Data::new(http_state),
            readiness,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
