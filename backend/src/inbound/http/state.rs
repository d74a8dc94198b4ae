//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AlumniCommand, DirectoryQuery, FixtureAlumniCommand, FixtureDirectoryQuery,
    FixtureProfileQuery, ProfileQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub directory: Arc<dyn DirectoryQuery>,
    pub profiles: Arc<dyn ProfileQuery>,
    pub alumni: Arc<dyn AlumniCommand>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use alumni_backend::domain::ports::{
    ///     FixtureAlumniCommand, FixtureDirectoryQuery, FixtureProfileQuery,
    /// };
    /// use alumni_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureDirectoryQuery),
    ///     Arc::new(FixtureProfileQuery),
    ///     Arc::new(FixtureAlumniCommand),
    /// );
    /// let _ = state.directory.clone();
    /// ```
    pub fn new(
        directory: Arc<dyn DirectoryQuery>,
        profiles: Arc<dyn ProfileQuery>,
        alumni: Arc<dyn AlumniCommand>,
    ) -> Self {
        Self {
            directory,
            profiles,
            alumni,
        }
    }

    /// Build state from one service implementing every port.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: DirectoryQuery + ProfileQuery + AlumniCommand + 'static,
    {
        Self {
            directory: service.clone(),
            profiles: service.clone(),
            alumni: service,
        }
    }

    /// State backed entirely by fixture ports.
    pub fn fixture() -> Self {
        Self::new(
            Arc::new(FixtureDirectoryQuery),
            Arc::new(FixtureProfileQuery),
            Arc::new(FixtureAlumniCommand),
        )
    }
}
