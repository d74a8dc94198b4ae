//! Service configuration loaded via OrthoConfig.
//!
//! Every value can come from the command line, a configuration file, or an
//! `ALUMNI_*` environment variable. Unset values fall back to the defaults
//! exposed by the accessors below.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::outbound::firestore::{DEFAULT_COLLECTION, FirestoreConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATABASE: &str = "(default)";
const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PAGE_SIZE: u32 = 300;

/// Record store backing the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local collection; empty unless seeded.
    Memory,
    /// Hosted document database reached over its REST API.
    Firestore,
}

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown store backend '{0}', expected 'memory' or 'firestore'")]
    UnknownStore(String),
    #[error("invalid bind address '{value}': {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("invalid firestore base URL '{value}': {message}")]
    InvalidBaseUrl { value: String, message: String },
    #[error("ALUMNI_PROJECT_ID is required for the firestore store")]
    MissingProjectId,
}

/// Configuration values for the alumni service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ALUMNI")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// `memory` or `firestore`.
    pub store: Option<String>,
    /// Firestore project id.
    pub project_id: Option<String>,
    /// Firestore database id.
    pub database: Option<String>,
    /// Collection holding alumni documents.
    pub collection: Option<String>,
    /// Firestore REST API root.
    pub base_url: Option<String>,
    /// Request timeout for store calls, in seconds.
    pub timeout_secs: Option<u64>,
    /// Documents requested per listing page.
    pub page_size: Option<u32>,
    /// Web API key sent with every store request.
    pub api_key: Option<String>,
    /// OAuth bearer token sent with every store request.
    pub bearer_token: Option<String>,
    /// Seed the in-memory store on startup.
    #[ortho_config(default = false)]
    pub seed_on_startup: bool,
    /// Dataset used for seeding; the bundled dataset when unset.
    pub seed_dataset: Option<PathBuf>,
}

impl AppSettings {
    /// Parse the configured bind address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] when the value is not a
    /// socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }

    /// Resolve the selected store backend, defaulting to memory.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownStore`] for unrecognised values.
    pub fn store(&self) -> Result<StoreBackend, SettingsError> {
        match self.store.as_deref().map(str::trim) {
            None | Some("memory") => Ok(StoreBackend::Memory),
            Some("firestore") => Ok(StoreBackend::Firestore),
            Some(other) => Err(SettingsError::UnknownStore(other.to_owned())),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Build the Firestore gateway configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the project id is missing or the base URL does
    /// not parse.
    pub fn firestore_config(&self) -> Result<FirestoreConfig, SettingsError> {
        let project_id = self
            .project_id
            .clone()
            .filter(|value| !value.trim().is_empty())
            .ok_or(SettingsError::MissingProjectId)?;
        let raw_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(raw_url).map_err(|err| SettingsError::InvalidBaseUrl {
            value: raw_url.to_owned(),
            message: err.to_string(),
        })?;
        Ok(FirestoreConfig {
            base_url,
            project_id,
            database: self
                .database
                .clone()
                .unwrap_or_else(|| DEFAULT_DATABASE.to_owned()),
            collection: self
                .collection
                .clone()
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_owned()),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            timeout: self.timeout(),
            api_key: self.api_key.clone(),
            bearer_token: self.bearer_token.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and defaults.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 12] = [
        "ALUMNI_BIND_ADDR",
        "ALUMNI_STORE",
        "ALUMNI_PROJECT_ID",
        "ALUMNI_DATABASE",
        "ALUMNI_COLLECTION",
        "ALUMNI_BASE_URL",
        "ALUMNI_TIMEOUT_SECS",
        "ALUMNI_PAGE_SIZE",
        "ALUMNI_API_KEY",
        "ALUMNI_BEARER_TOKEN",
        "ALUMNI_SEED_ON_STARTUP",
        "ALUMNI_SEED_DATASET",
    ];

    fn load_with(overrides: &[(&str, &str)]) -> AppSettings {
        let vars = VARS.map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned());
            (name, value)
        });
        let _guard = lock_env(vars);
        AppSettings::load_from_iter([OsString::from("alumni-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let settings = load_with(&[]);
        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.store().expect("store"), StoreBackend::Memory);
        assert_eq!(settings.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(!settings.seed_on_startup);
        assert!(settings.seed_dataset.is_none());
    }

    #[rstest]
    fn firestore_settings_come_from_environment() {
        let settings = load_with(&[
            ("ALUMNI_STORE", "firestore"),
            ("ALUMNI_PROJECT_ID", "alumni-demo"),
            ("ALUMNI_TIMEOUT_SECS", "3"),
            ("ALUMNI_PAGE_SIZE", "50"),
            ("ALUMNI_API_KEY", "secret"),
        ]);
        assert_eq!(settings.store().expect("store"), StoreBackend::Firestore);

        let config = settings.firestore_config().expect("firestore config");
        assert_eq!(config.project_id, "alumni-demo");
        assert_eq!(config.database, DEFAULT_DATABASE);
        assert_eq!(config.collection, DEFAULT_COLLECTION);
        assert_eq!(config.base_url.as_str(), "https://firestore.googleapis.com/v1");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
    }

    #[rstest]
    fn firestore_requires_project_id() {
        let settings = load_with(&[("ALUMNI_STORE", "firestore")]);
        assert!(matches!(
            settings.firestore_config(),
            Err(SettingsError::MissingProjectId)
        ));
    }

    #[rstest]
    #[case("ALUMNI_STORE", "postgres")]
    #[case("ALUMNI_BIND_ADDR", "not-an-address")]
    fn invalid_values_are_reported(#[case] key: &str, #[case] value: &str) {
        let settings = load_with(&[(key, value)]);
        let failed = settings.store().is_err() || settings.bind_addr().is_err();
        assert!(failed, "{key}={value} should be rejected");
    }

    #[rstest]
    fn seeding_flag_is_read() {
        let settings = load_with(&[
            ("ALUMNI_SEED_ON_STARTUP", "true"),
            ("ALUMNI_SEED_DATASET", "/tmp/alumni.json"),
        ]);
        assert!(settings.seed_on_startup);
        assert_eq!(settings.seed_dataset, Some(PathBuf::from("/tmp/alumni.json")));
    }
}
