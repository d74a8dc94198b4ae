//! Construct handler state from loaded settings.
//!
//! The store backend is chosen once at startup. The in-memory store can be
//! seeded for demos; the hosted store is never seeded implicitly. The
//! returned [`StoreReadiness`] is what the readiness probe publishes.

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultClock;
use tracing::{info, warn};

use alumni_backend::domain::ports::AlumniRepository;
use alumni_backend::domain::{AlumniSeeder, DirectoryService};
use alumni_backend::inbound::http::health::StoreReadiness;
use alumni_backend::inbound::http::state::HttpState;
use alumni_backend::outbound::firestore::FirestoreAlumniRepository;
use alumni_backend::outbound::memory::InMemoryAlumniRepository;
use alumni_backend::settings::{AppSettings, StoreBackend};
use alumni_seed::SeedDataset;

/// Build the HTTP state for the configured store backend.
///
/// # Errors
///
/// Returns an error when the settings are invalid, the gateway cannot be
/// built, or startup seeding fails.
pub async fn build_http_state(settings: &AppSettings) -> Result<(HttpState, StoreReadiness)> {
    let store = settings.store()?;
    match store {
        StoreBackend::Memory => {
            let repository = Arc::new(InMemoryAlumniRepository::new(Arc::new(DefaultClock)));
            let readiness = if settings.seed_on_startup {
                let inserted = seed(repository.clone(), settings).await?;
                StoreReadiness::seeded(store, inserted)
            } else {
                StoreReadiness::unseeded(store)
            };
            info!(store = "memory", "alumni store ready");
            Ok((state_for(repository), readiness))
        }
        StoreBackend::Firestore => {
            let config = settings.firestore_config()?;
            if settings.seed_on_startup {
                warn!("seed_on_startup is ignored for the firestore store; use seed-alumni");
            }
            info!(
                store = "firestore",
                project = %config.project_id,
                collection = %config.collection,
                "alumni store ready"
            );
            let repository = FirestoreAlumniRepository::new(config)
                .wrap_err("failed to build firestore gateway")?;
            Ok((state_for(Arc::new(repository)), StoreReadiness::unseeded(store)))
        }
    }
}

fn state_for<R>(repository: Arc<R>) -> HttpState
where
    R: AlumniRepository + 'static,
{
    HttpState::from_service(Arc::new(DirectoryService::new(repository)))
}

/// Load the configured seed dataset, falling back to the bundled one.
pub fn load_dataset(settings: &AppSettings) -> Result<SeedDataset> {
    match settings.seed_dataset.as_deref() {
        Some(path) => SeedDataset::from_file(path)
            .wrap_err_with(|| format!("failed to load dataset {}", path.display())),
        None => SeedDataset::bundled().wrap_err("failed to load bundled dataset"),
    }
}

async fn seed<R>(repository: Arc<R>, settings: &AppSettings) -> Result<usize>
where
    R: AlumniRepository,
{
    let dataset = load_dataset(settings)?;
    let outcome = AlumniSeeder::new(repository)
        .seed(dataset)
        .await
        .wrap_err("startup seeding failed")?;
    let inserted = outcome.inserted.len();
    info!(count = inserted, "seeded in-memory alumni store");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use alumni_backend::domain::directory::DirectoryFilter;
    use alumni_backend::domain::ports::DirectoryQuery;
    use env_lock::lock_env;
    use ortho_config::OrthoConfig;
    use rstest::rstest;

    fn settings(seed: bool) -> AppSettings {
        let _guard = lock_env([
            ("ALUMNI_STORE", None::<String>),
            ("ALUMNI_SEED_DATASET", None::<String>),
            ("ALUMNI_SEED_ON_STARTUP", Some(seed.to_string())),
        ]);
        AppSettings::load_from_iter([OsString::from("alumni-backend")])
            .expect("config should load")
    }

    #[rstest]
    #[case(false, 0, None)]
    #[case(true, 6, Some(6))]
    #[actix_web::test]
    async fn memory_store_is_seeded_only_on_request(
        #[case] seed: bool,
        #[case] expected: usize,
        #[case] seeded_members: Option<usize>,
    ) {
        let (state, readiness) = build_http_state(&settings(seed))
            .await
            .expect("state builds");
        assert_eq!(readiness.store, StoreBackend::Memory);
        assert_eq!(readiness.seeded_members, seeded_members);
        let listing = state
            .directory
            .list_directory(&DirectoryFilter::default())
            .await
            .expect("listing");
        assert_eq!(listing.total, expected);
    }
}
