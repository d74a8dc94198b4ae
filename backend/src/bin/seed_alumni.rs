//! Load a seed dataset into the configured alumni store.
//!
//! Store settings come from the same `ALUMNI_*` environment as the server.
//! Seeding the in-memory store only validates the dataset, since the
//! collection disappears when the process exits.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use alumni_backend::domain::AlumniSeeder;
use alumni_backend::outbound::firestore::FirestoreAlumniRepository;
use alumni_backend::outbound::memory::InMemoryAlumniRepository;
use alumni_backend::settings::{AppSettings, StoreBackend};
use alumni_seed::SeedDataset;

#[derive(Debug, Parser)]
#[command(name = "seed-alumni", about = "Insert a seed dataset into the alumni store")]
struct Cli {
    /// Dataset JSON file; the bundled dataset when omitted.
    #[arg(long)]
    dataset: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings = AppSettings::load_from_iter([std::ffi::OsString::from("seed-alumni")])
        .wrap_err("failed to load settings")?;
    let dataset = match cli.dataset.as_deref() {
        Some(path) => SeedDataset::from_file(path)
            .wrap_err_with(|| format!("failed to load dataset {}", path.display()))?,
        None => SeedDataset::bundled().wrap_err("failed to load bundled dataset")?,
    };
    info!(entries = dataset.len(), "dataset loaded");

    let outcome = match settings.store()? {
        StoreBackend::Firestore => {
            let repository = FirestoreAlumniRepository::new(settings.firestore_config()?)
                .wrap_err("failed to build firestore gateway")?;
            AlumniSeeder::new(Arc::new(repository)).seed(dataset).await?
        }
        StoreBackend::Memory => {
            warn!("memory store selected; records are discarded on exit");
            let repository = InMemoryAlumniRepository::new(Arc::new(DefaultClock));
            AlumniSeeder::new(Arc::new(repository)).seed(dataset).await?
        }
    };
    info!(count = outcome.inserted.len(), "alumni seeding finished");
    Ok(())
}
