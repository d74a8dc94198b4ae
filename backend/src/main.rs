//! Backend entry-point: loads settings, builds the record store, and serves
//! the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use alumni_backend::inbound::http::health::HealthState;
use alumni_backend::settings::AppSettings;
use server::{ServerConfig, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load_from_iter(std::env::args_os()).wrap_err("failed to load settings")?;
    let bind_addr = settings.bind_addr()?;
    let (http_state, readiness) = build_http_state(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, http_state, readiness);
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "alumni service listening");
    server.await.wrap_err("server terminated abnormally")
}
