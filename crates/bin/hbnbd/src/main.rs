//! # hbnbd: hbnb API daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Construct the configured storage backend (`SQLite` or in-memory)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer, no domain logic belongs here.

mod config;

use hbnb_adapter_http_axum::router;
use hbnb_adapter_http_axum::state::AppState;
use hbnb_adapter_storage_sqlite_sqlx::{
    SqliteAmenityRepository, SqliteCityRepository, SqlitePlaceRepository, SqliteStateRepository,
    SqliteUserRepository,
};
use hbnb_app::memory::InMemoryRepository;
use hbnb_app::ports::{
    AmenityRepository, CityRepository, PlaceRepository, StateRepository, UserRepository,
};
use hbnb_domain::amenity::Amenity;
use hbnb_domain::city::City;
use hbnb_domain::place::Place;
use hbnb_domain::state::State;
use hbnb_domain::user::User;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, StorageBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    match config.storage.backend {
        StorageBackend::Sqlite => {
            let db = hbnb_adapter_storage_sqlite_sqlx::Config {
                database_url: config.storage.database_url.clone(),
            }
            .build()
            .await?;
            let pool = db.pool().clone();
            tracing::info!(database_url = %config.storage.database_url, "sqlite storage ready");

            let state = AppState::from_repositories(
                SqliteStateRepository::new(pool.clone()),
                SqliteCityRepository::new(pool.clone()),
                SqliteUserRepository::new(pool.clone()),
                SqliteAmenityRepository::new(pool.clone()),
                SqlitePlaceRepository::new(pool),
            );
            serve(&config, state).await
        }
        StorageBackend::Memory => {
            tracing::warn!("in-memory storage, data is lost on shutdown");
            let state = AppState::from_repositories(
                InMemoryRepository::<State>::new(),
                InMemoryRepository::<City>::new(),
                InMemoryRepository::<User>::new(),
                InMemoryRepository::<Amenity>::new(),
                InMemoryRepository::<Place>::new(),
            );
            serve(&config, state).await
        }
    }
}

async fn serve<SR, CR, UR, AR, PR>(
    config: &Config,
    state: AppState<SR, CR, UR, AR, PR>,
) -> anyhow::Result<()>
where
    SR: StateRepository + 'static,
    CR: CityRepository + 'static,
    UR: UserRepository + 'static,
    AR: AmenityRepository + 'static,
    PR: PlaceRepository + 'static,
{
    let app = router::build(state).layer(router::cors(&config.cors.allowed_origins)?);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "hbnbd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("hbnbd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
