use std::sync::Arc;

use tasklists_server::{
    app_state::AppState,
    data_context::DataContext,
    map_routes,
    settings::{Settings, SettingsError},
    store_error::StoreError,
};
use thiserror::Error;

#[derive(Debug, Error)]
enum BootError {
    #[error("configuration: {0}")]
    Settings(#[from] SettingsError),
    #[error("could not open store: {0}")]
    Store(#[from] StoreError),
    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), BootError> {
    init_tracing();

    // ── Configuration ──────────────────────────────────────────
    let settings = Settings::load()?;

    // ── Open the store (fatal on failure) ──────────────────────
    let store = DataContext::open(&settings.database_path).map_err(|e| {
        tracing::error!(path = %settings.database_path, error = %e, "could not open store");
        e
    })?;
    tracing::info!(path = %settings.database_path, "store opened");

    let seeded = store.ensure_seed_users(&settings.seed_users)?;
    if seeded > 0 {
        tracing::info!(count = seeded, "seeded users");
    }

    // ── Shared state ───────────────────────────────────────────
    let state = Arc::new(AppState::new(store));

    // ── Router ─────────────────────────────────────────────────
    let app = map_routes(state);

    // ── Start ──────────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(settings.socket_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned the last reference to the store; it is closed by now.
    tracing::info!("server stopped, store released");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

#[cfg(not(feature = "profile-console"))]
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tasklists_server=debug,tower_http=debug,info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

#[cfg(feature = "profile-console")]
fn init_tracing() {
    console_subscriber::init();
}
