//! Application builder: wires store, repositories, services and router.

use std::sync::Arc;

use axum::Router;
use chrono::Utc;

use pluginsync_core::config::AppConfig;
use pluginsync_core::error::{AppError, ErrorKind};
use pluginsync_core::result::AppResult;
use pluginsync_core::traits::store::DocumentStore;
use pluginsync_database::repositories::{OrganizationRepository, PluginRepository};
use pluginsync_service::{
    HttpPingTransport, PingDispatcher, PingTransport, PluginResolver, QueueAppender,
    SyncOrchestrator,
};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Wire repositories and services over an opened store.
pub fn build_state(config: AppConfig, store: Arc<dyn DocumentStore>) -> AppResult<AppState> {
    let transport: Arc<dyn PingTransport> = Arc::new(HttpPingTransport::new(&config.sync)?);
    Ok(build_state_with_transport(config, store, transport))
}

/// Like [`build_state`] but with a caller-supplied ping transport.
pub fn build_state_with_transport(
    config: AppConfig,
    store: Arc<dyn DocumentStore>,
    transport: Arc<dyn PingTransport>,
) -> AppState {
    let org_repo = Arc::new(OrganizationRepository::new(Arc::clone(&store)));
    let plugin_repo = Arc::new(PluginRepository::new(Arc::clone(&store)));

    let resolver = PluginResolver::new(org_repo);
    let appender = Arc::new(QueueAppender::new(Arc::clone(&plugin_repo)));
    let dispatcher = Arc::new(PingDispatcher::new(Arc::clone(&plugin_repo), transport));
    let orchestrator = Arc::new(SyncOrchestrator::new(
        resolver,
        appender,
        dispatcher,
        &config.sync,
    ));

    AppState {
        config: Arc::new(config),
        store,
        plugin_repo,
        orchestrator,
        started_at: Utc::now(),
    }
}

/// Runs the PluginSync server until a shutdown signal arrives.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    tracing::info!("Starting PluginSync server...");

    let store = pluginsync_database::store::open(&config).await?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_app(build_state(config, store)?);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;

    tracing::info!(%addr, "PluginSync server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    tracing::info!("PluginSync server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
