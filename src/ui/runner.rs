//! Server bootstrap: wires the stores, hub and router together and serves
//! the axum application.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    domain::{ConversationRepository, PresenceRegistry},
    infrastructure::{
        DeliveryRouter,
        repository::{InMemoryConversationStore, InMemoryPresenceRegistry},
    },
    ui::{
        handler::{get_presence, get_user_presence, health_check, websocket_handler},
        signal,
        state::AppState,
    },
    usecase::PresenceHub,
};

/// Build the application router over fresh in-memory stores.
pub fn build_app() -> Router {
    let registry: Arc<dyn PresenceRegistry> = Arc::new(InMemoryPresenceRegistry::new());
    let conversations: Arc<dyn ConversationRepository> =
        Arc::new(InMemoryConversationStore::new());
    let router = Arc::new(DeliveryRouter::new(registry.clone()));
    let hub = Arc::new(PresenceHub::new(registry.clone(), router.clone()));

    let state = Arc::new(AppState {
        registry,
        conversations,
        hub,
        router,
    });

    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/presence", get(get_presence))
        .route("/api/presence/{username}", get(get_user_presence))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server until a shutdown signal arrives.
pub async fn run(host: &str, port: u16) -> std::io::Result<()> {
    let app = build_app();

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(signal::shutdown_signal())
        .await
}
