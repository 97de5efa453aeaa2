//! HTTP surface.
//!
//! - `POST /` submit an entry, respond with its siblings
//! - `GET /addr` echo the caller's IP address
//! - `GET /health` liveness check

use crate::domain::error::DirectoryError;
use crate::service::DirectoryService;
use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use rd_01_entry_validation::{Entry, SiblingEntry};
use rd_02_record_store::EntryRepository;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info};

/// Build the directory router over a shared service.
pub fn build_router<R>(service: Arc<DirectoryService<R>>) -> Router
where
    R: EntryRepository + 'static,
{
    Router::new()
        .route("/", post(submit_entry::<R>))
        .route("/addr", get(remote_addr))
        .route("/health", get(health_check))
        .with_state(service)
}

/// Serve `router` on `listener`, exposing peer addresses to handlers.
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(addr = %addr, "Directory API listening");
    }
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}

async fn submit_entry<R: EntryRepository + 'static>(
    State(service): State<Arc<DirectoryService<R>>>,
    payload: Result<Json<Entry>, JsonRejection>,
) -> Result<Json<Vec<SiblingEntry>>, DirectoryError> {
    let Json(entry) = payload.map_err(|rejection| {
        debug!(error = %rejection, "Rejected request body");
        DirectoryError::MalformedBody(rejection.body_text())
    })?;

    service.submit(entry).await.map(Json)
}

async fn remote_addr(connect_info: Option<ConnectInfo<SocketAddr>>) -> impl IntoResponse {
    match connect_info {
        Some(ConnectInfo(addr)) => (StatusCode::OK, addr.ip().to_string()),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Could not determine remote address".to_string(),
        ),
    }
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "roster-directory",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
