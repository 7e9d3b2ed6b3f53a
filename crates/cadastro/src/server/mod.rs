//! HTTP server for the registry API and UI.
//!
//! This module wires the storage layer to an axum router: the JSON API
//! under `/api/clients`, the server-rendered row fragments the UI swaps
//! in, and the embedded page itself.

mod handlers;

use std::sync::{Arc, Mutex, MutexGuard};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::Storage;

/// Shared state for request handlers.
///
/// The storage connection sits behind a mutex; handlers hold the lock
/// only across a single synchronous storage call, never across an await
/// point. SQLite's WAL mode handles the rest.
#[derive(Debug, Clone)]
pub struct AppState {
    storage: Arc<Mutex<Storage>>,
    search_limit: usize,
}

impl AppState {
    /// Create the shared state around an opened storage.
    #[must_use]
    pub fn new(storage: Storage, search_limit: usize) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
            search_limit,
        }
    }

    /// Lock the storage for one operation.
    fn storage(&self) -> Result<MutexGuard<'_, Storage>> {
        self.storage
            .lock()
            .map_err(|_| Error::internal("storage mutex poisoned"))
    }

    /// Maximum number of records a search may return.
    fn search_limit(&self) -> usize {
        self.search_limit
    }
}

/// Build the application router.
#[must_use]
pub fn router(state: AppState, cors: bool) -> Router {
    let mut app = Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/fragments/clients", get(handlers::client_rows))
        .route(
            "/api/clients",
            get(handlers::list_clients).post(handlers::create_client),
        )
        .route("/api/clients/:id", delete(handlers::delete_client))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if cors {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    app
}

/// Open the configured database and serve the application.
///
/// Runs until the process is terminated.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the listener
/// cannot bind.
pub async fn serve(config: &Config) -> Result<()> {
    let storage = Storage::open(config.database_path())?;
    let state = AppState::new(storage, config.storage.search_limit);
    let app = router(state, config.server.cors);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Servidor rodando em http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
            Error::InvalidId { .. } => (StatusCode::BAD_REQUEST, "ID inválido.".to_string()),
            Error::NotFound { .. } => {
                (StatusCode::NOT_FOUND, "Cliente não encontrado.".to_string())
            }
            _ => {
                // Detail stays in the log; the client gets a generic message
                error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro interno do servidor.".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
