//! Request handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::client::{Client, ClientInput, NewClient};
use crate::error::{Error, Result};
use crate::view;

use super::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// `GET /` serves the embedded page.
pub async fn index() -> Html<String> {
    Html(view::render_page())
}

/// `GET /health` reports liveness and the record count.
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>> {
    let clients = state.storage()?.count()?;
    Ok(Json(json!({ "status": "ok", "clients": clients })))
}

/// `GET /api/clients?q=` returns matching records as JSON.
///
/// A missing or blank term yields an empty list, results are opt-in.
pub async fn list_clients(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Client>>> {
    let term = params.q.unwrap_or_default();
    let clients = state.storage()?.search(&term, state.search_limit())?;
    debug!(term = %term, matches = clients.len(), "search");
    Ok(Json(clients))
}

/// `GET /fragments/clients?q=` returns server-rendered table rows.
pub async fn client_rows(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>> {
    let term = params.q.unwrap_or_default();
    if term.trim().is_empty() {
        return Ok(Html(view::prompt_fragment()));
    }
    let clients = state.storage()?.search(&term, state.search_limit())?;
    Ok(Html(view::render_results(&clients)))
}

/// `POST /api/clients` validates the input and persists a new record.
pub async fn create_client(
    State(state): State<AppState>,
    Json(input): Json<ClientInput>,
) -> Result<(StatusCode, Json<Client>)> {
    let new_client = NewClient::from_input(input)?;
    let client = state.storage()?.insert(&new_client)?;
    debug!(id = client.id, name = %client.name, "client created");
    Ok((StatusCode::CREATED, Json(client)))
}

/// `DELETE /api/clients/:id` removes a record by id.
///
/// A non-integer segment is a 400, an unknown id a 404.
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let parsed: i64 = id
        .trim()
        .parse()
        .map_err(|_| Error::invalid_id(id.trim()))?;
    if state.storage()?.delete(parsed)? {
        debug!(id = parsed, "client removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::not_found(parsed))
    }
}
