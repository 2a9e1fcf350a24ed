//! HTTP server mode: the catalog browser as a small JSON API

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalog::CatalogApi;
use crate::cli::runner::episode_window;
use crate::error::{Error, Result};
use crate::model::{Gender, Status};
use crate::pagination::{CharacterFilter, CharacterPaginator};
use crate::types::OptionStringExt;

/// App state shared across handlers
#[derive(Clone)]
struct AppState {
    api: Arc<dyn CatalogApi>,
}

/// Query string for `GET /characters`
#[derive(Debug, Default, Deserialize)]
struct ListingQuery {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    species: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    page: Option<String>,
}

impl ListingQuery {
    fn to_filter(&self) -> std::result::Result<CharacterFilter, String> {
        let status = self
            .status
            .clone()
            .none_if_empty()
            .map(|s| s.parse::<Status>())
            .transpose()?;
        let gender = self
            .gender
            .clone()
            .none_if_empty()
            .map(|g| g.parse::<Gender>())
            .transpose()?;

        Ok(CharacterFilter {
            name: self.name.clone(),
            status,
            gender,
            species: self.species.clone(),
            kind: self.kind.clone(),
        })
    }
}

/// Query string for `GET /characters/:id/episodes`
#[derive(Debug, Default, Deserialize)]
struct WindowQuery {
    #[serde(default)]
    page: Option<String>,
}

/// Response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// Router over a catalog
pub fn router(api: Arc<dyn CatalogApi>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/characters", get(list_characters))
        .route("/characters/:id", get(get_character))
        .route("/characters/:id/episodes", get(get_episodes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(AppState { api }))
}

/// Start the HTTP server
pub async fn serve(api: Arc<dyn CatalogApi>, port: u16) -> Result<()> {
    let app = router(api);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// One listing page; a filter with no matches is an empty page
async fn list_characters(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListingQuery>,
) -> Response {
    let filter = match query.to_filter() {
        Ok(filter) => filter,
        Err(message) => return bad_request(message),
    };
    let page = match parse_page(query.page.as_deref(), CharacterPaginator::FIRST_PAGE) {
        Ok(page) => page,
        Err(response) => return response,
    };

    match CharacterPaginator::new(Arc::clone(&state.api))
        .try_fetch(&filter, page)
        .await
    {
        Ok(page) => (StatusCode::OK, Json(ApiResponse::success(page))).into_response(),
        Err(e) => upstream_error(&e),
    }
}

async fn get_character(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let id = match parse_number("character id", &id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.api.character(id).await {
        Ok(character) => (StatusCode::OK, Json(ApiResponse::success(character))).into_response(),
        Err(e) => upstream_error(&e),
    }
}

async fn get_episodes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<WindowQuery>,
) -> Response {
    let id = match parse_number("character id", &id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let page = match parse_page(query.page.as_deref(), 1) {
        Ok(page) => page,
        Err(response) => return response,
    };
    match episode_window(Arc::clone(&state.api), id, page).await {
        Ok(window) => (StatusCode::OK, Json(ApiResponse::success(window))).into_response(),
        Err(e) => upstream_error(&e),
    }
}

/// Absent or blank means `default`
fn parse_page(raw: Option<&str>, default: u32) -> std::result::Result<u32, Response> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => parse_number("page", raw),
        None => Ok(default),
    }
}

fn parse_number(field: &str, raw: &str) -> std::result::Result<u32, Response> {
    raw.parse()
        .map_err(|_| bad_request(format!("Invalid {field} '{raw}': expected a whole number")))
}

fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::<()>::error(message))).into_response()
}

/// 404 when the catalog says not found, 502 for anything else upstream
fn upstream_error(error: &Error) -> Response {
    let status = if error.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        tracing::warn!("Catalog request failed: {error}");
        StatusCode::BAD_GATEWAY
    };
    (status, Json(ApiResponse::<()>::error(error.to_string()))).into_response()
}
