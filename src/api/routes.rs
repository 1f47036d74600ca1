//! HTTP route table and server bootstrap.

use std::sync::Arc;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::{Config, RenderMode};
use crate::gateway::{GatewayRef, HttpTaskGateway};
use crate::view::{JsonRenderer, RendererRef, ShellRenderer, View};

use super::page::{render_page, DataBag};
use super::tasks;

/// Browser-side form checks, served as a static asset.
const TASK_FORM_JS: &str = include_str!("../../assets/task-form.js");

/// Shared application state.
///
/// Holds no per-request data; everything mutable lives inside one handler call.
pub struct AppState {
    pub config: Config,
    /// The only channel to the remote task API
    pub gateway: GatewayRef,
    pub renderer: RendererRef,
}

impl AppState {
    pub fn new(config: Config, gateway: GatewayRef, renderer: RendererRef) -> Self {
        Self {
            config,
            gateway,
            renderer,
        }
    }

    /// Render `view` with the configured renderer.
    pub fn page(&self, status: StatusCode, view: View, data: DataBag) -> Response {
        render_page(self.renderer.as_ref(), status, view, data)
    }
}

/// Build the router over `state`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(tasks::list_tasks))
        .route("/health", get(health))
        .route("/assets/task-form.js", get(task_form_script))
        .route("/tasks/filter/:status", get(tasks::filter_tasks))
        .route("/tasks/search", get(tasks::search_tasks))
        .route("/tasks/create", get(tasks::show_create).post(tasks::submit_create))
        .route("/tasks/:id", get(tasks::show_task))
        .route("/tasks/:id/edit", get(tasks::show_edit).post(tasks::submit_edit))
        .route("/tasks/:id/status", post(tasks::update_status))
        .route("/tasks/:id/delete", post(tasks::delete_task))
        .fallback(tasks::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let gateway: GatewayRef = Arc::new(HttpTaskGateway::new(
        config.task_api_url.clone(),
        config.api_timeout,
    )?);
    tracing::info!("Task API at {}", config.task_api_url);

    let renderer: RendererRef = match config.render_mode {
        RenderMode::Html => Arc::new(ShellRenderer),
        RenderMode::Json => Arc::new(JsonRenderer),
    };

    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::new(config, gateway, renderer));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn task_form_script() -> Response {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        TASK_FORM_JS,
    )
        .into_response()
}
