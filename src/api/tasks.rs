//! Task page handlers.
//!
//! One handler per route. Reads go straight to the gateway; writes pass
//! through the form validator first. Validation failures always re-render the
//! submitted form with the user's input; they never redirect.

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;
use serde::Deserialize;

use crate::gateway::{GatewayError, GatewayResult};
use crate::task::{Task, TaskFormInput, TaskStatus};
use crate::validation::{validate_create, validate_edit, FieldError};
use crate::view::{assemble_task, assemble_tasks, View};

use super::page::DataBag;
use super::routes::AppState;

/// Shown when the task list could not be loaded.
pub const LIST_ERROR: &str = "Unable to load tasks. Please try again later.";
/// Shown on the generic error page.
pub const SERVICE_ERROR: &str =
    "Sorry, there is a problem with the service. Please try again later.";
/// Shown when a validated form could not be saved.
pub const SAVE_ERROR: &str = "Your changes could not be saved. Please try again.";

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    #[serde(default)]
    pub status: String,
}

fn task_path(id: &str) -> String {
    format!("/tasks/{}", urlencoding::encode(id))
}

fn not_found_page(state: &AppState) -> Response {
    state.page(StatusCode::NOT_FOUND, View::NotFound, DataBag::new())
}

fn error_page(state: &AppState) -> Response {
    state.page(
        StatusCode::INTERNAL_SERVER_ERROR,
        View::Error,
        DataBag::new().with("error", SERVICE_ERROR),
    )
}

/// Page for a failed single-task read.
fn read_failure_page(state: &AppState, id: &str, err: GatewayError) -> Response {
    match err {
        GatewayError::NotFound => {
            tracing::info!("Task {} not found", id);
            not_found_page(state)
        }
        GatewayError::Upstream(reason) => {
            tracing::error!("Failed to load task {}: {}", id, reason);
            error_page(state)
        }
    }
}

/// Load `tasks` and the statistics concurrently and render the list.
///
/// If either call fails the list is rendered empty with a generic message;
/// partial pages are never shown.
async fn render_list<F>(state: &AppState, tasks: F, extra: DataBag) -> Response
where
    F: Future<Output = GatewayResult<Vec<Task>>>,
{
    let data = match tokio::try_join!(tasks, state.gateway.statistics()) {
        Ok((tasks, statistics)) => extra
            .with("tasks", assemble_tasks(tasks, Utc::now()))
            .with("statistics", statistics),
        Err(e) => {
            tracing::error!("Failed to load task list: {}", e);
            extra
                .with("tasks", Vec::<Task>::new())
                .with("statistics", serde_json::Value::Null)
                .with("error", LIST_ERROR)
        }
    };
    state.page(StatusCode::OK, View::TaskList, data)
}

/// `GET /`
pub async fn list_tasks(State(state): State<Arc<AppState>>) -> Response {
    render_list(&state, state.gateway.list_tasks(), DataBag::new()).await
}

/// `GET /tasks/filter/:status`
pub async fn filter_tasks(
    State(state): State<Arc<AppState>>,
    Path(status): Path<String>,
) -> Response {
    let Ok(status) = status.parse::<TaskStatus>() else {
        tracing::info!("Unknown status filter: {}", status);
        return not_found_page(&state);
    };
    let extra = DataBag::new().with("currentFilter", status);
    render_list(&state, state.gateway.tasks_by_status(status), extra).await
}

/// `GET /tasks/search?q=`
pub async fn search_tasks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let term = params.q.trim();
    if term.is_empty() {
        return Redirect::to("/").into_response();
    }
    let extra = DataBag::new().with("searchTerm", term);
    render_list(&state, state.gateway.search_tasks(term), extra).await
}

/// `GET /tasks/create`
pub async fn show_create(State(state): State<Arc<AppState>>) -> Response {
    state.page(StatusCode::OK, View::CreateTask, DataBag::new().with_statuses())
}

/// Data bag for re-rendering the create form around the user's input.
fn create_form(input: &TaskFormInput, errors: &[FieldError]) -> DataBag {
    DataBag::new()
        .with("errors", errors)
        .with("formData", input)
        .with_statuses()
}

/// `POST /tasks/create`
pub async fn submit_create(
    State(state): State<Arc<AppState>>,
    Form(input): Form<TaskFormInput>,
) -> Response {
    let payload = match validate_create(&input) {
        Ok(payload) => payload,
        Err(errors) => {
            tracing::debug!("Create form rejected with {} error(s)", errors.len());
            let data = create_form(&input, &errors);
            return state.page(StatusCode::BAD_REQUEST, View::CreateTask, data);
        }
    };

    match state.gateway.create_task(&payload).await {
        Ok(task) => {
            tracing::info!("Created task {}", task.id);
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create task: {}", e);
            let data = create_form(&input, &[]).with("error", SAVE_ERROR);
            state.page(StatusCode::INTERNAL_SERVER_ERROR, View::CreateTask, data)
        }
    }
}

/// `GET /tasks/:id`
pub async fn show_task(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    match state.gateway.get_task(&id).await {
        Ok(task) => {
            let data = DataBag::new()
                .with("task", assemble_task(task, Utc::now()))
                .with_statuses();
            state.page(StatusCode::OK, View::TaskDetail, data)
        }
        Err(e) => read_failure_page(&state, &id, e),
    }
}

/// `GET /tasks/:id/edit`
pub async fn show_edit(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    match state.gateway.get_task(&id).await {
        Ok(task) => {
            let data = DataBag::new()
                .with("task", assemble_task(task, Utc::now()))
                .with_statuses();
            state.page(StatusCode::OK, View::EditTask, data)
        }
        Err(e) => read_failure_page(&state, &id, e),
    }
}

/// Re-fetch the task and re-render the edit form around the user's input.
async fn rerender_edit(
    state: &AppState,
    id: &str,
    status: StatusCode,
    input: &TaskFormInput,
    errors: &[FieldError],
    error: Option<&str>,
) -> Response {
    match state.gateway.get_task(id).await {
        Ok(task) => {
            let mut data = DataBag::new()
                .with("task", assemble_task(task, Utc::now()))
                .with("errors", errors)
                .with("formData", input)
                .with_statuses();
            if let Some(error) = error {
                data = data.with("error", error);
            }
            state.page(status, View::EditTask, data)
        }
        Err(e) => {
            tracing::error!("Failed to reload task {} for edit form: {}", id, e);
            error_page(state)
        }
    }
}

/// `POST /tasks/:id/edit`
pub async fn submit_edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(input): Form<TaskFormInput>,
) -> Response {
    let payload = match validate_edit(&input) {
        Ok(payload) => payload,
        Err(errors) => {
            tracing::debug!(
                "Edit form for task {} rejected with {} error(s)",
                id,
                errors.len()
            );
            return rerender_edit(
                &state,
                &id,
                StatusCode::BAD_REQUEST,
                &input,
                &errors,
                None,
            )
            .await;
        }
    };

    match state.gateway.update_task(&id, &payload).await {
        Ok(_) => {
            tracing::info!("Updated task {}", id);
            Redirect::to(&task_path(&id)).into_response()
        }
        Err(GatewayError::NotFound) => {
            tracing::info!("Task {} vanished before update", id);
            not_found_page(&state)
        }
        Err(GatewayError::Upstream(reason)) => {
            tracing::error!("Failed to update task {}: {}", id, reason);
            rerender_edit(
                &state,
                &id,
                StatusCode::INTERNAL_SERVER_ERROR,
                &input,
                &[],
                Some(SAVE_ERROR),
            )
            .await
        }
    }
}

/// `POST /tasks/:id/status`
///
/// Best effort: always lands back on the task page.
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Response {
    match form.status.trim().parse::<TaskStatus>() {
        Ok(status) => match state.gateway.update_status(&id, status).await {
            Ok(_) => tracing::info!("Task {} moved to {}", id, status),
            Err(e) => tracing::warn!("Failed to update status of task {}: {}", id, e),
        },
        Err(e) => tracing::warn!("Ignoring status update for task {}: {}", id, e),
    }
    Redirect::to(&task_path(&id)).into_response()
}

/// `POST /tasks/:id/delete`
///
/// Back to the list on success, back to the task otherwise.
pub async fn delete_task(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    match state.gateway.delete_task(&id).await {
        Ok(()) => {
            tracing::info!("Deleted task {}", id);
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::warn!("Failed to delete task {}: {}", id, e);
            Redirect::to(&task_path(&id)).into_response()
        }
    }
}

/// Fallback for unknown routes.
pub async fn not_found(State(state): State<Arc<AppState>>) -> Response {
    not_found_page(&state)
}
