//! Rendered page responses.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

use crate::task::TaskStatus;
use crate::view::{Renderer, View, ViewData};

/// Builder for a view's data bag.
#[derive(Debug, Default)]
pub struct DataBag(ViewData);

impl DataBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `key`.
    ///
    /// A value that fails to serialize is logged and stored as `null`.
    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize view data for {}: {}", key, e);
                Value::Null
            }
        };
        self.0.insert(key.to_string(), value);
        self
    }

    /// Add the `statuses` list drawn by status controls.
    pub fn with_statuses(self) -> Self {
        let statuses: Vec<Value> = TaskStatus::ALL
            .iter()
            .map(|s| serde_json::json!({ "value": s.as_str(), "label": s.label() }))
            .collect();
        self.with("statuses", statuses)
    }

    pub fn into_inner(self) -> ViewData {
        self.0
    }
}

/// Render `view` with `data`.
///
/// A renderer failure is logged and answered with a bare 500.
pub fn render_page(
    renderer: &dyn Renderer,
    status: StatusCode,
    view: View,
    data: DataBag,
) -> Response {
    match renderer.render(view, &data.into_inner()) {
        Ok(body) => {
            let headers = [(header::CONTENT_TYPE, renderer.content_type())];
            (status, headers, body).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to render {}: {}", view.name(), e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
