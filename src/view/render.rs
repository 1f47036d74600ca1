//! Rendering collaborator.
//!
//! Handlers hand a [`View`] and a data bag to a [`Renderer`]; markup is the
//! renderer's business. Two renderers ship with the crate: [`ShellRenderer`]
//! writes an HTML page that carries the data bag for the front end, and
//! [`JsonRenderer`] returns the view and data bag as JSON (handy for debugging
//! and tests).

use std::fmt::Write as _;
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

/// Data bag passed to a view.
pub type ViewData = Map<String, Value>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize view data: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Views known to the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    TaskList,
    CreateTask,
    TaskDetail,
    EditTask,
    NotFound,
    Error,
}

impl View {
    /// Stable identifier handed to the renderer.
    pub fn name(&self) -> &'static str {
        match self {
            View::TaskList => "tasks/list",
            View::CreateTask => "tasks/create",
            View::TaskDetail => "tasks/detail",
            View::EditTask => "tasks/edit",
            View::NotFound => "errors/not-found",
            View::Error => "errors/error",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::TaskList => "Tasks",
            View::CreateTask => "Create a task",
            View::TaskDetail => "Task details",
            View::EditTask => "Edit task",
            View::NotFound => "Page not found",
            View::Error => "Sorry, there is a problem with the service",
        }
    }
}

pub trait Renderer: Send + Sync {
    /// Content type of the rendered output.
    fn content_type(&self) -> &'static str;

    fn render(&self, view: View, data: &ViewData) -> Result<String, RenderError>;
}

pub type RendererRef = Arc<dyn Renderer>;

/// HTML page with the data bag embedded as JSON.
#[derive(Debug, Clone, Default)]
pub struct ShellRenderer;

impl Renderer for ShellRenderer {
    fn content_type(&self) -> &'static str {
        "text/html; charset=utf-8"
    }

    fn render(&self, view: View, data: &ViewData) -> Result<String, RenderError> {
        let title = escape_html(view.title());
        let mut out = String::new();
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html lang=\"en\">")?;
        writeln!(out, "<head><meta charset=\"utf-8\"><title>{}</title></head>", title)?;
        writeln!(out, "<body data-view=\"{}\">", view.name())?;
        writeln!(out, "<main id=\"main-content\">")?;
        writeln!(out, "<h1>{}</h1>", title)?;

        if let Some(Value::Array(errors)) = data.get("errors") {
            if !errors.is_empty() {
                writeln!(out, "<div id=\"error-summary\" role=\"alert\" tabindex=\"-1\">")?;
                writeln!(out, "<h2>There is a problem</h2>")?;
                writeln!(out, "<ul>")?;
                for error in errors {
                    let message = error.get("message").and_then(Value::as_str).unwrap_or_default();
                    let anchor = error.get("anchor").and_then(Value::as_str).unwrap_or_default();
                    writeln!(
                        out,
                        "<li><a href=\"{}\">{}</a></li>",
                        escape_html(anchor),
                        escape_html(message)
                    )?;
                }
                writeln!(out, "</ul>")?;
                writeln!(out, "</div>")?;
            }
        }
        if let Some(Value::String(error)) = data.get("error") {
            writeln!(out, "<p class=\"error-message\">{}</p>", escape_html(error))?;
        }

        writeln!(out, "<div id=\"app\"></div>")?;
        writeln!(out, "</main>")?;
        let json = serde_json::to_string(data)?;
        writeln!(
            out,
            "<script type=\"application/json\" id=\"view-data\">{}</script>",
            json.replace("</", "<\\/")
        )?;
        writeln!(out, "<script src=\"/assets/task-form.js\"></script>")?;
        writeln!(out, "</body>")?;
        writeln!(out, "</html>")?;
        Ok(out)
    }
}

/// `{"view": <name>, "data": <bag>}` as JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn render(&self, view: View, data: &ViewData) -> Result<String, RenderError> {
        let body = serde_json::json!({
            "view": view.name(),
            "data": data,
        });
        Ok(serde_json::to_string(&body)?)
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
