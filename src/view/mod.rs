//! Everything between an API task and rendered output.

mod assemble;
mod render;

pub use assemble::{
    assemble_task, assemble_tasks, due_date_parts, format_timestamp, is_overdue, DueDateParts,
    TaskView, DISPLAY_FORMAT,
};
pub use render::{
    JsonRenderer, RenderError, Renderer, RendererRef, ShellRenderer, View, ViewData,
};
