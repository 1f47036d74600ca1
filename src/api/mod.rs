//! HTTP surface of the task front end.
//!
//! ## Routes
//!
//! - `GET /` - Task list with statistics
//! - `GET /tasks/filter/{status}` - Task list filtered by status
//! - `GET /tasks/search?q=` - Task list matching a search term
//! - `GET /tasks/create` - Empty create form
//! - `POST /tasks/create` - Submit the create form
//! - `GET /tasks/{id}` - Task details
//! - `GET /tasks/{id}/edit` - Edit form
//! - `POST /tasks/{id}/edit` - Submit the edit form
//! - `POST /tasks/{id}/status` - Quick status change
//! - `POST /tasks/{id}/delete` - Delete a task
//! - `GET /health` - Health check
//! - `GET /assets/task-form.js` - Browser-side form checks

mod page;
mod routes;
pub mod tasks;

pub use page::{render_page, DataBag};
pub use routes::{router, serve, AppState};
