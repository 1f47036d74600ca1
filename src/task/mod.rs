//! Task module - the records exchanged with the remote API and the raw form
//! input submitted by the browser.
//!
//! Nothing here is stored locally: every value lives for one request.

mod form;
mod types;

pub use form::TaskFormInput;
pub use types::{Statistics, StatusUpdate, Task, TaskId, TaskPayload, TaskStatus, UnknownStatus};
