//! The only path to the remote task API.
//!
//! Every call, read or write, resolves to `Ok(value)`, [`GatewayError::NotFound`]
//! or [`GatewayError::Upstream`]. Handlers never see transport-specific error
//! shapes.

mod http;

pub use http::HttpTaskGateway;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::task::{Statistics, Task, TaskPayload, TaskStatus};

/// Failure of a remote API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The API answered 404.
    #[error("task not found")]
    NotFound,
    /// Transport failure, non-404 error status or undecodable body.
    ///
    /// The reason is for logs only; it is never rendered.
    #[error("upstream failure: {0}")]
    Upstream(String),
}

impl GatewayError {
    pub fn upstream(reason: impl Into<String>) -> Self {
        GatewayError::Upstream(reason.into())
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Operations offered by the remote task API.
///
/// Ids are the opaque path segment taken from the request URL.
#[async_trait]
pub trait TaskGateway: Send + Sync {
    async fn list_tasks(&self) -> GatewayResult<Vec<Task>>;
    async fn get_task(&self, id: &str) -> GatewayResult<Task>;
    async fn tasks_by_status(&self, status: TaskStatus) -> GatewayResult<Vec<Task>>;
    async fn search_tasks(&self, query: &str) -> GatewayResult<Vec<Task>>;
    async fn statistics(&self) -> GatewayResult<Statistics>;

    async fn create_task(&self, payload: &TaskPayload) -> GatewayResult<Task>;
    async fn update_task(&self, id: &str, payload: &TaskPayload) -> GatewayResult<Task>;
    async fn update_status(&self, id: &str, status: TaskStatus) -> GatewayResult<Task>;
    async fn delete_task(&self, id: &str) -> GatewayResult<()>;
}

/// Shared handle passed into the router.
pub type GatewayRef = Arc<dyn TaskGateway>;
