//! reqwest-backed gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use super::{GatewayError, GatewayResult, TaskGateway};
use crate::task::{Statistics, StatusUpdate, Task, TaskPayload, TaskStatus};

/// Client for the remote task API.
#[derive(Clone)]
pub struct HttpTaskGateway {
    client: Client,
    base_url: String,
}

impl HttpTaskGateway {
    /// Create a gateway for `base_url`.
    ///
    /// `timeout` bounds every request; `None` leaves reqwest's default (no
    /// timeout).
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/api/tasks", self.base_url)
    }

    fn task_url(&self, id: &str) -> String {
        format!("{}/{}", self.tasks_url(), urlencoding::encode(id))
    }

    /// Send a request and return the raw body of a successful response.
    async fn send(&self, request: RequestBuilder, what: &str) -> GatewayResult<String> {
        let resp = request
            .send()
            .await
            .map_err(|e| GatewayError::upstream(format!("{}: {}", what, e)))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound);
        }

        // a body that fails mid-read is a failed call even on 2xx
        let body = resp.text().await;
        if !status.is_success() {
            let detail = body.unwrap_or_else(|e| format!("<unreadable body: {}>", e));
            return Err(GatewayError::upstream(format!(
                "{} failed: HTTP {} - {}",
                what,
                status.as_u16(),
                detail
            )));
        }
        body.map_err(|e| {
            GatewayError::upstream(format!("{}: failed to read response body: {}", what, e))
        })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> GatewayResult<T> {
        let text = self.send(request, what).await?;
        serde_json::from_str(&text).map_err(|e| {
            GatewayError::upstream(format!("{}: failed to parse response: {}", what, e))
        })
    }
}

#[async_trait]
impl TaskGateway for HttpTaskGateway {
    async fn list_tasks(&self) -> GatewayResult<Vec<Task>> {
        self.fetch(self.client.get(self.tasks_url()), "GET /api/tasks")
            .await
    }

    async fn get_task(&self, id: &str) -> GatewayResult<Task> {
        self.fetch(self.client.get(self.task_url(id)), "GET /api/tasks/{id}")
            .await
    }

    async fn tasks_by_status(&self, status: TaskStatus) -> GatewayResult<Vec<Task>> {
        let url = format!("{}/status/{}", self.tasks_url(), status.as_str());
        self.fetch(self.client.get(url), "GET /api/tasks/status/{status}")
            .await
    }

    async fn search_tasks(&self, query: &str) -> GatewayResult<Vec<Task>> {
        let url = format!(
            "{}/search?q={}",
            self.tasks_url(),
            urlencoding::encode(query)
        );
        self.fetch(self.client.get(url), "GET /api/tasks/search").await
    }

    async fn statistics(&self) -> GatewayResult<Statistics> {
        let url = format!("{}/statistics", self.tasks_url());
        self.fetch(self.client.get(url), "GET /api/tasks/statistics")
            .await
    }

    async fn create_task(&self, payload: &TaskPayload) -> GatewayResult<Task> {
        let request = self.client.post(self.tasks_url()).json(payload);
        self.fetch(request, "POST /api/tasks").await
    }

    async fn update_task(&self, id: &str, payload: &TaskPayload) -> GatewayResult<Task> {
        let request = self.client.put(self.task_url(id)).json(payload);
        self.fetch(request, "PUT /api/tasks/{id}").await
    }

    async fn update_status(&self, id: &str, status: TaskStatus) -> GatewayResult<Task> {
        let url = format!("{}/status", self.task_url(id));
        let request = self.client.patch(url).json(&StatusUpdate { status });
        self.fetch(request, "PATCH /api/tasks/{id}/status").await
    }

    async fn delete_task(&self, id: &str) -> GatewayResult<()> {
        self.send(self.client.delete(self.task_url(id)), "DELETE /api/tasks/{id}")
            .await
            .map(|_| ())
    }
}
