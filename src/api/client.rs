//! HTTP implementation of [`TaskApi`] on top of `reqwest`
//!
//! Thin wrapper: one request per call, no retries, no timeout. Failures are
//! logged with whatever the server sent and then normalized into a
//! [`RequestError`].

use async_trait::async_trait;
use log::{debug, error};
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::error::{Operation, RequestError};
use super::port::TaskApi;
use super::types::{
    CREATE_PATH, DELETE_PATH, EndpointProbe, ErrorBody, KNOWN_PATHS, LIST_PATH, UPDATE_PATH,
    error_message, id_url,
};
use crate::models::{Task, TaskId, TaskPayload};

/// Client for the remote task service
#[derive(Debug, Clone)]
pub struct HttpTaskClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTaskClient {
    /// Create a client for the given base URL (e.g. `http://localhost:8000`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a client reusing an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Base URL without trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET` every known endpoint and record what came back
    ///
    /// Diagnostic only: a 405 or 422 still proves the route exists.
    pub async fn probe_endpoints(&self) -> Vec<EndpointProbe> {
        let mut probes = Vec::with_capacity(KNOWN_PATHS.len());
        for path in KNOWN_PATHS {
            let url = self.url(path);
            let probe = match self.http.get(&url).send().await {
                Ok(response) => EndpointProbe {
                    url,
                    status: Some(response.status().as_u16()),
                    error: None,
                },
                Err(e) => EndpointProbe {
                    url,
                    status: None,
                    error: Some(e.to_string()),
                },
            };
            debug!("probe {} -> {:?}", probe.url, probe.status);
            probes.push(probe);
        }
        probes
    }

    async fn send(&self, op: Operation, request: RequestBuilder) -> Result<Response, RequestError> {
        request.send().await.map_err(|e| {
            error!("Network error while trying to {}: {e:?}", op.as_str());
            RequestError::network(e)
        })
    }

    /// Turn a response into `T`, normalizing any failure for `op`
    async fn finish<T: DeserializeOwned>(op: Operation, response: Response) -> Result<T, RequestError> {
        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Err(Self::reject(op, status, response).await);
        }

        response.json::<T>().await.map_err(|e| {
            error!("Unreadable response while trying to {}: {e:?}", op.as_str());
            RequestError::http(status, format!("Invalid response from server: {e}"))
        })
    }

    async fn reject(op: Operation, status: u16, response: Response) -> RequestError {
        if op == Operation::List {
            error!("Failed to {}: HTTP {status}", op.as_str());
            return RequestError::http(status, op.fallback_message(status));
        }

        let raw = response.text().await.unwrap_or_default();
        let body = ErrorBody::parse(&raw);
        error!("Full error response ({status}): {body:?}");
        RequestError::http(status, error_message(body.as_ref(), op, status))
    }
}

#[async_trait]
impl TaskApi for HttpTaskClient {
    async fn list_tasks(&self) -> Result<Vec<Task>, RequestError> {
        let request = self.http.get(self.url(LIST_PATH));
        let response = self.send(Operation::List, request).await?;
        Self::finish(Operation::List, response).await
    }

    async fn create_task(&self, text: &str) -> Result<Task, RequestError> {
        let request = self.http.post(self.url(CREATE_PATH)).json(&TaskPayload::new(text));
        let response = self.send(Operation::Create, request).await?;
        Self::finish(Operation::Create, response).await
    }

    async fn update_task(&self, id: TaskId, text: &str) -> Result<Task, RequestError> {
        let request = self
            .http
            .put(id_url(&self.base_url, UPDATE_PATH, id))
            .json(&TaskPayload::new(text));
        let response = self.send(Operation::Update, request).await?;
        Self::finish(Operation::Update, response).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<Task, RequestError> {
        let request = self
            .http
            .delete(id_url(&self.base_url, DELETE_PATH, id))
            .header(CONTENT_TYPE, "application/json");
        let response = self.send(Operation::Delete, request).await?;
        Self::finish(Operation::Delete, response).await
    }
}
