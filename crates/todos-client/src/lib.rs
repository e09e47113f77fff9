//! Todos client - talks to a todos server over HTTP

use chrono::Utc;
use todos_model::{Day, Span, TaskList, Todo};

pub use todos_model as model;

/// Client for a running todos server
pub struct TodoClient {
    base_url: String,
    client: reqwest::Client,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Post a todo to its day, stamping `Created` with now when unset.
    ///
    /// Returns the server's confirmation line.
    pub async fn post(&self, todo: &mut Todo) -> Result<String, ClientError> {
        let day = todo.day.ok_or(ClientError::MissingDay)?;
        if todo.created.is_none() {
            todo.created = Some(Utc::now());
        }

        let url = format!("{}/day/{}", self.base_url, day);
        let response = self
            .client
            .post(&url)
            .json(&*todo)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        tracing::debug!(%url, status = %response.status(), "posted todo");

        if !response.status().is_success() {
            return Err(ClientError::Http(response.status().as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }

    pub async fn day_tasks(&self, day: Day) -> Result<TaskList, ClientError> {
        self.tasks(Span::Day(day)).await
    }

    pub async fn weekday_tasks(&self) -> Result<TaskList, ClientError> {
        self.tasks(Span::Weekdays).await
    }

    pub async fn weekend_tasks(&self) -> Result<TaskList, ClientError> {
        self.tasks(Span::Weekend).await
    }

    /// Fetch the task list for any span of the week
    pub async fn tasks(&self, span: Span) -> Result<TaskList, ClientError> {
        let url = self.span_url(span);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Http(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }

    fn span_url(&self, span: Span) -> String {
        match span {
            Span::Day(day) => format!("{}/day/{}", self.base_url, day),
            Span::Weekdays => format!("{}/weekdays", self.base_url),
            Span::Weekend => format!("{}/weekend", self.base_url),
        }
    }
}

/// Client errors
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error: {0}")]
    Http(u16),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Todo has no day")]
    MissingDay,
}
