use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use std::time::Duration;
use thiserror::Error;

use crate::models::{Credentials, Task, TokenResponse};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server returned {status}{}", .message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("Task has no server id and cannot be deleted")]
    MissingId,
}

/// Client for the remote todo service. All persistence lives on the server;
/// this client is a thin wrapper over its five REST endpoints.
///
/// Requests are blocking and are never retried. Authenticated requests carry
/// the session token as a bearer header.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /register. The created-account payload is not used by the client;
    /// only the status matters.
    pub fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let response = self.http.post(self.url("/register")).json(credentials).send()?;
        Self::check_response(response)?;
        Ok(())
    }

    /// POST /login. Returns the session token on success.
    pub fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let response = self.http.post(self.url("/login")).json(credentials).send()?;
        let response = Self::check_response(response)?;
        let body: TokenResponse = response.json()?;
        Ok(body.token)
    }

    /// GET /tasks. Returns every task for the session, done or not; filtering
    /// to the visible list is the caller's concern.
    pub fn list_tasks(&self, token: &str) -> Result<Vec<Task>, ApiError> {
        let response = self
            .http
            .get(self.url("/tasks"))
            .bearer_auth(token)
            .send()?;
        let response = Self::check_response(response)?;
        Ok(response.json()?)
    }

    /// POST /tasks. Returns the created task with its server-assigned id.
    pub fn create_task(&self, token: &str, task: &Task) -> Result<Task, ApiError> {
        let response = self
            .http
            .post(self.url("/tasks"))
            .bearer_auth(token)
            .json(task)
            .send()?;
        let response = Self::check_response(response)?;
        Ok(response.json()?)
    }

    /// DELETE /tasks/{id}. Marks a task done; the server removes it from the
    /// task collection.
    pub fn delete_task(&self, token: &str, id: i64) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/tasks/{}", id)))
            .bearer_auth(token)
            .send()?;
        Self::check_response(response)?;
        Ok(())
    }

    /// Pass a successful response through; turn anything else into
    /// `ApiError::Status`, keeping the server's own message when the error
    /// body carries one.
    fn check_response(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .ok()
            .and_then(|body| error_message_from_body(&body));
        Err(ApiError::Status { status, message })
    }
}

/// Extract the `message` field from a JSON error body like
/// `{"message": "Invalid credentials"}`. Non-JSON bodies yield None.
fn error_message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_duplicate_slash() {
        let client = ApiClient::new("http://localhost:3000/", 10).unwrap();
        assert_eq!(client.url("/tasks"), "http://localhost:3000/tasks");
        assert_eq!(client.url("/tasks/7"), "http://localhost:3000/tasks/7");
    }

    #[test]
    fn error_message_is_read_from_json_bodies() {
        assert_eq!(
            error_message_from_body(r#"{"message": "Invalid credentials"}"#),
            Some("Invalid credentials".to_string())
        );
        assert_eq!(error_message_from_body(r#"{"error": "nope"}"#), None);
        assert_eq!(error_message_from_body("<html>502 Bad Gateway</html>"), None);
        assert_eq!(error_message_from_body(""), None);
    }

    #[test]
    fn status_error_display_includes_server_message_when_present() {
        let with_message = ApiError::Status {
            status: StatusCode::UNAUTHORIZED,
            message: Some("Invalid credentials".to_string()),
        };
        assert_eq!(
            with_message.to_string(),
            "Server returned 401 Unauthorized: Invalid credentials"
        );

        let without_message = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(
            without_message.to_string(),
            "Server returned 500 Internal Server Error"
        );
    }
}
