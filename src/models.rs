use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier. None only for tasks that have not been
    /// created on the server yet (request bodies).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub description: String,
    pub start_date: String, // ISO 8601: YYYY-MM-DD
    pub deadline: String,   // ISO 8601: YYYY-MM-DD
    pub done: bool,
}

impl Task {
    pub fn new(description: String, start_date: String, deadline: String) -> Self {
        Self {
            id: None,
            description,
            start_date,
            deadline,
            done: false,
        }
    }
}

/// Request body for both /register and /login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

/// Success body of /login.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
