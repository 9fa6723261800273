//! Synchronous Notion REST client
//!
//! Covers only the handful of endpoints the assistant needs: creating the
//! tasks database, creating/updating pages, and querying by filter. The
//! client owns no schema knowledge beyond the property payloads it builds.

use std::time::Duration;

use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

/// Notion REST API base URL
pub const NOTION_API_BASE: &str = "https://api.notion.com/v1";

/// Pinned Notion API version header
pub const NOTION_VERSION: &str = "2022-06-28";

/// Default timeout for Notion requests
pub const DEFAULT_NOTION_TIMEOUT_SECONDS: u64 = 30;

/// Errors from the Notion API client
#[derive(Error, Debug)]
pub enum NotionError {
    #[error("Notion returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("network error reaching Notion: {0}")]
    Transport(String),

    #[error("malformed response from Notion: {0}")]
    MalformedResponse(String),
}

/// Minimal synchronous client for the Notion workspace API
pub struct NotionClient {
    base_url: String,
    token: String,
    timeout: Duration,
}

impl NotionClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: NOTION_API_BASE.to_string(),
            token: token.into(),
            timeout: Duration::from_secs(DEFAULT_NOTION_TIMEOUT_SECONDS),
        }
    }

    /// Create a database under a parent page; returns the database id
    pub fn create_database(
        &self,
        parent_page_id: &str,
        title: &str,
        properties: Value,
    ) -> Result<String, NotionError> {
        let body = json!({
            "parent": {"type": "page_id", "page_id": parent_page_id},
            "title": [{"type": "text", "text": {"content": title}}],
            "properties": properties,
        });
        let response = self.request("POST", "/databases", body)?;
        extract_id(&response)
    }

    /// Create a page in a database; returns the page id
    pub fn create_page(
        &self,
        database_id: &str,
        properties: Value,
    ) -> Result<String, NotionError> {
        let body = json!({
            "parent": {"database_id": database_id},
            "properties": properties,
        });
        let response = self.request("POST", "/pages", body)?;
        extract_id(&response)
    }

    /// Update properties on an existing page
    pub fn update_page(&self, page_id: &str, properties: Value) -> Result<(), NotionError> {
        let body = json!({ "properties": properties });
        self.request("PATCH", &format!("/pages/{}", page_id), body)?;
        Ok(())
    }

    /// Query a database, returning the matching pages
    pub fn query_database(
        &self,
        database_id: &str,
        filter: Option<Value>,
    ) -> Result<Vec<Value>, NotionError> {
        let mut body = json!({});
        if let Some(filter) = filter {
            body["filter"] = filter;
        }
        let response = self.request("POST", &format!("/databases/{}/query", database_id), body)?;
        response
            .get("results")
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| {
                NotionError::MalformedResponse("query response has no results array".to_string())
            })
    }

    /// Create a task page with name, due date, and progress
    pub fn create_task(
        &self,
        database_id: &str,
        title: &str,
        due_date: &str,
        progress: i64,
    ) -> Result<String, NotionError> {
        self.create_page(database_id, task_properties(title, due_date, progress))
    }

    /// Update the progress number on a task page
    pub fn update_progress(&self, page_id: &str, progress: i64) -> Result<(), NotionError> {
        self.update_page(page_id, json!({ "Progress": {"number": progress} }))
    }

    /// Store an accepted summary as a page in the tasks database
    pub fn create_summary_page(
        &self,
        database_id: &str,
        title: &str,
        summary: &str,
    ) -> Result<String, NotionError> {
        self.create_page(database_id, summary_properties(title, summary))
    }

    fn request(&self, method: &str, path: &str, body: Value) -> Result<Value, NotionError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(method, path, "notion request");

        let response = ureq::request(method, &url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Notion-Version", NOTION_VERSION)
            .set("Content-Type", "application/json")
            .timeout(self.timeout)
            .send_json(body);

        match response {
            Ok(res) => res
                .into_json()
                .map_err(|e| NotionError::MalformedResponse(e.to_string())),
            Err(ureq::Error::Status(code, res)) => {
                let message = res.into_string().unwrap_or_default();
                Err(NotionError::Status {
                    status: code,
                    message,
                })
            }
            Err(ureq::Error::Transport(e)) => Err(NotionError::Transport(e.to_string())),
        }
    }
}

/// Property payload for a task page
pub fn task_properties(title: &str, due_date: &str, progress: i64) -> Value {
    json!({
        "Name": {"title": [{"text": {"content": title}}]},
        "Due Date": {"date": {"start": due_date}},
        "Progress": {"number": progress},
    })
}

/// Property payload for a stored summary page
pub fn summary_properties(title: &str, summary: &str) -> Value {
    json!({
        "Name": {"title": [{"text": {"content": title}}]},
        "Summary": {"rich_text": [{"text": {"content": summary}}]},
    })
}

/// Property schema for the Learning Tasks database created by `recap setup`
pub fn learning_tasks_schema() -> Value {
    json!({
        "Name": { "title": {} },
        "Due Date": { "date": {} },
        "Progress": { "number": { "format": "percent" } },
        "Summary": { "rich_text": {} },
        "Status": {
            "select": {
                "options": [
                    {"name": "Not Started", "color": "gray"},
                    {"name": "In Progress", "color": "blue"},
                    {"name": "Completed", "color": "green"},
                ]
            }
        },
        "Type": {
            "select": {
                "options": [
                    {"name": "Summary", "color": "purple"},
                    {"name": "Question Set", "color": "orange"},
                ]
            }
        },
    })
}

fn extract_id(response: &Value) -> Result<String, NotionError> {
    response
        .get("id")
        .and_then(Value::as_str)
        .map(|s| s.to_string())
        .ok_or_else(|| NotionError::MalformedResponse("response has no id field".to_string()))
}
