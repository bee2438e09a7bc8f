pub mod jira;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::issue::Issue;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Jira responded with {status}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to parse Jira search response")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

impl SearchError {
    /// Raw response body, when the server answered at all.
    pub fn body(&self) -> Option<&str> {
        match self {
            SearchError::Request { .. } => None,
            SearchError::Status { body, .. } | SearchError::Decode { body, .. } => Some(body),
        }
    }
}

/// Source of issues for a JQL query, in the order the tracker returns them.
#[async_trait]
pub trait IssueSearch: Send + Sync {
    async fn search(&self, jql: &str, max_results: u32) -> Result<Vec<Issue>, SearchError>;
}
