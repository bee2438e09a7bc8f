use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{IssueSearch, SearchError};
use crate::model::issue::Issue;

pub struct JiraClient {
    base_url: String,
    auth_header: String,
    client: reqwest::Client,
}

impl JiraClient {
    pub fn new(
        instance: &str,
        username: &str,
        password: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let url = reqwest::Url::parse(instance)
            .with_context(|| format!("invalid Jira instance URL {instance:?}"))?;
        let creds = format!("{username}:{password}");
        let encoded = base64::engine::general_purpose::STANDARD.encode(creds);

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("failed to build HTTP client")?;

        Ok(Self {
            base_url: url.as_str().trim_end_matches('/').to_string(),
            auth_header: format!("Basic {encoded}"),
            client,
        })
    }

    fn search_url(&self, jql: &str, max_results: u32) -> String {
        format!(
            "{}/rest/api/2/search?jql={}&startAt=0&maxResults={max_results}",
            self.base_url,
            urlencoding::encode(jql)
        )
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<Issue>,
    total: Option<u64>,
}

#[async_trait]
impl IssueSearch for JiraClient {
    async fn search(&self, jql: &str, max_results: u32) -> Result<Vec<Issue>, SearchError> {
        let url = self.search_url(jql, max_results);
        debug!(%url, "searching issues");

        let request_error = |source| SearchError::Request {
            url: url.clone(),
            source,
        };
        let resp = self
            .client
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(request_error)?;

        let status = resp.status();
        let body = resp.text().await.map_err(request_error)?;
        if !status.is_success() {
            return Err(SearchError::Status { status, body });
        }

        let search: SearchResponse = match serde_json::from_str(&body) {
            Ok(search) => search,
            Err(source) => return Err(SearchError::Decode { source, body }),
        };

        if let Some(total) = search.total {
            if total > search.issues.len() as u64 {
                warn!(
                    total,
                    fetched = search.issues.len(),
                    "query matched more issues than fetched; raise --max-results to include them"
                );
            }
        }

        Ok(search.issues)
    }
}
