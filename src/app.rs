use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::Settings;
use crate::document::{self, DocumentWriter};
use crate::providers::{IssueSearch, SearchError};

/// Turn a search failure into the run's fatal error. In verbose mode the
/// raw response body is attached so the server's own message is visible.
pub fn search_failure(err: SearchError, verbose: bool) -> anyhow::Error {
    let body = err.body().map(str::to_owned);
    let err = anyhow::Error::new(err);
    match body {
        Some(body) if verbose => err.context(format!("Search error!\n\nBody: {body}")),
        _ => err.context("Search error!"),
    }
}

/// Search, lay out every issue and write the document once. Returns the
/// number of issues rendered.
pub async fn run<S, W>(settings: &Settings, search: &S, mut writer: W) -> Result<usize>
where
    S: IssueSearch + ?Sized,
    W: DocumentWriter,
{
    let issues = search
        .search(&settings.query, settings.max_results)
        .await
        .map_err(|e| search_failure(e, settings.verbose))?;

    info!(total = issues.len(), "Total of issues");
    for issue in &issues {
        debug!(
            key = %issue.key,
            summary = issue.fields.summary.as_deref().unwrap_or_default(),
            "issue"
        );
    }

    document::assemble(&mut writer, settings, &issues);
    writer
        .finish(&settings.output)
        .with_context(|| format!("Error while saving PDF to {}", settings.output.display()))?;

    Ok(issues.len())
}
