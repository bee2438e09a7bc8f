mod app;
mod cli;
mod config;
mod document;
mod model;
mod providers;
mod render;
mod util;

use std::env;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::Settings;
use document::pdf::PdfWriter;
use providers::jira::JiraClient;

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("JIRA_PDF_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "jira_pdf=debug,info"
        } else {
            "warn"
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Everything required is checked before any network activity
    let settings = Settings::load(cli)?;

    let client = JiraClient::new(
        &settings.instance,
        &settings.username,
        &settings.password,
        settings.timeout,
    )
    .context("Auth error!")?;

    let writer = PdfWriter::new(&settings.title)?;
    let count = app::run(&settings, &client, writer).await?;

    info!(count, output = %settings.output.display(), "document written");
    Ok(())
}
