use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::cli::Cli;
use crate::render::date::{DateFormat, InvalidDateFormat, DEFAULT_OUTPUT_FORMAT};
use crate::render::template::DEFAULT_TEMPLATE;

pub const DEFAULT_OUTPUT: &str = "jira-issues.pdf";
pub const DEFAULT_TITLE: &str = "JIRA Issues";
/// Page size Jira itself applies when none is requested.
pub const DEFAULT_MAX_RESULTS: u32 = 50;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not defined")]
    Missing(&'static str),
    #[error(transparent)]
    DateFormat(#[from] InvalidDateFormat),
    #[error("failed to read config from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Optional defaults read from `~/.jira-pdf/config.toml`.
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub instance: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub query: Option<String>,
    pub output: Option<PathBuf>,
    pub title: Option<String>,
    pub template: Option<String>,
    pub date_format: Option<String>,
    pub max_results: Option<u32>,
    pub timeout: Option<u64>,
}

fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".jira-pdf")
        .join("config.toml")
}

/// Read the config file. An explicitly named file must exist; the default
/// one is optional.
pub fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = config_path();
            if !path.exists() {
                return Ok(FileConfig::default());
            }
            path
        }
    };
    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
}

/// Everything a run needs, fixed once at startup.
pub struct Settings {
    pub instance: String,
    pub username: String,
    pub password: String,
    pub query: String,
    pub output: PathBuf,
    pub title: String,
    pub template: String,
    pub date_format: DateFormat,
    pub max_results: u32,
    pub timeout: Option<Duration>,
    pub verbose: bool,
}

fn non_empty(flag: Option<String>, file: Option<String>) -> Option<String> {
    flag.filter(|v| !v.is_empty())
        .or_else(|| file.filter(|v| !v.is_empty()))
}

fn required(
    flag: Option<String>,
    file: Option<String>,
    what: &'static str,
) -> Result<String, ConfigError> {
    non_empty(flag, file).ok_or(ConfigError::Missing(what))
}

impl Settings {
    pub fn load(cli: Cli) -> Result<Self, ConfigError> {
        let file = load_file_config(cli.config.as_deref())?;
        Self::resolve(cli, file)
    }

    /// Merge flags over file values and apply defaults.
    pub fn resolve(cli: Cli, file: FileConfig) -> Result<Self, ConfigError> {
        let instance = required(cli.instance, file.instance, "Jira instance")?;
        let username = required(cli.username, file.username, "Jira instance username")?;
        let password = required(cli.password, file.password, "Jira instance password")?;
        let query = required(cli.query, file.query, "Jira issue query (JQL)")?;

        let output = cli
            .output
            .or(file.output)
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        let title = non_empty(cli.title, file.title).unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let template =
            non_empty(cli.template, file.template).unwrap_or_else(|| DEFAULT_TEMPLATE.to_string());
        let date_format = DateFormat::new(
            &non_empty(cli.date_format, file.date_format)
                .unwrap_or_else(|| DEFAULT_OUTPUT_FORMAT.to_string()),
        )?;
        let max_results = cli
            .max_results
            .or(file.max_results)
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_RESULTS);
        let timeout = cli
            .timeout
            .or(file.timeout)
            .filter(|s| *s > 0)
            .map(Duration::from_secs);

        Ok(Self {
            instance,
            username,
            password,
            query,
            output,
            title,
            template,
            date_format,
            max_results,
            timeout,
            verbose: cli.verbose,
        })
    }
}
