use std::path::PathBuf;

use clap::Parser;

/// Command-line flags. Every value except `--verbose` and `--config` may
/// also come from the config file; flags and environment win over it.
#[derive(Parser, Debug, Default)]
#[command(
    name = "jira-pdf",
    version,
    about = "Render Jira issues matching a JQL query into a PDF document",
    long_about = None,
    after_help = "TEMPLATE TOKENS:\n    [issue.key], [issue.id], [issue.fields.summary], [issue.fields.status.name],\n    [issue.fields.assignee.displayname], [issue.fields.created], ...\n    Unknown tokens are left as they are.\n\nEXAMPLES:\n    jira-pdf -i https://jira.example.com -u jdoe -p secret -q 'project = ABC'\n    jira-pdf -q 'assignee = currentUser()' --date-format '%d.%m.%Y' -o mine.pdf"
)]
pub struct Cli {
    /// URL of your Jira instance, like https://your.jira-instance.com
    #[arg(short = 'i', long, env = "JIRA_INSTANCE")]
    pub instance: Option<String>,

    /// Username of your Jira instance account
    #[arg(short = 'u', long, env = "JIRA_USERNAME")]
    pub username: Option<String>,

    /// Password (or API token) of your Jira instance account
    #[arg(short = 'p', long, env = "JIRA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// JQL query for the issue search
    #[arg(short = 'q', long, env = "JIRA_QUERY")]
    pub query: Option<String>,

    /// Output filename [default: jira-issues.pdf]
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Document title [default: "JIRA Issues"]
    #[arg(short = 't', long)]
    pub title: Option<String>,

    /// Issue template with [issue.*] tokens and <b>, <i>, <u>, <br> markup
    #[arg(long, visible_alias = "it")]
    pub template: Option<String>,

    /// strftime pattern for [issue.fields.created] [default: "%Y-%m-%d %H:%M:%S"]
    #[arg(long, visible_alias = "dft")]
    pub date_format: Option<String>,

    /// Maximum number of issues to fetch [default: 50]
    #[arg(long)]
    pub max_results: Option<u32>,

    /// Timeout for the search request
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Config file [default: ~/.jira-pdf/config.toml]
    #[arg(long, env = "JIRA_PDF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_flags() {
        let cli = Cli::try_parse_from([
            "jira-pdf",
            "-i",
            "https://jira.example.com",
            "-u",
            "jdoe",
            "-p",
            "secret",
            "-q",
            "project = ABC",
            "-o",
            "out.pdf",
            "-t",
            "Sprint",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.instance.as_deref(), Some("https://jira.example.com"));
        assert_eq!(cli.username.as_deref(), Some("jdoe"));
        assert_eq!(cli.password.as_deref(), Some("secret"));
        assert_eq!(cli.query.as_deref(), Some("project = ABC"));
        assert_eq!(cli.output, Some(PathBuf::from("out.pdf")));
        assert_eq!(cli.title.as_deref(), Some("Sprint"));
        assert!(cli.verbose);
    }

    #[test]
    fn template_and_format_aliases() {
        let cli = Cli::try_parse_from([
            "jira-pdf",
            "--it",
            "[issue.key]",
            "--dft",
            "%Y",
            "--max-results",
            "10",
            "--timeout",
            "30",
        ])
        .unwrap();
        assert_eq!(cli.template.as_deref(), Some("[issue.key]"));
        assert_eq!(cli.date_format.as_deref(), Some("%Y"));
        assert_eq!(cli.max_results, Some(10));
        assert_eq!(cli.timeout, Some(30));
        assert!(!cli.verbose);
    }

    #[test]
    fn rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["jira-pdf", "--bogus"]).is_err());
    }

    #[test]
    fn verify_command() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
