use serde::Deserialize;

/// One issue as returned by the Jira search endpoint.
///
/// Only `key` and `id` are guaranteed; every field below them may be
/// missing or `null` in the payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Issue {
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueFields {
    pub summary: Option<String>,
    /// Plain string on REST v2, an ADF document on v3.
    pub description: Option<serde_json::Value>,
    pub duedate: Option<String>,
    pub expand: Option<String>,
    pub resolutiondate: Option<String>,
    pub created: Option<String>,
    pub timeestimate: Option<i64>,
    pub timeoriginalestimate: Option<i64>,
    pub timespent: Option<i64>,
    pub project: Option<Project>,
    #[serde(rename = "issuetype")]
    pub issue_type: Option<IssueType>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub assignee: Option<User>,
    pub creator: Option<User>,
    pub reporter: Option<User>,
    pub aggregateprogress: Option<Progress>,
    pub progress: Option<Progress>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Project {
    pub id: Option<String>,
    pub key: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueType {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Priority {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Status {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct User {
    pub name: Option<String>,
    #[serde(rename = "emailAddress")]
    pub email_address: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Progress {
    pub progress: Option<i64>,
    pub total: Option<i64>,
}
