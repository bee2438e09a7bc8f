use crate::model::issue::Issue;
use crate::util::adf::description_text;

/// Path of the creation timestamp. It is not in [`FIELDS`]: its value goes
/// through the date normalizer and is handed to the template engine
/// already formatted.
pub const CREATED_PATH: &str = "fields.created";

type Accessor = fn(&Issue) -> String;

/// A resolvable field: every spelling a template may use for it, and how to
/// read it from an issue.
pub struct Field {
    pub paths: &'static [&'static str],
    accessor: Accessor,
}

impl Field {
    pub fn value(&self, issue: &Issue) -> String {
        (self.accessor)(issue)
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn number(value: Option<i64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

fn sub<T>(parent: &Option<T>, get: impl Fn(&T) -> &Option<String>) -> String {
    parent.as_ref().map(|p| text(get(p))).unwrap_or_default()
}

fn sub_number<T>(parent: &Option<T>, get: impl Fn(&T) -> Option<i64>) -> String {
    parent.as_ref().map(|p| number(get(p))).unwrap_or_default()
}

/// Every path the resolver knows. The first spelling of each entry is the
/// lowercase form used by existing templates; the rest are aliases.
pub static FIELDS: &[Field] = &[
    Field { paths: &["key"], accessor: |i| i.key.clone() },
    Field { paths: &["id"], accessor: |i| i.id.clone() },
    Field { paths: &["fields.summary"], accessor: |i| text(&i.fields.summary) },
    Field {
        paths: &["fields.description"],
        accessor: |i| i.fields.description.as_ref().map(description_text).unwrap_or_default(),
    },
    Field { paths: &["fields.duedate"], accessor: |i| text(&i.fields.duedate) },
    Field { paths: &["fields.expand"], accessor: |i| text(&i.fields.expand) },
    Field { paths: &["fields.resolutiondate"], accessor: |i| text(&i.fields.resolutiondate) },
    Field {
        paths: &["fields.timeestimate", "fields.timeEstimate"],
        accessor: |i| number(i.fields.timeestimate),
    },
    Field {
        paths: &["fields.timeoriginalestimate", "fields.timeOriginalEstimate"],
        accessor: |i| number(i.fields.timeoriginalestimate),
    },
    Field {
        paths: &["fields.timespent", "fields.timeSpent"],
        accessor: |i| number(i.fields.timespent),
    },
    // project
    Field { paths: &["fields.project.id"], accessor: |i| sub(&i.fields.project, |p| &p.id) },
    Field { paths: &["fields.project.key"], accessor: |i| sub(&i.fields.project, |p| &p.key) },
    Field { paths: &["fields.project.name"], accessor: |i| sub(&i.fields.project, |p| &p.name) },
    Field {
        paths: &["fields.project.description"],
        accessor: |i| sub(&i.fields.project, |p| &p.description),
    },
    // issue type
    Field {
        paths: &["fields.type.id", "fields.issuetype.id"],
        accessor: |i| sub(&i.fields.issue_type, |t| &t.id),
    },
    Field {
        paths: &["fields.type.name", "fields.issuetype.name"],
        accessor: |i| sub(&i.fields.issue_type, |t| &t.name),
    },
    Field {
        paths: &["fields.type.description", "fields.issuetype.description"],
        accessor: |i| sub(&i.fields.issue_type, |t| &t.description),
    },
    // priority
    Field { paths: &["fields.priority.id"], accessor: |i| sub(&i.fields.priority, |p| &p.id) },
    Field { paths: &["fields.priority.name"], accessor: |i| sub(&i.fields.priority, |p| &p.name) },
    // status
    Field { paths: &["fields.status.id"], accessor: |i| sub(&i.fields.status, |s| &s.id) },
    Field { paths: &["fields.status.name"], accessor: |i| sub(&i.fields.status, |s| &s.name) },
    Field {
        paths: &["fields.status.description"],
        accessor: |i| sub(&i.fields.status, |s| &s.description),
    },
    // assignee
    Field { paths: &["fields.assignee.name"], accessor: |i| sub(&i.fields.assignee, |u| &u.name) },
    Field {
        paths: &[
            "fields.assignee.emailaddress",
            "fields.assignee.emailAddress",
            "fields.assignee.emailaddrress",
        ],
        accessor: |i| sub(&i.fields.assignee, |u| &u.email_address),
    },
    Field {
        paths: &["fields.assignee.displayname", "fields.assignee.displayName"],
        accessor: |i| sub(&i.fields.assignee, |u| &u.display_name),
    },
    Field { paths: &["fields.assignee.key"], accessor: |i| sub(&i.fields.assignee, |u| &u.key) },
    // creator
    Field { paths: &["fields.creator.name"], accessor: |i| sub(&i.fields.creator, |u| &u.name) },
    Field {
        paths: &[
            "fields.creator.emailaddress",
            "fields.creator.emailAddress",
            "fields.creator.emailaddrress",
        ],
        accessor: |i| sub(&i.fields.creator, |u| &u.email_address),
    },
    Field {
        paths: &["fields.creator.displayname", "fields.creator.displayName"],
        accessor: |i| sub(&i.fields.creator, |u| &u.display_name),
    },
    Field { paths: &["fields.creator.key"], accessor: |i| sub(&i.fields.creator, |u| &u.key) },
    // reporter
    Field { paths: &["fields.reporter.name"], accessor: |i| sub(&i.fields.reporter, |u| &u.name) },
    Field {
        paths: &[
            "fields.reporter.emailaddress",
            "fields.reporter.emailAddress",
            "fields.reporter.emailaddrress",
        ],
        accessor: |i| sub(&i.fields.reporter, |u| &u.email_address),
    },
    Field {
        paths: &["fields.reporter.displayname", "fields.reporter.displayName"],
        accessor: |i| sub(&i.fields.reporter, |u| &u.display_name),
    },
    Field { paths: &["fields.reporter.key"], accessor: |i| sub(&i.fields.reporter, |u| &u.key) },
    // progress
    Field {
        paths: &["fields.aggregateprogress.progress", "fields.aggregateProgress.progress"],
        accessor: |i| sub_number(&i.fields.aggregateprogress, |p| p.progress),
    },
    Field {
        paths: &["fields.aggregateprogress.total", "fields.aggregateProgress.total"],
        accessor: |i| sub_number(&i.fields.aggregateprogress, |p| p.total),
    },
    Field {
        paths: &["fields.progress.progress"],
        accessor: |i| sub_number(&i.fields.progress, |p| p.progress),
    },
    Field {
        paths: &["fields.progress.total"],
        accessor: |i| sub_number(&i.fields.progress, |p| p.total),
    },
];

pub fn lookup(path: &str) -> Option<&'static Field> {
    FIELDS.iter().find(|f| f.paths.iter().any(|p| *p == path))
}

/// Resolve `path` (without the `issue.` prefix) against `issue`.
///
/// Returns `None` only when the path is not a known field. Known fields
/// always resolve, to an empty string when the value or its parent object
/// is missing.
pub fn resolve(issue: &Issue, path: &str) -> Option<String> {
    lookup(path).map(|f| f.value(issue))
}
