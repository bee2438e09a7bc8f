use super::fields::{self, CREATED_PATH};
use crate::model::issue::Issue;

pub const TOKEN_PREFIX: &str = "issue.";

pub const DEFAULT_TEMPLATE: &str = "<b>Issue:</b> [issue.key]<br /><b>Summary:</b> [issue.fields.summary]<br /><b>Assignee:</b> [issue.fields.assignee.name]<br /><b>Status:</b> [issue.fields.status.name]<br /><b>Created:</b> [issue.fields.created]";

/// Substitute every recognized `[issue.<path>]` token in `template`.
///
/// `created` is the already formatted creation timestamp. Unrecognized
/// bracketed text is copied through untouched, and substituted values are
/// never rescanned for tokens.
pub fn render(template: &str, issue: &Issue, created: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('[') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        match substitute(candidate, issue, created) {
            Some((value, consumed)) => {
                out.push_str(&value);
                rest = &candidate[consumed..];
            }
            None => {
                out.push('[');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// `candidate` starts at a `[`. Returns the replacement and the number of
/// bytes the token spans.
fn substitute(candidate: &str, issue: &Issue, created: &str) -> Option<(String, usize)> {
    let end = candidate.find(']')?;
    let path = candidate[1..end].strip_prefix(TOKEN_PREFIX)?;
    let value = if path == CREATED_PATH {
        created.to_string()
    } else {
        fields::resolve(issue, path)?
    };
    Some((value, end + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::issue::{IssueFields, Status};

    fn issue() -> Issue {
        Issue {
            id: "10001".into(),
            key: "ABC-1".into(),
            fields: IssueFields {
                summary: Some("Fix bug".into()),
                status: Some(Status {
                    name: Some("Open".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        }
    }

    #[test]
    fn plain_text_is_unchanged() {
        let t = "No tokens here, just [brackets] and <b>markup</b>.";
        assert_eq!(render(t, &issue(), ""), t);
    }

    #[test]
    fn unknown_token_passes_through() {
        assert_eq!(render("[not.a.real.field]", &issue(), ""), "[not.a.real.field]");
        assert_eq!(render("[issue.fields.unknown]", &issue(), ""), "[issue.fields.unknown]");
    }

    #[test]
    fn repeated_token_replaced_everywhere() {
        let out = render("[issue.key]/[issue.key]", &issue(), "");
        assert_eq!(out, "ABC-1/ABC-1");
    }

    #[test]
    fn created_is_injected() {
        let out = render("on [issue.fields.created]", &issue(), "2021-05-01");
        assert_eq!(out, "on 2021-05-01");
    }

    #[test]
    fn missing_parent_renders_empty() {
        let out = render("[[issue.fields.assignee.name]]", &issue(), "");
        assert_eq!(out, "[]");
    }

    #[test]
    fn values_are_not_rescanned() {
        let mut issue = issue();
        issue.fields.summary = Some("[issue.key]".into());
        assert_eq!(render("[issue.fields.summary]", &issue, ""), "[issue.key]");
    }

    #[test]
    fn unterminated_bracket() {
        assert_eq!(render("[issue.key", &issue(), ""), "[issue.key");
    }

    #[test]
    fn non_ascii_around_tokens() {
        let out = render("Ключ: [issue.key] ✓", &issue(), "");
        assert_eq!(out, "Ключ: ABC-1 ✓");
    }

    #[test]
    fn absent_integer_is_empty_not_zero() {
        assert_eq!(render("<[issue.fields.timespent]>", &issue(), ""), "<>");
    }
}
