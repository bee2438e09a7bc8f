pub mod date;
pub mod fields;
pub mod template;

use crate::model::issue::Issue;
use date::DateFormat;

/// Render one issue block: normalize the creation timestamp, then run the
/// template substitution.
pub fn render_issue(template: &str, issue: &Issue, date_format: &DateFormat) -> String {
    let created = date::normalize(issue.fields.created.as_deref().unwrap_or_default(), date_format);
    template::render(template, issue, &created)
}
