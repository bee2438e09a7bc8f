use serde_json::Value;

const BLOCK_NODES: &[&str] = &[
    "paragraph",
    "heading",
    "blockquote",
    "codeBlock",
    "listItem",
    "panel",
    "rule",
];

/// Flatten a Jira description to plain text.
///
/// REST v2 sends a string, which is returned as is. REST v3 sends an
/// Atlassian Document Format tree: inline text nodes are concatenated and
/// block nodes are separated by newlines.
pub fn description_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => {
            let mut out = String::new();
            collect(other, &mut out);
            out.trim_end_matches('\n').to_string()
        }
    }
}

fn collect(value: &Value, out: &mut String) {
    match value {
        Value::Array(nodes) => nodes.iter().for_each(|n| collect(n, out)),
        Value::Object(obj) => {
            let kind = obj.get("type").and_then(Value::as_str).unwrap_or_default();
            match kind {
                "text" => {
                    if let Some(text) = obj.get("text").and_then(Value::as_str) {
                        out.push_str(text);
                    }
                }
                "hardBreak" => out.push('\n'),
                "mention" | "emoji" => {
                    if let Some(text) = obj
                        .get("attrs")
                        .and_then(|a| a.get("text"))
                        .and_then(Value::as_str)
                    {
                        out.push_str(text);
                    }
                }
                _ => {
                    if let Some(content) = obj.get("content") {
                        collect(content, out);
                    }
                    if BLOCK_NODES.contains(&kind) && !out.ends_with('\n') {
                        out.push('\n');
                    }
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_string_passes_through() {
        assert_eq!(description_text(&json!("line one")), "line one");
    }

    #[test]
    fn null_is_empty() {
        assert_eq!(description_text(&Value::Null), "");
    }

    #[test]
    fn adf_paragraphs_become_lines() {
        let doc = json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "paragraph", "content": [
                    {"type": "text", "text": "Hello "},
                    {"type": "text", "text": "world", "marks": [{"type": "strong"}]}
                ]},
                {"type": "paragraph", "content": [
                    {"type": "text", "text": "ping "},
                    {"type": "mention", "attrs": {"id": "1", "text": "@jdoe"}}
                ]}
            ]
        });
        assert_eq!(description_text(&doc), "Hello world\nping @jdoe");
    }

    #[test]
    fn hard_break_inside_paragraph() {
        let doc = json!({"type": "doc", "content": [
            {"type": "paragraph", "content": [
                {"type": "text", "text": "a"},
                {"type": "hardBreak"},
                {"type": "text", "text": "b"}
            ]}
        ]});
        assert_eq!(description_text(&doc), "a\nb");
    }
}
