use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Result;

use super::encoding::Cp1252Text;
use super::{assemble, DocumentWriter, RULE_GAP, TEXT_LINE_HEIGHT, TITLE_GAP};
use crate::cli::Cli;
use crate::config::{FileConfig, Settings};
use crate::model::issue::{IssueFields, Status};
use crate::providers::tests::make_issue;

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Title(String),
    Text(String),
    Feed(f32),
    Rule,
}

/// Records layout operations instead of drawing them.
#[derive(Default)]
pub struct RecordingWriter {
    pub ops: Vec<Op>,
    pub saved: Arc<Mutex<Vec<(PathBuf, Vec<Op>)>>>,
    pub fail_on_finish: bool,
}

impl DocumentWriter for RecordingWriter {
    fn title_block(&mut self, title: &Cp1252Text) {
        self.ops.push(Op::Title(title.to_unicode()));
    }

    fn text_block(&mut self, text: &Cp1252Text) {
        self.ops.push(Op::Text(text.to_unicode()));
    }

    fn line_feed(&mut self, height: f32) {
        self.ops.push(Op::Feed(height));
    }

    fn horizontal_rule(&mut self) {
        self.ops.push(Op::Rule);
    }

    fn finish(self, path: &Path) -> Result<()> {
        if self.fail_on_finish {
            anyhow::bail!("disk full");
        }
        self.saved
            .lock()
            .unwrap()
            .push((path.to_path_buf(), self.ops));
        Ok(())
    }
}

pub fn settings(template: &str, date_format: &str, verbose: bool) -> Settings {
    let cli = Cli {
        instance: Some("https://jira.example.com".into()),
        username: Some("jdoe".into()),
        password: Some("secret".into()),
        query: Some("project = ABC".into()),
        template: Some(template.into()),
        date_format: Some(date_format.into()),
        verbose,
        ..Default::default()
    };
    Settings::resolve(cli, FileConfig::default()).unwrap()
}

fn separator() -> Vec<Op> {
    vec![
        Op::Feed(TEXT_LINE_HEIGHT),
        Op::Feed(RULE_GAP),
        Op::Rule,
        Op::Feed(RULE_GAP),
    ]
}

#[test]
fn empty_issue_list_is_title_only() {
    let settings = settings("[issue.key]", "%Y", false);
    let mut writer = RecordingWriter::default();

    assemble(&mut writer, &settings, &[]);

    assert_eq!(
        writer.ops,
        vec![Op::Title("JIRA Issues".into()), Op::Feed(TITLE_GAP)]
    );
}

#[test]
fn one_block_and_separator_per_issue_in_order() {
    let settings = settings("[issue.key] [issue.fields.summary]", "%Y", false);
    let issues = vec![make_issue("ABC-2", "second"), make_issue("ABC-1", "first")];
    let mut writer = RecordingWriter::default();

    assemble(&mut writer, &settings, &issues);

    let mut expected = vec![Op::Title("JIRA Issues".into()), Op::Feed(TITLE_GAP)];
    expected.push(Op::Text("ABC-2 second".into()));
    expected.extend(separator());
    expected.push(Op::Text("ABC-1 first".into()));
    expected.extend(separator());
    assert_eq!(writer.ops, expected);
}

#[test]
fn rendered_block_uses_date_format() {
    let settings = settings(
        "[issue.key]: [issue.fields.summary] (assignee: [issue.fields.assignee.name]) [issue.fields.status.name] [issue.fields.created]",
        "%Y-%m-%d",
        false,
    );
    let mut issue = make_issue("ABC-1", "Fix bug");
    issue.fields = IssueFields {
        status: Some(Status {
            name: Some("Open".into()),
            ..Default::default()
        }),
        created: Some("2021-05-01T10:00:00.000000000+0000".into()),
        ..issue.fields
    };
    let mut writer = RecordingWriter::default();

    assemble(&mut writer, &settings, &[issue]);

    assert_eq!(
        writer.ops[2],
        Op::Text("ABC-1: Fix bug (assignee: ) Open 2021-05-01".into())
    );
}

#[test]
fn text_is_transcoded_to_cp1252() {
    let settings = settings("[issue.fields.summary]", "%Y", false);
    let issues = vec![make_issue("ABC-1", "Café ✓")];
    let mut writer = RecordingWriter::default();

    assemble(&mut writer, &settings, &issues);

    assert_eq!(writer.ops[2], Op::Text("Café ?".into()));
}
