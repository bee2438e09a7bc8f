pub mod encoding;
pub mod markup;
pub mod metrics;
pub mod pdf;

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::config::Settings;
use crate::model::issue::Issue;
use crate::render::render_issue;
use encoding::Cp1252Text;

/// Height in millimetres of one line of issue text.
pub const TEXT_LINE_HEIGHT: f32 = 5.0;
/// Gap between the title block and the first issue.
pub const TITLE_GAP: f32 = 8.0;
/// Gap above and below each separator rule.
pub const RULE_GAP: f32 = 2.0;

/// The layout operations the assembler needs from a rendering backend.
///
/// Drawing is infallible; the backend buffers everything in memory until
/// [`finish`](DocumentWriter::finish) writes it out in one go.
pub trait DocumentWriter {
    /// Emphasized, bordered, centered block at the cursor.
    fn title_block(&mut self, title: &Cp1252Text);
    /// Flowing text with basic markup, leaving the cursor on its last line.
    fn text_block(&mut self, text: &Cp1252Text);
    /// Move to the left margin, `height` millimetres further down.
    fn line_feed(&mut self, height: f32);
    /// Rule from the cursor to the right margin.
    fn horizontal_rule(&mut self);
    fn finish(self, path: &Path) -> Result<()>
    where
        Self: Sized;
}

/// Lay out the title and one block per issue, in the order given.
pub fn assemble<W: DocumentWriter>(writer: &mut W, settings: &Settings, issues: &[Issue]) {
    writer.title_block(&Cp1252Text::encode(&settings.title));
    writer.line_feed(TITLE_GAP);

    for issue in issues {
        let block = render_issue(&settings.template, issue, &settings.date_format);
        debug!(key = %issue.key, "rendered issue block");
        writer.text_block(&Cp1252Text::encode(&block));

        writer.line_feed(TEXT_LINE_HEIGHT);
        writer.line_feed(RULE_GAP);
        writer.horizontal_rule();
        writer.line_feed(RULE_GAP);
    }
}

#[cfg(test)]
pub mod tests;
