//! The small HTML subset templates may use: `<b>`, `<i>`, `<u>` and `<br>`
//! (also `<strong>` and `<em>`). Newlines break lines too. Other tags are
//! dropped and their content kept.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String, Style),
    Break,
}

pub fn parse(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut style = Style::default();
    let mut text = String::new();
    let mut rest = input;

    while let Some(pos) = rest.find(|c: char| c == '<' || c == '\n') {
        text.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix('\n') {
            flush(&mut segments, &mut text, style);
            segments.push(Segment::Break);
            rest = after;
            continue;
        }

        match tail[1..].find('>') {
            Some(end) => {
                flush(&mut segments, &mut text, style);
                apply_tag(&tail[1..=end], &mut style, &mut segments);
                rest = &tail[end + 2..];
            }
            None => {
                text.push('<');
                rest = &tail[1..];
            }
        }
    }
    text.push_str(rest);
    flush(&mut segments, &mut text, style);
    segments
}

fn flush(segments: &mut Vec<Segment>, text: &mut String, style: Style) {
    if !text.is_empty() {
        segments.push(Segment::Text(std::mem::take(text), style));
    }
}

fn apply_tag(inner: &str, style: &mut Style, segments: &mut Vec<Segment>) {
    let inner = inner.trim().trim_end_matches('/').trim_end();
    let (closing, inner) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, inner),
    };
    let name = inner
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    match name.as_str() {
        "b" | "strong" => style.bold = !closing,
        "i" | "em" => style.italic = !closing,
        "u" => style.underline = !closing,
        "br" => segments.push(Segment::Break),
        _ => {}
    }
}
