use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};

use super::encoding::Cp1252Text;
use super::markup::{self, Segment, Style};
use super::metrics::{text_width, MM_PER_PT};
use super::{DocumentWriter, TEXT_LINE_HEIGHT};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.0;
const LAYER: &str = "Layer 1";

const TITLE_SIZE: f32 = 16.0;
const TITLE_LINE_HEIGHT: f32 = 16.0;
const TITLE_FILL: (f32, f32, f32) = (222.0, 222.0, 222.0);
const TEXT_SIZE: f32 = 9.0;
const RULE_COLOR: (f32, f32, f32) = (195.0, 195.0, 195.0);
const RULE_THICKNESS_PT: f32 = 0.57;

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(r / 255.0, g / 255.0, b / 255.0, None))
}

fn black() -> Color {
    rgb((0.0, 0.0, 0.0))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    bold_italic: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self> {
        let font = |f: BuiltinFont| {
            doc.add_builtin_font(f)
                .map_err(|e| anyhow!("failed to load builtin font: {e:?}"))
        };
        Ok(Self {
            regular: font(BuiltinFont::Helvetica)?,
            bold: font(BuiltinFont::HelveticaBold)?,
            italic: font(BuiltinFont::HelveticaOblique)?,
            bold_italic: font(BuiltinFont::HelveticaBoldOblique)?,
        })
    }

    fn get(&self, style: Style) -> &IndirectFontRef {
        match (style.bold, style.italic) {
            (false, false) => &self.regular,
            (true, false) => &self.bold,
            (false, true) => &self.italic,
            (true, true) => &self.bold_italic,
        }
    }
}

/// [`DocumentWriter`] producing an A4 portrait PDF with the core Helvetica
/// fonts. Positions are tracked in millimetres from the top-left corner and
/// text flows onto a new page whenever a line would cross the bottom margin.
pub struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    x: f32,
    y: f32,
    pages: usize,
}

impl PdfWriter {
    pub fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
        let fonts = Fonts::load(&doc)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            fonts,
            x: MARGIN,
            y: MARGIN,
            pages: 1,
        })
    }

    fn content_width() -> f32 {
        PAGE_WIDTH - 2.0 * MARGIN
    }

    fn right_edge() -> f32 {
        PAGE_WIDTH - MARGIN
    }

    fn add_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.pages += 1;
        self.x = MARGIN;
        self.y = MARGIN;
    }

    /// Start a new page if a line of `height` does not fit below the cursor.
    fn ensure_room(&mut self, height: f32) {
        if self.y + height > PAGE_HEIGHT - MARGIN && self.y > MARGIN {
            self.add_page();
        }
    }

    fn new_line(&mut self, height: f32) {
        self.x = MARGIN;
        self.y += height;
        self.ensure_room(height);
    }

    /// PDF user space has its origin at the bottom-left corner.
    fn point(x: f32, y_from_top: f32) -> Point {
        Point::new(Mm(x), Mm(PAGE_HEIGHT - y_from_top))
    }

    fn baseline(&self, line_height: f32, size_pt: f32) -> f32 {
        self.y + 0.5 * line_height + 0.3 * size_pt * MM_PER_PT
    }

    fn draw_line(&self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.layer.add_line(Line {
            points: vec![(Self::point(x1, y1), false), (Self::point(x2, y2), false)],
            is_closed: false,
        });
    }

    fn draw_word(&mut self, word: &str, style: Style) {
        let width = text_width(word, style.bold, TEXT_SIZE);
        let baseline = self.baseline(TEXT_LINE_HEIGHT, TEXT_SIZE);
        self.layer.set_fill_color(black());
        self.layer.use_text(
            word,
            TEXT_SIZE,
            Mm(self.x),
            Mm(PAGE_HEIGHT - baseline),
            self.fonts.get(style),
        );
        if style.underline {
            self.layer.set_outline_color(black());
            self.layer.set_outline_thickness(0.5);
            let under = baseline + 0.6;
            self.draw_line(self.x, under, self.x + width, under);
        }
        self.x += width;
    }

    /// Lay out one styled run, wrapping at word boundaries. Words longer
    /// than a full line are split between characters.
    fn flow(&mut self, text: &str, style: Style) {
        for word in split_keeping_spaces(text) {
            let width = text_width(word, style.bold, TEXT_SIZE);
            let at_line_start = self.x <= MARGIN;

            if self.x + width > Self::right_edge() && !at_line_start {
                self.new_line(TEXT_LINE_HEIGHT);
                if word.trim().is_empty() {
                    continue;
                }
            }

            if width > Self::content_width() {
                for ch in word.chars() {
                    let mut buf = [0u8; 4];
                    let piece: &str = ch.encode_utf8(&mut buf);
                    if self.x + text_width(piece, style.bold, TEXT_SIZE) > Self::right_edge() {
                        self.new_line(TEXT_LINE_HEIGHT);
                    }
                    self.draw_word(piece, style);
                }
            } else {
                self.draw_word(word, style);
            }
        }
    }
}

/// Split into alternating runs of spaces and non-spaces.
fn split_keeping_spaces(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_space = None;
    for (i, ch) in text.char_indices() {
        let space = ch == ' ';
        if in_space.is_some_and(|s| s != space) {
            parts.push(&text[start..i]);
            start = i;
        }
        in_space = Some(space);
    }
    if start < text.len() {
        parts.push(&text[start..]);
    }
    parts
}

impl DocumentWriter for PdfWriter {
    fn title_block(&mut self, title: &Cp1252Text) {
        let title = title.to_unicode();
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        for word in split_keeping_spaces(&title) {
            let candidate = format!("{current}{word}");
            if !current.is_empty()
                && text_width(&candidate, true, TITLE_SIZE) > Self::content_width() - 2.0
            {
                lines.push(std::mem::take(&mut current).trim_end().to_string());
                current = word.trim_start().to_string();
            } else {
                current = candidate;
            }
        }
        lines.push(current);

        for line in lines {
            self.ensure_room(TITLE_LINE_HEIGHT);
            let top = self.y;
            let bottom = top + TITLE_LINE_HEIGHT;
            self.layer.set_fill_color(rgb(TITLE_FILL));
            self.layer.set_outline_color(black());
            self.layer.set_outline_thickness(RULE_THICKNESS_PT);
            self.layer.add_polygon(Polygon {
                rings: vec![vec![
                    (Self::point(MARGIN, top), false),
                    (Self::point(Self::right_edge(), top), false),
                    (Self::point(Self::right_edge(), bottom), false),
                    (Self::point(MARGIN, bottom), false),
                ]],
                mode: PaintMode::FillStroke,
                winding_order: WindingOrder::NonZero,
            });

            let width = text_width(&line, true, TITLE_SIZE);
            let x = MARGIN + (Self::content_width() - width).max(0.0) / 2.0;
            let baseline = self.baseline(TITLE_LINE_HEIGHT, TITLE_SIZE);
            self.layer.set_fill_color(black());
            self.layer.use_text(
                line,
                TITLE_SIZE,
                Mm(x),
                Mm(PAGE_HEIGHT - baseline),
                &self.fonts.bold,
            );
            self.x = MARGIN;
            self.y = bottom;
        }
    }

    fn text_block(&mut self, text: &Cp1252Text) {
        self.ensure_room(TEXT_LINE_HEIGHT);
        for segment in markup::parse(&text.to_unicode()) {
            match segment {
                Segment::Text(run, style) => self.flow(&run, style),
                Segment::Break => self.new_line(TEXT_LINE_HEIGHT),
            }
        }
    }

    fn line_feed(&mut self, height: f32) {
        self.x = MARGIN;
        self.y += height;
    }

    fn horizontal_rule(&mut self) {
        self.ensure_room(0.0);
        self.layer.set_outline_color(rgb(RULE_COLOR));
        self.layer.set_outline_thickness(RULE_THICKNESS_PT);
        let end = self.x + PAGE_WIDTH - MARGIN - MARGIN;
        self.draw_line(self.x, self.y, end, self.y);
    }

    fn finish(self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        self.doc
            .save(&mut BufWriter::new(file))
            .map_err(|e| anyhow!("failed to write PDF to {}: {e:?}", path.display()))
    }
}
