/// Glyph advance widths (1/1000 em) of Helvetica for the printable ASCII
/// range 0x20..=0x7E, from the standard Adobe core font metrics.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width used for characters outside the ASCII table.
const FALLBACK: u16 = 556;

pub const MM_PER_PT: f32 = 25.4 / 72.0;

fn advance(ch: char, bold: bool) -> u16 {
    let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
    (ch as usize)
        .checked_sub(0x20)
        .and_then(|i| table.get(i))
        .copied()
        .unwrap_or(FALLBACK)
}

/// Rendered width in millimetres of `text` set in Helvetica at `size_pt`.
/// The oblique faces share the upright widths.
pub fn text_width(text: &str, bold: bool, size_pt: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(advance(c, bold))).sum();
    units as f32 / 1000.0 * size_pt * MM_PER_PT
}
