//! 5x7 bitmap font shared by the text scenes.
//!
//! Each glyph is seven rows of five bits, bit 4 being the leftmost column.
//! Lowercase letters reuse the uppercase shapes.

use crate::core::render_target::RenderTarget;

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal advance per character, in glyph cells
pub const CHAR_ADVANCE: u32 = GLYPH_WIDTH + 1;
/// Vertical advance per line, in glyph cells
pub const LINE_ADVANCE: u32 = GLYPH_HEIGHT + 2;

#[rustfmt::skip]
static LETTERS: [[u8; 7]; 26] = [
    [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // A
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E], // B
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E], // C
    [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E], // D
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F], // E
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10], // F
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F], // G
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // H
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // I
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C], // J
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // K
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F], // L
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11], // M
    [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11], // N
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // O
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10], // P
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D], // Q
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11], // R
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E], // S
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // T
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // U
    [0x11, 0x11, 0x11, 0x11, 0x0A, 0x0A, 0x04], // V
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x1B, 0x11], // W
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11], // X
    [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04], // Y
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // Z
];

#[rustfmt::skip]
static DIGITS: [[u8; 7]; 10] = [
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E], // 0
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E], // 1
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F], // 2
    [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E], // 3
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02], // 4
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E], // 5
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E], // 6
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08], // 7
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E], // 8
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C], // 9
];

#[rustfmt::skip]
static PUNCTUATION: [(char, [u8; 7]); 32] = [
    ('.',  [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C]),
    (',',  [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08]),
    (':',  [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00]),
    (';',  [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x04, 0x08]),
    ('\'', [0x04, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00]),
    ('"',  [0x0A, 0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00]),
    ('`',  [0x08, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('(',  [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02]),
    (')',  [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08]),
    ('[',  [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E]),
    (']',  [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E]),
    ('{',  [0x06, 0x04, 0x04, 0x08, 0x04, 0x04, 0x06]),
    ('}',  [0x0C, 0x04, 0x04, 0x02, 0x04, 0x04, 0x0C]),
    ('<',  [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02]),
    ('>',  [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08]),
    ('=',  [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00]),
    ('+',  [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00]),
    ('-',  [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00]),
    ('*',  [0x00, 0x0A, 0x04, 0x1F, 0x04, 0x0A, 0x00]),
    ('/',  [0x01, 0x01, 0x02, 0x04, 0x08, 0x10, 0x10]),
    ('\\', [0x10, 0x10, 0x08, 0x04, 0x02, 0x01, 0x01]),
    ('_',  [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F]),
    ('|',  [0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04]),
    ('!',  [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04]),
    ('?',  [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04]),
    ('#',  [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A]),
    ('$',  [0x04, 0x0F, 0x14, 0x0E, 0x05, 0x1E, 0x04]),
    ('%',  [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03]),
    ('&',  [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D]),
    ('@',  [0x0E, 0x11, 0x01, 0x0D, 0x15, 0x15, 0x0E]),
    ('^',  [0x04, 0x0A, 0x11, 0x00, 0x00, 0x00, 0x00]),
    ('~',  [0x00, 0x00, 0x08, 0x15, 0x02, 0x00, 0x00]),
];

/// Glyph rows for a character, or None for whitespace and anything
/// outside the font's coverage
pub fn glyph(c: char) -> Option<&'static [u8; 7]> {
    let c = c.to_ascii_uppercase();
    match c {
        'A'..='Z' => Some(&LETTERS[(c as u8 - b'A') as usize]),
        '0'..='9' => Some(&DIGITS[(c as u8 - b'0') as usize]),
        _ => PUNCTUATION.iter().find(|(p, _)| *p == c).map(|(_, g)| g),
    }
}

/// Pixel dimensions of a multi-line string at the given scale
pub fn text_size(text: &str, scale: u32) -> (u32, u32) {
    let mut lines = 0u32;
    let mut widest = 0u32;
    for line in text.lines() {
        lines += 1;
        widest = widest.max(line.chars().count() as u32);
    }
    if lines == 0 {
        return (0, 0);
    }
    let width = widest * CHAR_ADVANCE * scale;
    let height = ((lines - 1) * LINE_ADVANCE + GLYPH_HEIGHT) * scale;
    (width, height)
}

fn draw_text_impl(
    target: &mut RenderTarget,
    text: &str,
    x: i32,
    y: i32,
    scale: u32,
    rgba: [u8; 4],
    additive: bool,
) {
    let scale = scale.max(1) as i32;
    let mut pen_y = y;
    for line in text.lines() {
        let mut pen_x = x;
        for c in line.chars() {
            if let Some(rows) = glyph(c) {
                for (row, bits) in rows.iter().enumerate() {
                    for col in 0..GLYPH_WIDTH {
                        if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                            continue;
                        }
                        let px = pen_x + col as i32 * scale;
                        let py = pen_y + row as i32 * scale;
                        if additive {
                            target.add_rect(px, py, scale as u32, scale as u32, rgba);
                        } else {
                            target.fill_rect(px, py, scale as u32, scale as u32, rgba);
                        }
                    }
                }
            }
            pen_x += CHAR_ADVANCE as i32 * scale;
        }
        pen_y += LINE_ADVANCE as i32 * scale;
    }
}

/// Draw a multi-line string with source-over blending
pub fn draw_text(target: &mut RenderTarget, text: &str, x: i32, y: i32, scale: u32, rgba: [u8; 4]) {
    draw_text_impl(target, text, x, y, scale, rgba, false);
}

/// Draw a multi-line string additively (glow layers)
pub fn draw_text_add(
    target: &mut RenderTarget,
    text: &str,
    x: i32,
    y: i32,
    scale: u32,
    rgba: [u8; 4],
) {
    draw_text_impl(target, text, x, y, scale, rgba, true);
}
