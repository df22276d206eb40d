//! Pixel buffer drawn to the terminal with half-block characters
//!
//! Each terminal cell shows two vertically stacked pixels: the upper one as
//! the foreground of `▀`, the lower one as the background.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Same hue at half brightness
    pub const fn dim(self) -> Rgb {
        Rgb(self.0 / 2, self.1 / 2, self.2 / 2)
    }

    fn color(self) -> Color {
        Color::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

pub struct PixelBuf {
    w: usize,
    /// Pixel height = terminal rows * 2
    h: usize,
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize, fill: Rgb) -> Self {
        Self {
            w,
            h,
            px: vec![fill; w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize, fill: Rgb) {
        self.w = w;
        self.h = h;
        self.px.clear();
        self.px.resize(w * h, fill);
    }

    pub fn clear(&mut self, fill: Rgb) {
        self.px.fill(fill);
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h.max(0) {
            for dx in 0..w.max(0) {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Halve the brightness of every pixel (overlay backdrop)
    pub fn dim(&mut self) {
        for p in &mut self.px {
            *p = p.dim();
        }
    }

    /// Write the buffer as half-block cells, starting at the top-left corner
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        if self.w == 0 {
            return out.flush();
        }

        // Each pair of pixel rows becomes one line of cells
        for (line, rows) in self.px.chunks_exact(self.w * 2).enumerate() {
            if line > 0 {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
            }
            let (upper, lower) = rows.split_at(self.w);
            let mut pen = None;
            for cell in upper.iter().copied().zip(lower.iter().copied()) {
                if pen != Some(cell) {
                    let (fg, bg) = cell;
                    queue!(
                        out,
                        style::SetForegroundColor(fg.color()),
                        style::SetBackgroundColor(bg.color())
                    )?;
                    pen = Some(cell);
                }
                let glyph = if cell.0 == cell.1 { ' ' } else { '\u{2580}' };
                queue!(out, style::Print(glyph))?;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

/// 3x5 digit glyphs, one bit per pixel, top row in the high bits
#[rustfmt::skip]
const GLYPHS: [u16; 10] = [
    0b111_101_101_101_111,
    0b010_110_010_010_111,
    0b111_001_111_100_111,
    0b111_001_011_001_111,
    0b101_101_111_001_001,
    0b111_100_111_001_111,
    0b111_100_111_101_111,
    0b111_001_010_010_010,
    0b111_101_111_101_111,
    0b111_101_111_001_111,
];

const GLYPH_W: i32 = 3;
const GLYPH_H: i32 = 5;
/// Horizontal advance per digit
const ADVANCE: i32 = GLYPH_W + 1;

/// Color and optional drop shadow for [`draw_number`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ink {
    pub fg: Rgb,
    pub shadow: Option<Rgb>,
}

impl Ink {
    pub const fn plain(fg: Rgb) -> Self {
        Self { fg, shadow: None }
    }

    pub const fn shadowed(fg: Rgb, shadow: Rgb) -> Self {
        Self {
            fg,
            shadow: Some(shadow),
        }
    }
}

fn glyph_pixels(digit: u32) -> impl Iterator<Item = (i32, i32)> {
    let bits = GLYPHS[digit as usize % 10];
    (0..GLYPH_H * GLYPH_W).filter_map(move |i| {
        let lit = (bits >> (GLYPH_H * GLYPH_W - 1 - i)) & 1 == 1;
        lit.then_some((i % GLYPH_W, i / GLYPH_W))
    })
}

/// Draw `n` horizontally centered on `cx`, shadow first so digits sit on top
pub fn draw_number(buf: &mut PixelBuf, cx: i32, y: i32, n: u32, ink: Ink) {
    let digits: Vec<u32> = n.to_string().chars().filter_map(|c| c.to_digit(10)).collect();
    let left = cx - (digits.len() as i32 * ADVANCE - 1) / 2;

    let layers = ink.shadow.map(|c| (1, c)).into_iter().chain([(0, ink.fg)]);
    for (offset, color) in layers {
        for (k, &d) in digits.iter().enumerate() {
            let x0 = left + k as i32 * ADVANCE + offset;
            for (dx, dy) in glyph_pixels(d) {
                buf.set(x0 + dx, y + offset + dy, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb = Rgb(0, 0, 0);
    const WHITE: Rgb = Rgb(255, 255, 255);

    #[test]
    fn test_set_clips_to_bounds() {
        let mut buf = PixelBuf::new(4, 4, BLACK);
        buf.set(-1, 0, WHITE);
        buf.set(4, 0, WHITE);
        buf.set(0, 4, WHITE);
        buf.fill_rect(2, 2, 10, 10, WHITE);
        assert_eq!(buf.get(0, 0), BLACK);
        assert_eq!(buf.get(3, 3), WHITE);
        assert_eq!(buf.get(1, 1), BLACK);
    }

    #[test]
    fn test_number_is_centered() {
        let mut buf = PixelBuf::new(20, 10, BLACK);
        draw_number(&mut buf, 10, 0, 11, Ink::plain(WHITE));
        // "11" spans 7 px starting at 10 - 3
        assert_eq!(buf.get(8, 0), WHITE);
        assert_eq!(buf.get(12, 0), WHITE);
        assert_eq!(buf.get(7, 0), BLACK);
    }

    #[test]
    fn test_shadow_is_optional() {
        const GREY: Rgb = Rgb(30, 30, 30);

        // "7": the diagonal leaves (2, 3) empty, its shadow lands there
        let mut buf = PixelBuf::new(8, 8, BLACK);
        draw_number(&mut buf, 1, 0, 7, Ink::shadowed(WHITE, GREY));
        assert_eq!(buf.get(0, 0), WHITE);
        assert_eq!(buf.get(2, 3), GREY);

        let mut buf = PixelBuf::new(8, 8, BLACK);
        draw_number(&mut buf, 1, 0, 7, Ink::plain(WHITE));
        assert_eq!(buf.get(2, 3), BLACK);
    }

    #[test]
    fn test_render_emits_half_blocks() {
        let mut buf = PixelBuf::new(2, 2, BLACK);
        buf.set(0, 0, WHITE);
        let mut out = Vec::new();
        buf.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('\u{2580}'));
        assert!(text.contains(' '));
    }
}
