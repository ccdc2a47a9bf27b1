//! Rasterizes terminal text snapshots.
//!
//! Lines are drawn top to bottom at a fixed pitch of `font_size + 2`
//! pixels, starting at the margin. There is no wrapping: anything that
//! falls outside the canvas is clipped.

mod font;

use std::path::PathBuf;

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use font8x8::UnicodeFonts;
use image::{Rgb, Rgba, RgbaImage};

pub use font::{Face, PREFERRED_FONT};

/// Approximate pixel size of one terminal cell.
pub const CELL_WIDTH: u32 = 8;
pub const CELL_HEIGHT: u32 = 16;

/// Canvas limits used when none are configured.
pub const DEFAULT_MAX_WIDTH: u32 = 1000;
pub const DEFAULT_MAX_HEIGHT: u32 = 600;

pub const DEFAULT_FONT_SIZE: u32 = 18;
pub const DEFAULT_MARGIN: u32 = 10;
pub const DEFAULT_BACKGROUND: Rgb<u8> = Rgb([25, 25, 35]);
pub const DEFAULT_FOREGROUND: Rgb<u8> = Rgb([220, 220, 220]);

/// Visual parameters for rendering frames.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub width: u32,
    pub height: u32,
    pub font_size: u32,
    pub margin: u32,
    pub background: Rgb<u8>,
    pub foreground: Rgb<u8>,
    /// Font tried before the built-in search list
    pub font_path: Option<PathBuf>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            width: 80 * CELL_WIDTH,
            height: 24 * CELL_HEIGHT,
            font_size: DEFAULT_FONT_SIZE,
            margin: DEFAULT_MARGIN,
            background: DEFAULT_BACKGROUND,
            foreground: DEFAULT_FOREGROUND,
            font_path: None,
        }
    }
}

impl RenderStyle {
    /// Size the canvas for a terminal of `cols` x `rows`, capped at the
    /// given maximum. Both dimensions are at least one pixel.
    pub fn fit_terminal(mut self, cols: u16, rows: u16, max_width: u32, max_height: u32) -> Self {
        self.width = (cols as u32 * CELL_WIDTH).min(max_width).max(1);
        self.height = (rows as u32 * CELL_HEIGHT).min(max_height).max(1);
        self
    }

    pub fn line_height(&self) -> u32 {
        self.font_size + 2
    }
}

/// Draws text snapshots onto fresh canvases.
#[derive(Debug)]
pub struct Renderer {
    style: RenderStyle,
    face: Face,
}

impl Renderer {
    /// Create a renderer, resolving the font once up front.
    pub fn new(style: RenderStyle) -> Self {
        let face = Face::resolve(style.font_path.as_deref());
        Self { style, face }
    }

    pub fn with_face(style: RenderStyle, face: Face) -> Self {
        Self { style, face }
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn face(&self) -> &Face {
        &self.face
    }

    pub fn render(&self, text: &str) -> RgbaImage {
        let style = &self.style;
        let Rgb([r, g, b]) = style.background;
        let mut image = RgbaImage::from_pixel(style.width, style.height, Rgba([r, g, b, 255]));

        let mut y = style.margin;
        for line in text.split('\n') {
            if y >= style.height {
                break;
            }

            match &self.face {
                Face::TrueType { font, .. } => self.draw_outline(&mut image, font, line, y),
                Face::Builtin => self.draw_bitmap(&mut image, line, y),
            }

            y += style.line_height();
        }

        image
    }

    fn draw_outline(&self, image: &mut RgbaImage, font: &FontVec, line: &str, y: u32) {
        let style = &self.style;
        let scaled = font.as_scaled(PxScale::from(style.font_size as f32));
        let mut caret = point(style.margin as f32, y as f32 + scaled.ascent());

        for c in visible_chars(line) {
            if caret.x >= style.width as f32 {
                break;
            }

            let mut glyph = scaled.scaled_glyph(c);
            glyph.position = caret;
            caret.x += scaled.h_advance(glyph.id);

            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    let px = bounds.min.x as i64 + gx as i64;
                    let py = bounds.min.y as i64 + gy as i64;
                    blend(image, px, py, style.foreground, coverage);
                });
            }
        }
    }

    fn draw_bitmap(&self, image: &mut RgbaImage, line: &str, y: u32) {
        let style = &self.style;
        let scale = (style.font_size / 8).max(1);
        let top = y + style.font_size.saturating_sub(8 * scale) / 2;
        let mut x = style.margin;

        for c in visible_chars(line) {
            if x >= style.width {
                break;
            }

            if let Some(rows) = bitmap_glyph(c) {
                for (row, bits) in rows.iter().enumerate() {
                    for col in 0..8u32 {
                        if bits & (1 << col) == 0 {
                            continue;
                        }

                        let px = x + col * scale;
                        let py = top + row as u32 * scale;
                        for dy in 0..scale {
                            for dx in 0..scale {
                                blend(
                                    image,
                                    (px + dx) as i64,
                                    (py + dy) as i64,
                                    style.foreground,
                                    1.0,
                                );
                            }
                        }
                    }
                }
            }

            x += 8 * scale;
        }
    }
}

fn visible_chars(line: &str) -> impl Iterator<Item = char> + '_ {
    line.chars().filter(|c| !c.is_control())
}

fn bitmap_glyph(c: char) -> Option<[u8; 8]> {
    font8x8::BASIC_FONTS
        .get(c)
        .or_else(|| font8x8::LATIN_FONTS.get(c))
        .or_else(|| font8x8::BOX_FONTS.get(c))
        .or_else(|| font8x8::BLOCK_FONTS.get(c))
}

/// Mix `color` into the pixel at (x, y); out-of-bounds writes are clipped.
fn blend(image: &mut RgbaImage, x: i64, y: i64, color: Rgb<u8>, coverage: f32) {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        return;
    }

    let alpha = coverage.clamp(0.0, 1.0);
    let pixel = image.get_pixel_mut(x as u32, y as u32);

    for i in 0..3 {
        let mixed = pixel.0[i] as f32 * (1.0 - alpha) + color.0[i] as f32 * alpha;
        pixel.0[i] = mixed.round() as u8;
    }
}
