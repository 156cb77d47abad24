use crate::{font_storage::FontStorage, renderer::glyph_cache::GlyphKey};

/// Font selection used to lay out item labels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font_id: fontdb::ID,
    pub font_size: f32,
}

/// **Y-axis goes down**
///
/// Glyph bitmap origin relative to the top-left corner of the line box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPosition {
    pub glyph_key: GlyphKey,
    pub x: f32,
    pub y: f32,
}

/// One line of positioned glyphs together with its extent.
///
/// The line box spans from `0` to `width` horizontally and from `0` to
/// `height` vertically, with the baseline at `ascent`.
#[derive(Clone, Debug, PartialEq)]
pub struct LineLayout {
    pub width: f32,
    pub ascent: f32,
    pub descent: f32,
    pub glyphs: Vec<GlyphPosition>,
}

impl LineLayout {
    /// Lays out `text` on a single line.
    ///
    /// Returns `None` when the font is not available in `font_storage` or has
    /// no horizontal metrics.
    pub fn new(text: &str, style: TextStyle, font_storage: &mut FontStorage) -> Option<Self> {
        let font = font_storage.font(style.font_id)?;
        let line_metrics = font.horizontal_line_metrics(style.font_size)?;

        let mut glyphs = Vec::with_capacity(text.len());
        let mut pen_x = 0.0f32;
        let mut width = 0.0f32;
        let mut previous: Option<u16> = None;

        for ch in text.chars() {
            let glyph_index = font.lookup_glyph_index(ch);
            let metrics = font.metrics_indexed(glyph_index, style.font_size);

            if let Some(previous) = previous {
                pen_x += font
                    .horizontal_kern_indexed(previous, glyph_index, style.font_size)
                    .unwrap_or(0.0);
            }

            let x = pen_x + metrics.xmin as f32;
            // glyph bitmaps hang from their top edge; shift onto the baseline
            let y = line_metrics.ascent - (metrics.ymin as f32 + metrics.height as f32);
            glyphs.push(GlyphPosition {
                glyph_key: GlyphKey::new(style.font_id, glyph_index, style.font_size),
                x,
                y,
            });

            width = width.max(x + metrics.width as f32);
            pen_x += metrics.advance_width;
            previous = Some(glyph_index);
        }

        Some(Self {
            width: width.max(pen_x).max(0.0),
            ascent: line_metrics.ascent,
            descent: line_metrics.descent,
            glyphs,
        })
    }

    /// Distance from the top of the line box to its bottom.
    pub fn height(&self) -> f32 {
        (self.ascent - self.descent).max(0.0)
    }

    /// Offset that places the center of the line box on `(x, y)`.
    pub fn centered_origin(&self, x: i32, y: i32) -> [f32; 2] {
        [
            x as f32 - self.width / 2.0,
            y as f32 - self.height() / 2.0,
        ]
    }
}
