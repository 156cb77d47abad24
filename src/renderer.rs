pub mod collage_renderer;
pub mod glyph_cache;
pub mod raster;

pub use collage_renderer::CollageRenderer;
pub use glyph_cache::{GlyphCache, GlyphKey, RasterizedGlyph};
pub use raster::Raster;

use crate::{color::Rgb, config::CollageConfig, font_storage::FontStorage, text::TextStyle};

/// Something a collage can be painted on: the on-screen canvas of a shell or
/// an offscreen [`Raster`].
pub trait Surface {
    /// `[width, height]` in pixels.
    fn size(&self) -> [usize; 2];

    /// Color used for items that carry no color of their own.
    fn default_foreground(&self) -> Rgb;

    /// Paints every pixel with `color`.
    fn fill(&mut self, color: Rgb);

    /// Mixes `color` into the pixel at `(x, y)` with `coverage / 255` opacity.
    ///
    /// Out-of-bounds coordinates are ignored.
    fn blend(&mut self, x: usize, y: usize, color: Rgb, coverage: u8);
}

/// Picks the font used to draw item labels.
///
/// Families from `config` are tried in order at the configured weight; when
/// none matches, the first face that loads is used. Returns `None` when no
/// usable font is loaded.
pub fn resolve_text_style(
    font_storage: &mut FontStorage,
    config: &CollageConfig,
) -> Option<TextStyle> {
    let families = config
        .font_families
        .iter()
        .map(|family| family.as_family())
        .collect::<Vec<_>>();
    let query = fontdb::Query {
        families: &families,
        weight: config.font_weight,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };

    let font_id = match font_storage.query(&query) {
        Some((font_id, _)) => font_id,
        None => {
            let candidates: Vec<fontdb::ID> = font_storage.faces().map(|face| face.id).collect();
            candidates
                .into_iter()
                .find(|&id| font_storage.font(id).is_some())?
        }
    };

    Some(TextStyle {
        font_id,
        font_size: config.font_size,
    })
}
