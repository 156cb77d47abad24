use std::num::NonZeroUsize;

use crate::{
    document::Document,
    font_storage::FontStorage,
    renderer::{GlyphCache, Raster, Surface},
    text::{LineLayout, TextStyle},
};

/// Draws documents onto surfaces, caching glyph rasterizations between frames.
pub struct CollageRenderer {
    style: TextStyle,
    cache: GlyphCache,
}

impl CollageRenderer {
    /// Creates a renderer that draws every item with `style`.
    pub fn new(style: TextStyle, cache_capacity: NonZeroUsize) -> Self {
        Self {
            style,
            cache: GlyphCache::new(cache_capacity),
        }
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Returns a reference to the underlying glyph cache.
    pub fn cache(&self) -> &GlyphCache {
        &self.cache
    }

    /// Fills `surface` with the document background, then draws each item
    /// centered on its anchor in draw order.
    ///
    /// Items whose text cannot be laid out with the configured font are
    /// skipped.
    pub fn render<S: Surface + ?Sized>(
        &mut self,
        document: &Document,
        surface: &mut S,
        font_storage: &mut FontStorage,
    ) {
        surface.fill(document.background_color());

        let [width, height] = surface.size();
        if width == 0 || height == 0 {
            return;
        }

        let default_foreground = surface.default_foreground();
        for item in document.items() {
            let Some(layout) = LineLayout::new(item.text(), self.style, font_storage) else {
                log::warn!(
                    "Font {:?} unavailable, skipping item {:?}.",
                    self.style.font_id,
                    item.text()
                );
                continue;
            };

            let color = item.resolved_color(default_foreground);
            let [origin_x, origin_y] = layout.centered_origin(item.x(), item.y());

            for glyph_pos in &layout.glyphs {
                let Some(glyph) = self.cache.get(&glyph_pos.glyph_key, font_storage) else {
                    continue;
                };

                let left = (origin_x + glyph_pos.x).floor() as isize;
                let top = (origin_y + glyph_pos.y).floor() as isize;

                for row in 0..glyph.height {
                    let iy = top + row as isize;
                    if iy < 0 || iy as usize >= height {
                        continue;
                    }

                    for col in 0..glyph.width {
                        let coverage = glyph.coverage[row * glyph.width + col];
                        if coverage == 0 {
                            continue;
                        }

                        let ix = left + col as isize;
                        if ix < 0 || ix as usize >= width {
                            continue;
                        }

                        surface.blend(ix as usize, iy as usize, color, coverage);
                    }
                }
            }
        }
    }

    /// Renders `document` into a new raster of `image_size` pixels.
    ///
    /// The size is independent of any on-screen view.
    pub fn render_to_raster(
        &mut self,
        document: &Document,
        image_size: [usize; 2],
        font_storage: &mut FontStorage,
    ) -> Raster {
        let mut raster = Raster::new(image_size[0], image_size[1]);
        self.render(document, &mut raster, font_storage);
        raster
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color::Rgb, item::Item, renderer::resolve_text_style};

    fn system_renderer(font_storage: &mut FontStorage) -> Option<CollageRenderer> {
        font_storage.load_system_fonts();
        let style = resolve_text_style(font_storage, &crate::config::CollageConfig::default())?;
        Some(CollageRenderer::new(style, NonZeroUsize::new(64).unwrap()))
    }

    #[test]
    fn test_background_only() {
        let mut font_storage = FontStorage::new();
        let Some(mut renderer) = system_renderer(&mut font_storage) else {
            return;
        };

        let mut document = Document::default();
        document.set_background_color(Rgb::new(10, 20, 30));

        let raster = renderer.render_to_raster(&document, [16, 8], &mut font_storage);
        assert_eq!(raster.size(), [16, 8]);
        assert!(
            raster
                .pixels
                .chunks_exact(3)
                .all(|pixel| pixel == [10, 20, 30])
        );
    }

    #[test]
    fn test_item_is_drawn_around_anchor() {
        let mut font_storage = FontStorage::new();
        let Some(mut renderer) = system_renderer(&mut font_storage) else {
            return;
        };

        let mut document = Document::default();
        document.replace_all(
            vec![Item::new("WWW", 50, 25, Some(Rgb::BLACK)).unwrap()],
            Rgb::WHITE,
        );

        let raster = renderer.render_to_raster(&document, [100, 50], &mut font_storage);
        let touched: Vec<(usize, usize)> = (0..50)
            .flat_map(|y| (0..100).map(move |x| (x, y)))
            .filter(|&(x, y)| raster.pixel(x, y) != Some(Rgb::WHITE))
            .collect();

        assert!(!touched.is_empty());
        let mean_x = touched.iter().map(|p| p.0).sum::<usize>() / touched.len();
        let mean_y = touched.iter().map(|p| p.1).sum::<usize>() / touched.len();
        assert!(mean_x.abs_diff(50) <= 10);
        assert!(mean_y.abs_diff(25) <= 10);
        assert!(!renderer.cache().is_empty());
    }

    #[test]
    fn test_uncolored_item_uses_surface_foreground() {
        let mut font_storage = FontStorage::new();
        let Some(mut renderer) = system_renderer(&mut font_storage) else {
            return;
        };

        let mut document = Document::default();
        document.replace_all(vec![Item::new("WWW", 50, 25, None).unwrap()], Rgb::BLACK);

        let mut raster = Raster::new(100, 50).with_default_foreground(Rgb::new(255, 0, 0));
        renderer.render(&document, &mut raster, &mut font_storage);

        assert!(
            raster
                .pixels
                .chunks_exact(3)
                .all(|pixel| pixel[1] == 0 && pixel[2] == 0)
        );
        assert!(raster.pixels.chunks_exact(3).any(|pixel| pixel[0] > 0));
    }

    #[test]
    fn test_offscreen_items_are_clipped() {
        let mut font_storage = FontStorage::new();
        let Some(mut renderer) = system_renderer(&mut font_storage) else {
            return;
        };

        let mut document = Document::default();
        document.replace_all(
            vec![
                Item::new("far", -500, -500, Some(Rgb::BLACK)).unwrap(),
                Item::new("edge", 0, 0, Some(Rgb::BLACK)).unwrap(),
            ],
            Rgb::WHITE,
        );

        let raster = renderer.render_to_raster(&document, [20, 20], &mut font_storage);
        assert_eq!(raster.pixels.len(), 20 * 20 * 3);
    }
}
