use std::{collections::HashMap, num::NonZeroUsize, sync::Arc};

use crate::font_storage::FontStorage;

pub const SUB_PIXEL_QUANTIZE: f32 = 256f32;

/// Identifies one rasterization: a glyph of a font at a quantized pixel size.
///
/// Font IDs come from `fontdb` and are only stable within one database.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlyphKey {
    font_id: fontdb::ID,
    glyph_index: u16,
    font_size: u32, // font size * SUB_PIXEL_QUANTIZE
}

impl GlyphKey {
    pub fn new(font_id: fontdb::ID, glyph_index: u16, font_size: f32) -> Self {
        Self {
            font_id,
            glyph_index,
            font_size: (font_size * SUB_PIXEL_QUANTIZE).round() as u32,
        }
    }

    pub fn font_id(&self) -> fontdb::ID {
        self.font_id
    }

    pub fn glyph_index(&self) -> u16 {
        self.glyph_index
    }

    pub fn font_size(&self) -> f32 {
        self.font_size as f32 / SUB_PIXEL_QUANTIZE
    }
}

/// Coverage bitmap of a single glyph, one byte per pixel.
#[derive(Debug)]
pub struct RasterizedGlyph {
    pub width: usize,
    pub height: usize,
    pub coverage: Vec<u8>,
}

struct CacheEntry {
    glyph: Arc<RasterizedGlyph>,
    last_used: u64,
}

/// Bounded cache of glyph rasterizations.
///
/// When full, the least recently used entry is evicted.
pub struct GlyphCache {
    capacity: usize,
    tick: u64,
    entries: HashMap<GlyphKey, CacheEntry, fxhash::FxBuildHasher>,
}

impl GlyphCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        let capacity = capacity.get();
        Self {
            capacity,
            tick: 0,
            entries: HashMap::with_capacity_and_hasher(capacity, fxhash::FxBuildHasher::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.tick = 0;
    }

    pub fn contains(&self, key: &GlyphKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the rasterized glyph, rasterizing it on a miss.
    ///
    /// Returns `None` when the font is missing or the glyph has no pixels
    /// (whitespace, for example).
    pub fn get(
        &mut self,
        key: &GlyphKey,
        font_storage: &mut FontStorage,
    ) -> Option<Arc<RasterizedGlyph>> {
        self.tick = self.tick.wrapping_add(1);
        let tick = self.tick;

        if let Some(entry) = self.entries.get_mut(key) {
            entry.last_used = tick;
            return Some(Arc::clone(&entry.glyph));
        }

        let font = font_storage.font(key.font_id())?;
        let (metrics, coverage) = font.rasterize_indexed(key.glyph_index(), key.font_size());
        if metrics.width == 0 || metrics.height == 0 {
            return None;
        }

        let glyph = Arc::new(RasterizedGlyph {
            width: metrics.width,
            height: metrics.height,
            coverage,
        });
        self.insert(*key, Arc::clone(&glyph));
        Some(glyph)
    }

    fn insert(&mut self, key: GlyphKey, glyph: Arc<RasterizedGlyph>) {
        if self.entries.len() >= self.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| *key);
            if let Some(oldest) = oldest {
                self.entries.remove(&oldest);
            }
        }

        self.entries.insert(
            key,
            CacheEntry {
                glyph,
                last_used: self.tick,
            },
        );
    }
}
