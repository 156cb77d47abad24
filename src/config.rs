use std::num::NonZeroUsize;

use crate::{color::Rgb, generator::WordSelection, item::CanvasSize};

/// Font family preference for item labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontFamily {
    Serif,
    SansSerif,
    Monospace,
    Named(String),
}

impl FontFamily {
    pub fn as_family(&self) -> fontdb::Family<'_> {
        match self {
            FontFamily::Serif => fontdb::Family::Serif,
            FontFamily::SansSerif => fontdb::Family::SansSerif,
            FontFamily::Monospace => fontdb::Family::Monospace,
            FontFamily::Named(name) => fontdb::Family::Name(name),
        }
    }
}

/// Application defaults for a collage session.
///
/// All values are plain data; construct with `Default` and override the
/// fields that differ.
#[derive(Clone, Debug, PartialEq)]
pub struct CollageConfig {
    /// Size of the live canvas and the area random collages are spread over.
    pub canvas_size: CanvasSize,
    /// Background of a new or cleared document.
    pub default_background: Rgb,
    /// Initial color for newly placed text.
    pub default_text_color: Rgb,
    /// Color for items that do not carry one.
    pub default_foreground: Rgb,
    /// Placed instead of empty text.
    pub fallback_text: String,
    pub font_families: Vec<FontFamily>,
    pub font_weight: fontdb::Weight,
    pub font_size: f32,
    pub random_item_count: usize,
    pub word_selection: WordSelection,
    pub glyph_cache_capacity: NonZeroUsize,
}

impl Default for CollageConfig {
    fn default() -> Self {
        Self {
            canvas_size: CanvasSize::new(800, 600),
            default_background: Rgb::LIGHT_GRAY,
            default_text_color: Rgb::DARK_GRAY,
            default_foreground: Rgb::BLACK,
            fallback_text: "Hello World!".into(),
            font_families: vec![FontFamily::Serif, FontFamily::SansSerif],
            font_weight: fontdb::Weight::BOLD,
            font_size: 24.0,
            random_item_count: crate::generator::RANDOM_ITEM_COUNT,
            word_selection: WordSelection::ExcludeLast,
            glyph_cache_capacity: NonZeroUsize::new(1024).unwrap_or(NonZeroUsize::MIN),
        }
    }
}
