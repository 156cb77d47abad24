use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use rand::Rng;

use crate::{
    codec,
    color::Rgb,
    config::CollageConfig,
    document::Document,
    error::Result,
    font_storage::FontStorage,
    generator::RandomCollageGenerator,
    item::Item,
    renderer::{self, CollageRenderer, Raster, Surface},
};

/// High-level entry point for one collage editing session.
///
/// This struct owns the live [`Document`] together with the fonts and the
/// renderer, and exposes the closed set of operations a shell invokes.
///
/// The document sits behind an `RwLock`. Every operation that swaps in a new
/// item sequence builds the replacement completely before taking the write
/// lock, so a render holding the read lock sees either the old or the new
/// document and never a partial one.
pub struct Collage {
    config: CollageConfig,
    /// The live document.
    pub document: RwLock<Document>,
    /// Fonts used to draw item labels.
    pub font_storage: Mutex<FontStorage>,
    /// The renderer instance (optional until fonts are resolved).
    pub renderer: Mutex<Option<Box<CollageRenderer>>>,
}

impl Default for Collage {
    fn default() -> Self {
        Self::new()
    }
}

impl Collage {
    /// Creates a session with an empty document and default settings.
    pub fn new() -> Self {
        Self::with_config(CollageConfig::default())
    }

    pub fn with_config(config: CollageConfig) -> Self {
        let document = Document::new(config.default_background, config.default_text_color);
        Self {
            config,
            document: RwLock::new(document),
            font_storage: Mutex::new(FontStorage::new()),
            renderer: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &CollageConfig {
        &self.config
    }

    /// Returns a copy of the live document.
    pub fn snapshot(&self) -> Document {
        self.document.read().clone()
    }

    pub fn revision(&self) -> u64 {
        self.document.read().revision()
    }
}

/// editing
impl Collage {
    /// Places `text` centered at `(x, y)` in the current text color.
    ///
    /// Empty text is replaced by the configured fallback.
    pub fn add_item(&self, text: &str, x: i32, y: i32) -> Result<Item> {
        self.document
            .write()
            .add_item(text, x, y, &self.config.fallback_text)
    }

    /// Removes the most recently placed item.
    pub fn undo_last(&self) -> Result<Item> {
        self.document.write().undo_last().inspect_err(|_| {
            log::warn!("Undo called on an empty document.");
        })
    }

    /// Whether there is an item for [`Self::undo_last`] to remove.
    pub fn can_undo(&self) -> bool {
        self.document.read().can_undo()
    }

    pub fn clear(&self) {
        self.document.write().clear();
        log::debug!("document cleared");
    }

    pub fn set_background_color(&self, color: Rgb) {
        self.document.write().set_background_color(color);
    }

    pub fn set_current_text_color(&self, color: Rgb) {
        self.document.write().set_current_text_color(color);
    }

    pub fn background_color(&self) -> Rgb {
        self.document.read().background_color()
    }

    pub fn current_text_color(&self) -> Rgb {
        self.document.read().current_text_color()
    }

    /// Atomically installs a new item sequence and background.
    pub fn replace_all(&self, items: Vec<Item>, background_color: Rgb) {
        self.document.write().replace_all(items, background_color);
    }
}

/// save / load
impl Collage {
    /// Encodes the live document in the save format.
    pub fn save(&self) -> String {
        codec::encode(&self.document.read())
    }

    /// Replaces the live document with the decoded `text`.
    ///
    /// On error the live document is left untouched. The current text color
    /// is kept.
    pub fn load(&self, text: &str) -> Result<()> {
        let (items, background) = codec::decode_parts(text)?;
        log::debug!("loaded collage with {} items", items.len());
        self.replace_all(items, background);
        Ok(())
    }

    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let encoded = self.save();
        std::fs::write(path.as_ref(), encoded)?;
        log::debug!("saved collage to {}", path.as_ref().display());
        Ok(())
    }

    pub fn load_from_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        self.load(&text)
    }
}

/// random collage
impl Collage {
    fn generator(&self) -> RandomCollageGenerator {
        RandomCollageGenerator {
            canvas_size: self.config.canvas_size,
            item_count: self.config.random_item_count,
            word_selection: self.config.word_selection,
        }
    }

    /// Discards the live document and fills it with words sampled from
    /// `corpus`, using `rng` for every random choice.
    pub fn generate_random<R: Rng + ?Sized>(&self, corpus: &str, rng: &mut R) -> Result<()> {
        let (items, background) = self.generator().generate_parts(corpus, rng)?;
        self.replace_all(items, background);
        Ok(())
    }

    /// [`Self::generate_random`] with the corpus read from `path`.
    pub fn generate_from_path<R: Rng + ?Sized>(
        &self,
        path: impl AsRef<Path>,
        rng: &mut R,
    ) -> Result<()> {
        let corpus = std::fs::read_to_string(path)?;
        self.generate_random(&corpus, rng)
    }
}

/// font storage initialization
impl Collage {
    /// Loads the system fonts into the storage.
    pub fn load_system_fonts(&self) {
        self.font_storage.lock().load_system_fonts();
    }

    /// Loads a font from binary data.
    pub fn load_font_binary(&self, data: impl Into<Vec<u8>>) {
        self.font_storage.lock().load_font_binary(data);
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&self, path: PathBuf) -> Result<()> {
        Ok(self.font_storage.lock().load_font_file(path)?)
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&self, dir: PathBuf) {
        self.font_storage.lock().load_fonts_dir(dir)
    }
}

/// renderer
impl Collage {
    /// Resolves the label font and (re)creates the renderer.
    ///
    /// Returns `false` and leaves the renderer unset when no usable font is
    /// loaded.
    pub fn renderer_init(&self) -> bool {
        // drop the previous renderer and its cache first
        *self.renderer.lock() = None;

        let Some(style) = renderer::resolve_text_style(&mut self.font_storage.lock(), &self.config)
        else {
            log::warn!("No usable font loaded; renderer not initialized.");
            return false;
        };

        *self.renderer.lock() = Some(Box::new(CollageRenderer::new(
            style,
            self.config.glyph_cache_capacity,
        )));
        true
    }

    /// Clears the renderer's glyph cache.
    pub fn renderer_cache_clear(&self) {
        if let Some(renderer) = &mut *self.renderer.lock() {
            renderer.clear_cache();
        } else {
            log::warn!("Cache clear called before renderer initialized.");
        }
    }

    /// Draws the live document onto `surface`.
    ///
    /// Before [`Self::renderer_init`] succeeds only the background is painted.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let document = self.document.read();
        if let Some(renderer) = &mut *self.renderer.lock() {
            renderer.render(&document, surface, &mut self.font_storage.lock());
        } else {
            log::warn!("Render called before renderer initialized.");
            surface.fill(document.background_color());
        }
    }

    /// Renders the live document into an offscreen raster of `width` x
    /// `height` pixels, independent of the on-screen canvas size.
    pub fn export_raster(&self, width: usize, height: usize) -> Raster {
        let mut raster =
            Raster::new(width, height).with_default_foreground(self.config.default_foreground);
        self.render(&mut raster);
        raster
    }

    /// Renders the live document and writes it as a PNG file.
    #[cfg(feature = "image")]
    pub fn save_png(&self, path: impl AsRef<Path>, width: usize, height: usize) -> Result<()> {
        use crate::error::CollageError;

        let empty_canvas = || CollageError::EmptyCanvas {
            width: u32::try_from(width).unwrap_or(u32::MAX),
            height: u32::try_from(height).unwrap_or(u32::MAX),
        };
        if width == 0 || height == 0 {
            return Err(empty_canvas());
        }

        let image = self
            .export_raster(width, height)
            .to_rgb_image()
            .ok_or_else(empty_canvas)?;

        image
            .save_with_format(path.as_ref(), image::ImageFormat::Png)
            .map_err(|e| match e {
                image::ImageError::IoError(io) => CollageError::Io(io),
                other => CollageError::Io(std::io::Error::other(other)),
            })?;
        log::debug!("saved collage image to {}", path.as_ref().display());
        Ok(())
    }
}
