use crate::{
    color::Rgb,
    error::{CollageError, Result},
    item::Item,
};

/// The editable state of one collage session.
///
/// Items are kept in insertion order, which is also draw order. The sequence
/// is only ever appended to, popped from the end by [`Self::undo_last`], or
/// swapped out wholesale by [`Self::clear`] and [`Self::replace_all`]. No
/// mutable handle into the sequence is handed out.
///
/// Equality compares the saved content only: items and background color.
/// The current text color, default background and `revision` are session
/// state and are ignored.
#[derive(Clone, Debug)]
pub struct Document {
    items: Vec<Item>,
    background_color: Rgb,
    current_text_color: Rgb,
    default_background: Rgb,
    revision: u64,
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items && self.background_color == other.background_color
    }
}

impl Eq for Document {}

impl Default for Document {
    fn default() -> Self {
        Self::new(Rgb::LIGHT_GRAY, Rgb::DARK_GRAY)
    }
}

impl Document {
    /// Creates an empty document.
    ///
    /// `default_background` is both the initial background and the color
    /// [`Self::clear`] resets to.
    pub fn new(default_background: Rgb, current_text_color: Rgb) -> Self {
        Self {
            items: Vec::new(),
            background_color: default_background,
            current_text_color,
            default_background,
            revision: 0,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn background_color(&self) -> Rgb {
        self.background_color
    }

    pub fn current_text_color(&self) -> Rgb {
        self.current_text_color
    }

    pub fn default_background(&self) -> Rgb {
        self.default_background
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether [`Self::undo_last`] would succeed.
    pub fn can_undo(&self) -> bool {
        !self.items.is_empty()
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Mutations.
impl Document {
    /// Places `text` centered at `(x, y)` in the current text color.
    ///
    /// The text is trimmed first; if nothing is left, `fallback` is placed
    /// instead. A line break in the text is rejected. Returns a copy of the
    /// placed item.
    pub fn add_item(&mut self, text: &str, x: i32, y: i32, fallback: &str) -> Result<Item> {
        let trimmed = text.trim();
        let text = if trimmed.is_empty() { fallback } else { trimmed };

        let item = Item::new(text, x, y, Some(self.current_text_color))?;
        self.items.push(item.clone());
        self.bump();

        Ok(item)
    }

    /// Removes and returns the most recently placed item.
    pub fn undo_last(&mut self) -> Result<Item> {
        let item = self.items.pop().ok_or(CollageError::EmptyDocument)?;
        self.bump();
        Ok(item)
    }

    /// Removes every item and restores the default background.
    ///
    /// The current text color is left alone.
    pub fn clear(&mut self) {
        self.items.clear();
        self.background_color = self.default_background;
        self.bump();
    }

    pub fn set_background_color(&mut self, color: Rgb) {
        self.background_color = color;
        self.bump();
    }

    pub fn set_current_text_color(&mut self, color: Rgb) {
        self.current_text_color = color;
        self.bump();
    }

    /// Swaps in a complete new item sequence and background in one step.
    pub fn replace_all(&mut self, items: Vec<Item>, background_color: Rgb) {
        self.items = items;
        self.background_color = background_color;
        self.bump();
    }
}
