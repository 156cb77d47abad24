use euclid::{Point2D, Size2D};

use crate::{
    color::Rgb,
    error::{CollageError, Result},
};

/// Unit tag for canvas coordinates. **Y-axis goes down.**
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CanvasSpace;

pub type CanvasPoint = Point2D<i32, CanvasSpace>;
pub type CanvasSize = Size2D<u32, CanvasSpace>;

/// One placed text label.
///
/// The text is always a single non-empty line so that it survives the
/// line-oriented save format. Items are never edited in place; a changed
/// label is a new `Item`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    text: String,
    anchor: CanvasPoint,
    color: Option<Rgb>,
}

impl Item {
    /// Creates an item centered at `(x, y)`.
    ///
    /// Fails with [`CollageError::InvalidText`] when `text` is blank or
    /// contains a line break.
    pub fn new(text: impl Into<String>, x: i32, y: i32, color: Option<Rgb>) -> Result<Self> {
        let text = text.into();
        if !is_valid_text(&text) {
            return Err(CollageError::InvalidText(text));
        }

        Ok(Self {
            text,
            anchor: CanvasPoint::new(x, y),
            color,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn x(&self) -> i32 {
        self.anchor.x
    }

    pub fn y(&self) -> i32 {
        self.anchor.y
    }

    /// The point the text is centered on.
    pub fn anchor(&self) -> CanvasPoint {
        self.anchor
    }

    /// The stored color; `None` means the surface's default foreground.
    pub fn color(&self) -> Option<Rgb> {
        self.color
    }

    pub fn resolved_color(&self, default_foreground: Rgb) -> Rgb {
        self.color.unwrap_or(default_foreground)
    }
}

fn is_valid_text(text: &str) -> bool {
    !text.trim().is_empty() && !text.contains(['\n', '\r'])
}
