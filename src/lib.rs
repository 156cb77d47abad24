//! # TextCollage
//!
//! Editor core for text collages: plain words placed at points on a colored canvas.
//!
//! ## Overview
//!
//! The core of the library is the [`Collage`], which owns the [`Document`], the loaded fonts
//! and the renderer. A shell (GUI, CLI, test harness) forwards user actions to it and paints
//! the result on its own [`Surface`] or exports an offscreen [`Raster`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use textcollage::{Collage, Rgb};
//!
//! // 1. Create a Collage and make fonts available
//! let collage = Collage::new();
//! collage.load_system_fonts();
//! collage.renderer_init();
//!
//! // 2. Edit
//! collage.set_current_text_color(Rgb::BLACK);
//! collage.add_item("Hello", 10, 20).unwrap();
//!
//! // 3. Save and render
//! let saved = collage.save();
//! let raster = collage.export_raster(640, 480);
//! # let _ = (saved, raster);
//! ```
//!
//! ## Features
//!
//! *   **Undo**: Items are removed in reverse placement order.
//! *   **Line-oriented save format**: See [`codec`].
//! *   **Random collages**: Words drawn from any text corpus, see [`generator`].
//! *   **Thread Safety**: Designed with internal locking for safe concurrent use.

pub mod codec;
pub mod collage;
pub mod color;
pub mod command;
pub mod config;
pub mod document;
pub mod error;
pub mod font_storage;
pub mod generator;
pub mod item;
pub mod renderer;
pub mod text;

// common re-exports
pub use collage::Collage;
pub use color::Rgb;
pub use command::{Command, CommandOutcome};
pub use config::{CollageConfig, FontFamily};
pub use document::Document;
pub use error::{CollageError, MalformedReason, Result};
pub use font_storage::FontStorage;
pub use generator::{RandomCollageGenerator, WordSelection};
pub use item::{CanvasPoint, CanvasSize, Item};
pub use renderer::{CollageRenderer, Raster, Surface};

// re-export dependencies
pub use fontdb;
pub use fontdue;
pub use parking_lot;

#[cfg(feature = "image")]
pub use image;
