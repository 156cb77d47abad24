//! Closed set of shell actions and their dispatch

use rand::Rng;

use crate::{collage::Collage, color::Rgb, error::Result, item::Item, renderer::Raster};

/// An action the shell asks the core to perform.
///
/// Confirmation of destructive actions, file dialogs and color pickers stay
/// in the shell; commands carry already-chosen values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Place text centered at a canvas point
    AddItem { text: String, x: i32, y: i32 },
    /// Remove the most recently placed item
    Undo,
    /// Remove everything and restore the default background
    Clear,
    SetBackgroundColor(Rgb),
    SetTextColor(Rgb),
    /// Encode the document in the save format
    Save,
    /// Replace the document with decoded content
    Load(String),
    /// Replace the document with a random collage built from a corpus
    GenerateRandom { corpus: String },
    /// Render an offscreen image
    RenderImage { width: usize, height: usize },
}

/// Result of a successfully executed [`Command`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    ItemAdded(Item),
    ItemRemoved(Item),
    Cleared,
    ColorChanged,
    /// Encoded document content
    Saved(String),
    /// Number of items now in the document
    Replaced { items: usize },
    Rendered(Raster),
}

impl CommandOutcome {
    /// Whether the canvas needs repainting after this outcome.
    pub fn needs_repaint(&self) -> bool {
        !matches!(self, CommandOutcome::Saved(_) | CommandOutcome::Rendered(_))
    }
}

impl Collage {
    /// Executes `command`, drawing randomness from the thread-local RNG.
    pub fn execute(&self, command: Command) -> Result<CommandOutcome> {
        self.execute_with_rng(command, &mut rand::thread_rng())
    }

    /// Executes `command`, drawing randomness from `rng`.
    pub fn execute_with_rng<R: Rng + ?Sized>(
        &self,
        command: Command,
        rng: &mut R,
    ) -> Result<CommandOutcome> {
        let outcome = match command {
            Command::AddItem { text, x, y } => CommandOutcome::ItemAdded(self.add_item(&text, x, y)?),
            Command::Undo => CommandOutcome::ItemRemoved(self.undo_last()?),
            Command::Clear => {
                self.clear();
                CommandOutcome::Cleared
            }
            Command::SetBackgroundColor(color) => {
                self.set_background_color(color);
                CommandOutcome::ColorChanged
            }
            Command::SetTextColor(color) => {
                self.set_current_text_color(color);
                CommandOutcome::ColorChanged
            }
            Command::Save => CommandOutcome::Saved(self.save()),
            Command::Load(text) => {
                self.load(&text)?;
                CommandOutcome::Replaced {
                    items: self.document.read().len(),
                }
            }
            Command::GenerateRandom { corpus } => {
                self.generate_random(&corpus, rng)?;
                CommandOutcome::Replaced {
                    items: self.document.read().len(),
                }
            }
            Command::RenderImage { width, height } => {
                CommandOutcome::Rendered(self.export_raster(width, height))
            }
        };

        Ok(outcome)
    }
}
