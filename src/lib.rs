//! Crossword grid editor.
//!
//! A grid of cells edited in one of three modes: letters, cell types or hint
//! numbers. [`Crossword`] holds the model and the mode state machine and
//! pushes every change through a [`GridView`]; [`Session`] pairs the two and
//! turns user events into grid operations.

pub mod cell;
pub mod config;
pub mod crossword;
pub mod error;
pub mod render;
pub mod session;
pub mod state;

pub use cell::{Cell, CellType};
pub use config::Settings;
pub use crossword::{Crossword, ModeChange};
pub use error::CrosswordError;
pub use render::{GridProjection, GridView};
pub use session::{Session, UiEvent};
pub use state::Mode;
