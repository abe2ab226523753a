//! The editing session: one grid, one view, and the table mapping user
//! events onto grid operations.

use tracing::{debug, error};

use crate::cell::Cell;
use crate::config::Settings;
use crate::crossword::{Crossword, ModeChange};
use crate::error::CrosswordError;
use crate::render::GridView;
use crate::state::Mode;

/// Inbound user events, addressed by rendered ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    /// A cell was clicked (`cell-<id>`)
    CellActivated(String),
    /// A mode button was clicked (`button-edit-<mode>` or a bare mode name)
    ModeButtonActivated(String),
}

pub struct Session<V: GridView> {
    crossword: Crossword,
    view: V,
}

impl<V: GridView> Session<V> {
    /// Build the grid described by `settings` and render it into `view`
    pub fn new(settings: &Settings, view: V) -> Result<Self, CrosswordError> {
        let crossword = Crossword::new(settings.rows, settings.cols)?;
        Ok(Self::with_crossword(crossword, view))
    }

    pub fn with_crossword(crossword: Crossword, mut view: V) -> Self {
        crossword.render_into(&mut view);
        Self { crossword, view }
    }

    pub fn crossword(&self) -> &Crossword {
        &self.crossword
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Direct access for edits that happen inside the view itself
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn mode(&self) -> Mode {
        self.crossword.mode()
    }

    pub fn set_mode(&mut self, mode: Mode) -> ModeChange {
        self.crossword.set_mode(mode, &mut self.view)
    }

    /// Handle one event. Returns whether anything changed.
    ///
    /// Clicks that do not apply in the current mode and requests for the
    /// active mode report `false`. Unknown modes and malformed ids are errors.
    pub fn dispatch(&mut self, event: UiEvent) -> Result<bool, CrosswordError> {
        debug!("dispatch {:?} in {} mode", event, self.crossword.mode());
        match event {
            UiEvent::CellActivated(rendered_id) => self.activate_cell(&rendered_id),
            UiEvent::ModeButtonActivated(button_id) => {
                let mode = Mode::from_button_id(&button_id)?;
                Ok(self.set_mode(mode) != ModeChange::Unchanged)
            }
        }
    }

    fn activate_cell(&mut self, rendered_id: &str) -> Result<bool, CrosswordError> {
        if self.crossword.mode() != Mode::Type {
            return Ok(false);
        }
        let id = Cell::parse_id(rendered_id).inspect_err(|e| error!("{}", e))?;
        match self.crossword.set_cell_type(id, &mut self.view) {
            Ok(_) => Ok(true),
            Err(CrosswordError::InapplicableOperation { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
