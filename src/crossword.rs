//! Grid model and the edit-mode state machine.

use tracing::{debug, warn};

use crate::cell::{Cell, CellType, clamp_text};
use crate::error::CrosswordError;
use crate::render::GridView;
use crate::state::{CellPosition, MAX_GRID_DIM, Mode};

/// Outcome of a mode request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeChange {
    Unchanged,
    Switched { from: Mode, to: Mode },
}

/// A crossword grid along with its current edit mode.
///
/// The grid size is fixed at construction. The mode only changes through
/// [`Crossword::set_mode`].
#[derive(Clone, Debug)]
pub struct Crossword {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    mode: Mode,
}

impl Crossword {
    pub fn new(rows: usize, cols: usize) -> Result<Self, CrosswordError> {
        let in_range = |n: usize| (1..=MAX_GRID_DIM).contains(&n);
        let count = rows
            .checked_mul(cols)
            .filter(|_| in_range(rows) && in_range(cols))
            .ok_or(CrosswordError::InvalidDimensions { rows, cols })?;
        let cells = (0..count).map(Cell::new).collect();
        Ok(Self {
            rows,
            cols,
            cells,
            mode: Mode::Char,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, id: usize) -> Option<&Cell> {
        self.cells.get(id)
    }

    pub fn cell_at(&self, pos: CellPosition) -> Option<&Cell> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        self.cells.get(pos.to_id(self.cols))
    }

    /// Draw the whole grid and the description of the current mode
    pub fn render_into<V: GridView>(&self, view: &mut V) {
        view.render_grid(self.rows, self.cols, &self.cells);
        view.set_mode_description(self.mode.description());
    }

    /// Switch the edit mode, migrating field contents between the model and
    /// the view.
    ///
    /// Everything the outgoing mode displayed is captured before `mode` is
    /// updated.
    pub fn set_mode<V: GridView>(&mut self, new_mode: Mode, view: &mut V) -> ModeChange {
        if new_mode == self.mode {
            return ModeChange::Unchanged;
        }

        if self.mode == Mode::Hint {
            self.leave_hint_mode(view);
        }
        if new_mode == Mode::Hint {
            self.enter_hint_mode(view);
        }

        let from = std::mem::replace(&mut self.mode, new_mode);
        view.set_mode_description(new_mode.description());
        debug!("mode changed: {} -> {}", from, new_mode);
        ModeChange::Switched { from, to: new_mode }
    }

    /// [`Crossword::set_mode`] for a mode given by name
    pub fn set_mode_named<V: GridView>(
        &mut self,
        name: &str,
        view: &mut V,
    ) -> Result<ModeChange, CrosswordError> {
        let mode = name.parse::<Mode>()?;
        Ok(self.set_mode(mode, view))
    }

    /// Advance a cell through `Filled -> Empty -> Text -> Filled`.
    ///
    /// Only valid in type mode; elsewhere nothing changes.
    pub fn set_cell_type<V: GridView>(
        &mut self,
        id: usize,
        view: &mut V,
    ) -> Result<CellType, CrosswordError> {
        if self.mode != Mode::Type {
            return Err(CrosswordError::InapplicableOperation { mode: self.mode });
        }
        let cell = self
            .cells
            .get_mut(id)
            .ok_or(CrosswordError::UnknownCell(id))?;

        let previous = cell.cell_type;
        let next = previous.next();
        cell.cell_type = next;

        view.set_cell_type_marker(id, next);
        if previous == CellType::Text || next == CellType::Text {
            view.set_cell_children_visible(id, next == CellType::Text);
        }
        debug!("cell {} type changed to: {}", id, next.name());
        Ok(next)
    }

    fn enter_hint_mode<V: GridView>(&mut self, view: &mut V) {
        for cell in &mut self.cells {
            view.set_hint_label_visible(cell.id, false);
            cell.text = clamp_text(&view.displayed_text(cell.id));
            let hint = cell.hint_num.map(|n| n.to_string()).unwrap_or_default();
            view.set_displayed_text(cell.id, &hint);
        }
    }

    fn leave_hint_mode<V: GridView>(&mut self, view: &mut V) {
        for cell in &mut self.cells {
            let edited = view.displayed_text(cell.id);
            cell.hint_num = parse_hint(cell.id, &edited);
            view.set_hint_label_content(cell.id, cell.hint_num);
            view.set_displayed_text(cell.id, &cell.text);
            view.set_hint_label_visible(cell.id, true);
        }
    }
}

/// Read a hint number typed into a cell field. Blank clears the hint.
fn parse_hint(id: usize, input: &str) -> Option<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!("discarding non-numeric hint {:?} for cell {}", trimmed, id);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::GridProjection;
    use crate::state::{GRID_COLS, GRID_ROWS};

    fn setup() -> (Crossword, GridProjection) {
        let crossword = Crossword::new(GRID_ROWS, GRID_COLS).unwrap();
        let mut view = GridProjection::new();
        crossword.render_into(&mut view);
        (crossword, view)
    }

    #[test]
    fn test_initial_state() {
        let (crossword, view) = setup();
        assert_eq!(crossword.cells().len(), 42);
        assert_eq!(crossword.mode(), Mode::Char);
        let first = crossword.cell(0).unwrap();
        assert_eq!(first.cell_type, CellType::Text);
        assert_eq!(first.hint_num, None);
        assert_eq!(view.cells().len(), 42);
        assert_eq!(view.mode_description(), Mode::Char.description());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Crossword::new(0, 4).unwrap_err(),
            CrosswordError::InvalidDimensions { rows: 0, cols: 4 }
        );
        assert!(Crossword::new(3, 0).is_err());
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        assert_eq!(
            Crossword::new(usize::MAX, 2).unwrap_err(),
            CrosswordError::InvalidDimensions { rows: usize::MAX, cols: 2 }
        );
        assert!(Crossword::new(MAX_GRID_DIM + 1, 1).is_err());
        assert!(Crossword::new(1, MAX_GRID_DIM + 1).is_err());

        let largest = Crossword::new(MAX_GRID_DIM, MAX_GRID_DIM).unwrap();
        assert_eq!(largest.cells().len(), MAX_GRID_DIM * MAX_GRID_DIM);
    }

    #[test]
    fn test_cell_at() {
        let (crossword, _) = setup();
        assert_eq!(crossword.cell_at(CellPosition::new(1, 2)).unwrap().id, 8);
        assert!(crossword.cell_at(CellPosition::new(0, GRID_COLS)).is_none());
        assert!(crossword.cell_at(CellPosition::new(GRID_ROWS, 0)).is_none());
    }

    #[test]
    fn test_same_mode_is_noop() {
        let (mut crossword, mut view) = setup();
        view.set_displayed_text(2, "Q");
        view.set_mode_description("custom");
        assert_eq!(crossword.set_mode(Mode::Char, &mut view), ModeChange::Unchanged);
        assert_eq!(view.mode_description(), "custom");
        assert_eq!(view.displayed_text(2), "Q");
        assert_eq!(crossword.cell(2).unwrap().text, "");
    }

    #[test]
    fn test_hint_round_trip_preserves_text() {
        let (mut crossword, mut view) = setup();
        view.set_displayed_text(0, "CAT");

        crossword.set_mode(Mode::Hint, &mut view);
        assert_eq!(crossword.cell(0).unwrap().text, "CAT");
        assert_eq!(view.displayed_text(0), "");
        assert!(!view.cell(0).unwrap().hint_label_visible);

        crossword.set_mode(Mode::Char, &mut view);
        assert_eq!(view.displayed_text(0), "CAT");
        assert!(view.cell(0).unwrap().hint_label_visible);
    }

    #[test]
    fn test_hint_entry_updates_label() {
        let (mut crossword, mut view) = setup();
        crossword.set_mode(Mode::Hint, &mut view);
        view.set_displayed_text(5, "5");
        let change = crossword.set_mode(Mode::Type, &mut view);

        assert_eq!(change, ModeChange::Switched { from: Mode::Hint, to: Mode::Type });
        assert_eq!(crossword.cell(5).unwrap().hint_num, Some(5));
        assert_eq!(view.cell(5).unwrap().hint_label, "5");
        assert!(view.cell(5).unwrap().shows_hint_label());
        assert_eq!(view.mode_description(), Mode::Type.description());
    }

    #[test]
    fn test_existing_hint_shown_when_entering_hint_mode() {
        let (mut crossword, mut view) = setup();
        crossword.set_mode(Mode::Hint, &mut view);
        view.set_displayed_text(1, "12");
        crossword.set_mode(Mode::Char, &mut view);
        crossword.set_mode(Mode::Hint, &mut view);
        assert_eq!(view.displayed_text(1), "12");
    }

    #[test]
    fn test_non_numeric_hint_cleared() {
        let (mut crossword, mut view) = setup();
        crossword.set_mode(Mode::Hint, &mut view);
        view.set_displayed_text(3, "x");
        view.set_displayed_text(4, " 7 ");
        crossword.set_mode(Mode::Char, &mut view);
        assert_eq!(crossword.cell(3).unwrap().hint_num, None);
        assert_eq!(view.cell(3).unwrap().hint_label, "");
        assert_eq!(crossword.cell(4).unwrap().hint_num, Some(7));
    }

    #[test]
    fn test_type_char_switch_migrates_nothing() {
        let (mut crossword, mut view) = setup();
        view.set_displayed_text(0, "AB");
        crossword.set_mode(Mode::Type, &mut view);
        crossword.set_mode(Mode::Char, &mut view);
        assert_eq!(view.displayed_text(0), "AB");
        assert_eq!(crossword.cell(0).unwrap().text, "");
    }

    #[test]
    fn test_set_mode_named() {
        let (mut crossword, mut view) = setup();
        assert_eq!(
            crossword.set_mode_named("type", &mut view),
            Ok(ModeChange::Switched { from: Mode::Char, to: Mode::Type })
        );
        view.set_displayed_text(3, "EGG");
        let cells_before = crossword.cells().to_vec();
        let view_before = view.cells().to_vec();

        assert_eq!(
            crossword.set_mode_named("erase", &mut view),
            Err(CrosswordError::InvalidModeRequest("erase".to_string()))
        );
        assert_eq!(crossword.cells(), &cells_before[..]);
        assert_eq!(view.cells(), &view_before[..]);
        assert_eq!(crossword.mode(), Mode::Type);
        assert_eq!(view.mode_description(), Mode::Type.description());
    }

    #[test]
    fn test_set_cell_type_outside_type_mode() {
        let (mut crossword, mut view) = setup();
        for mode in [Mode::Char, Mode::Hint] {
            crossword.set_mode(mode, &mut view);
            let before = view.cell(0).unwrap().clone();
            assert_eq!(
                crossword.set_cell_type(0, &mut view),
                Err(CrosswordError::InapplicableOperation { mode })
            );
            assert_eq!(crossword.cell(0).unwrap().cell_type, CellType::Text);
            assert_eq!(view.cell(0).unwrap(), &before);
        }
    }

    #[test]
    fn test_set_cell_type_cycle() {
        let (mut crossword, mut view) = setup();
        crossword.set_mode(Mode::Type, &mut view);

        assert_eq!(crossword.set_cell_type(7, &mut view), Ok(CellType::Filled));
        assert!(!view.cell(7).unwrap().children_visible);
        assert_eq!(crossword.set_cell_type(7, &mut view), Ok(CellType::Empty));
        assert!(!view.cell(7).unwrap().children_visible);
        assert_eq!(view.cell(7).unwrap().type_marker, CellType::Empty);
        assert_eq!(crossword.set_cell_type(7, &mut view), Ok(CellType::Text));
        assert!(view.cell(7).unwrap().children_visible);
        assert_eq!(crossword.cell(7).unwrap().cell_type, CellType::Text);
    }

    #[test]
    fn test_set_cell_type_unknown_cell() {
        let (mut crossword, mut view) = setup();
        crossword.set_mode(Mode::Type, &mut view);
        assert_eq!(
            crossword.set_cell_type(42, &mut view),
            Err(CrosswordError::UnknownCell(42))
        );
    }

    #[test]
    fn test_type_change_keeps_text_and_hint() {
        let (mut crossword, mut view) = setup();
        crossword.set_mode(Mode::Hint, &mut view);
        view.set_displayed_text(0, "1");
        crossword.set_mode(Mode::Char, &mut view);
        view.set_displayed_text(0, "DOG");
        crossword.set_mode(Mode::Hint, &mut view);
        crossword.set_mode(Mode::Type, &mut view);

        crossword.set_cell_type(0, &mut view).unwrap();
        crossword.set_cell_type(0, &mut view).unwrap();
        crossword.set_cell_type(0, &mut view).unwrap();

        let cell = crossword.cell(0).unwrap();
        assert_eq!(cell.cell_type, CellType::Text);
        assert_eq!(cell.text, "DOG");
        assert_eq!(cell.hint_num, Some(1));
        assert_eq!(view.displayed_text(0), "DOG");
    }
}
