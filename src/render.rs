//! Rendering boundary.
//!
//! The model never draws anything itself; it pushes changes through
//! [`GridView`]. [`GridProjection`] is the in-memory view state that the
//! desktop frontend paints from and that tests inspect.

use crate::cell::{Cell, CellType, clamp_text};

/// Narrow update contract between the grid model and whatever displays it.
///
/// Ids are row-major cell ids. Unknown ids are ignored by implementations.
pub trait GridView {
    /// Build the displayed grid from the model
    fn render_grid(&mut self, rows: usize, cols: usize, cells: &[Cell]);

    /// Current value of a cell's text field
    fn displayed_text(&self, id: usize) -> String;

    fn set_displayed_text(&mut self, id: usize, value: &str);

    fn set_hint_label_visible(&mut self, id: usize, visible: bool);

    fn set_hint_label_content(&mut self, id: usize, hint_num: Option<u32>);

    /// Visual marker for the cell type (solid, blank or editable)
    fn set_cell_type_marker(&mut self, id: usize, cell_type: CellType);

    /// Show or hide both children of a cell: hint label and text field
    fn set_cell_children_visible(&mut self, id: usize, visible: bool);

    fn set_mode_description(&mut self, text: &str);
}

/// What a single cell looks like on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellView {
    pub rendered_id: String,
    pub type_marker: CellType,
    pub children_visible: bool,
    pub hint_label_visible: bool,
    pub hint_label: String,
    pub field: String,
}

impl CellView {
    fn from_cell(cell: &Cell) -> Self {
        Self {
            rendered_id: cell.rendered_id(),
            type_marker: cell.cell_type,
            children_visible: cell.cell_type == CellType::Text,
            hint_label_visible: true,
            hint_label: hint_label(cell.hint_num),
            field: clamp_text(&cell.text),
        }
    }

    /// Whether the hint label is actually on screen
    pub fn shows_hint_label(&self) -> bool {
        self.children_visible && self.hint_label_visible && !self.hint_label.is_empty()
    }
}

/// In-memory projection of the grid.
#[derive(Clone, Debug, Default)]
pub struct GridProjection {
    rows: usize,
    cols: usize,
    cells: Vec<CellView>,
    mode_description: String,
}

impl GridProjection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[CellView] {
        &self.cells
    }

    pub fn cell(&self, id: usize) -> Option<&CellView> {
        self.cells.get(id)
    }

    pub fn mode_description(&self) -> &str {
        &self.mode_description
    }
}

impl GridView for GridProjection {
    fn render_grid(&mut self, rows: usize, cols: usize, cells: &[Cell]) {
        self.rows = rows;
        self.cols = cols;
        self.cells = cells.iter().map(CellView::from_cell).collect();
    }

    fn displayed_text(&self, id: usize) -> String {
        self.cells
            .get(id)
            .map(|cell| cell.field.clone())
            .unwrap_or_default()
    }

    fn set_displayed_text(&mut self, id: usize, value: &str) {
        if let Some(cell) = self.cells.get_mut(id) {
            cell.field = clamp_text(value);
        }
    }

    fn set_hint_label_visible(&mut self, id: usize, visible: bool) {
        if let Some(cell) = self.cells.get_mut(id) {
            cell.hint_label_visible = visible;
        }
    }

    fn set_hint_label_content(&mut self, id: usize, hint_num: Option<u32>) {
        if let Some(cell) = self.cells.get_mut(id) {
            cell.hint_label = hint_label(hint_num);
        }
    }

    fn set_cell_type_marker(&mut self, id: usize, cell_type: CellType) {
        if let Some(cell) = self.cells.get_mut(id) {
            cell.type_marker = cell_type;
        }
    }

    fn set_cell_children_visible(&mut self, id: usize, visible: bool) {
        if let Some(cell) = self.cells.get_mut(id) {
            cell.children_visible = visible;
        }
    }

    fn set_mode_description(&mut self, text: &str) {
        self.mode_description = text.to_string();
    }
}

fn hint_label(hint_num: Option<u32>) -> String {
    hint_num.map(|n| n.to_string()).unwrap_or_default()
}
