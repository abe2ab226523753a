use gpui::prelude::FluentBuilder;
use gpui::*;

use crossgrid::render::{CellView, GridProjection, GridView};
use crossgrid::state::CellPosition;
use crossgrid::{CellType, Mode, Session, UiEvent};

use crate::Theme;
use crate::cell_input::CellInput;

pub const HEADER_HEIGHT: f32 = 72.0;
pub const FOOTER_HEIGHT: f32 = 24.0;
pub const GRID_PADDING: f32 = 24.0;
pub const HINT_LABEL_SIZE: f32 = 10.0;

// Mode switching, from keys, menu and buttons
actions!(mode_switch, [CharMode, TypeMode, HintMode]);

// Keyboard selection while no field is open
actions!(
    selection,
    [SelectUp, SelectDown, SelectLeft, SelectRight, ActivateSelected]
);

// Actions while a cell field is open
actions!(cell_edit, [CommitEdit]);

// Global actions
actions!(crossword, [Quit]);

/// The main window component
pub struct CrosswordApp {
    grid: Entity<CrosswordGrid>,
}

impl CrosswordApp {
    pub fn new(session: Session<GridProjection>, cell_size: f32, cx: &mut Context<Self>) -> Self {
        let grid = cx.new(|cx| CrosswordGrid::new(session, cell_size, cx));
        Self { grid }
    }
}

impl Render for CrosswordApp {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.global::<Theme>();

        div()
            .flex()
            .flex_col()
            .size_full()
            .bg(theme.base)
            .text_color(theme.text)
            .child(self.grid.clone())
    }
}

/// The crossword grid component.
///
/// Owns the editing session; every click and key is turned into a
/// [`UiEvent`] or a direct field edit on the projection.
pub struct CrosswordGrid {
    focus_handle: FocusHandle,
    active_input: Entity<CellInput>,
    session: Session<GridProjection>,
    selected: Option<usize>,
    editing: Option<usize>,
    cell_size: f32,
}

impl CrosswordGrid {
    pub fn new(session: Session<GridProjection>, cell_size: f32, cx: &mut Context<Self>) -> Self {
        let focus_handle = cx.focus_handle();
        let active_input = cx.new(|cx| CellInput::new(cx));

        Self {
            focus_handle,
            active_input,
            session,
            selected: None,
            editing: None,
            cell_size,
        }
    }

    fn char_mode(&mut self, _: &CharMode, window: &mut Window, cx: &mut Context<Self>) {
        self.switch_mode(Mode::Char, window, cx);
    }

    fn type_mode(&mut self, _: &TypeMode, window: &mut Window, cx: &mut Context<Self>) {
        self.switch_mode(Mode::Type, window, cx);
    }

    fn hint_mode(&mut self, _: &HintMode, window: &mut Window, cx: &mut Context<Self>) {
        self.switch_mode(Mode::Hint, window, cx);
    }

    fn switch_mode(&mut self, mode: Mode, window: &mut Window, cx: &mut Context<Self>) {
        // The open field belongs to the outgoing mode
        self.commit_edit(window, cx);

        match self
            .session
            .dispatch(UiEvent::ModeButtonActivated(mode.button_id()))
        {
            Ok(true) => tracing::info!("Switched to {} mode", mode),
            Ok(false) => {}
            Err(e) => tracing::warn!("Mode switch rejected: {}", e),
        }
        cx.notify();
    }

    fn on_cell_click(&mut self, id: usize, window: &mut Window, cx: &mut Context<Self>) {
        if self.editing == Some(id) {
            return;
        }
        self.commit_edit(window, cx);
        self.selected = Some(id);

        if self.session.mode() == Mode::Type {
            let Some(rendered_id) = self.session.view().cell(id).map(|c| c.rendered_id.clone())
            else {
                return;
            };
            if let Err(e) = self.session.dispatch(UiEvent::CellActivated(rendered_id)) {
                tracing::error!("Cell click could not be handled: {}", e);
            }
        } else if self
            .session
            .view()
            .cell(id)
            .is_some_and(|cell| cell.children_visible)
        {
            self.begin_edit(id, window, cx);
        }
        cx.notify();
    }

    fn move_selection(&mut self, d_row: isize, d_col: isize, cx: &mut Context<Self>) {
        let crossword = self.session.crossword();
        let current = CellPosition::from_id(self.selected.unwrap_or(0), crossword.cols());
        let target = CellPosition::new(
            current.row.saturating_add_signed(d_row),
            current.col.saturating_add_signed(d_col),
        );
        if let Some(cell) = crossword.cell_at(target) {
            self.selected = Some(cell.id);
            cx.notify();
        }
    }

    fn select_up(&mut self, _: &SelectUp, _: &mut Window, cx: &mut Context<Self>) {
        self.move_selection(-1, 0, cx);
    }

    fn select_down(&mut self, _: &SelectDown, _: &mut Window, cx: &mut Context<Self>) {
        self.move_selection(1, 0, cx);
    }

    fn select_left(&mut self, _: &SelectLeft, _: &mut Window, cx: &mut Context<Self>) {
        self.move_selection(0, -1, cx);
    }

    fn select_right(&mut self, _: &SelectRight, _: &mut Window, cx: &mut Context<Self>) {
        self.move_selection(0, 1, cx);
    }

    /// Enter acts like a click on the selected cell
    fn activate_selected(
        &mut self,
        _: &ActivateSelected,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if let Some(id) = self.selected {
            self.on_cell_click(id, window, cx);
        }
    }

    fn begin_edit(&mut self, id: usize, window: &mut Window, cx: &mut Context<Self>) {
        let content = self.session.view().displayed_text(id);
        self.active_input.update(cx, |input, cx| {
            input.set_content(&content, cx);
        });
        self.editing = Some(id);

        let focus_handle = self.active_input.focus_handle(cx);
        focus_handle.focus(window, cx);
    }

    fn commit_edit(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let Some(id) = self.editing.take() else {
            return;
        };
        let content = self.active_input.read(cx).get_content();
        self.session.view_mut().set_displayed_text(id, &content);

        self.focus_handle.focus(window, cx);
        cx.notify();
    }

    fn on_commit_edit(&mut self, _: &CommitEdit, window: &mut Window, cx: &mut Context<Self>) {
        self.commit_edit(window, cx);
    }

    fn render_header(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.global::<Theme>();
        let active = self.session.mode();

        div()
            .flex()
            .flex_col()
            .w_full()
            .h(px(HEADER_HEIGHT))
            .bg(theme.mantle)
            .border_b_1()
            .border_color(theme.surface0)
            .px(px(12.))
            .py(px(8.))
            .gap(px(6.))
            .child(
                div()
                    .flex()
                    .flex_row()
                    .gap(px(8.))
                    .children(Mode::ALL.into_iter().map(|mode| {
                        let is_active = mode == active;
                        let label = match mode {
                            Mode::Char => "Letters",
                            Mode::Type => "Cell Types",
                            Mode::Hint => "Hint Numbers",
                        };

                        div()
                            .id(ElementId::Name(mode.button_id().into()))
                            .px(px(10.))
                            .py(px(2.))
                            .rounded(px(4.))
                            .text_size(px(13.))
                            .cursor_pointer()
                            .bg(if is_active { theme.accent } else { theme.surface0 })
                            .text_color(if is_active { theme.base } else { theme.text })
                            .when(is_active, |d| d.font_weight(FontWeight::BOLD))
                            .on_mouse_down(MouseButton::Left, {
                                let entity = cx.entity().clone();
                                move |_, window, app| {
                                    entity.update(app, |this, cx| {
                                        this.switch_mode(mode, window, cx);
                                    });
                                }
                            })
                            .child(label)
                    })),
            )
            .child(
                div()
                    .text_size(px(12.))
                    .text_color(theme.subtext0)
                    .child(self.session.view().mode_description().to_string()),
            )
    }

    fn render_grid(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.global::<Theme>();
        let entity = cx.entity();
        let view = self.session.view();
        let cols = view.cols().max(1);

        div()
            .flex()
            .flex_col()
            .flex_1()
            .items_center()
            .justify_center()
            .p(px(GRID_PADDING))
            .children(view.cells().chunks(cols).enumerate().map(|(row, cells)| {
                div()
                    .flex()
                    .flex_row()
                    .children(cells.iter().enumerate().map(|(col, cell)| {
                        let id = CellPosition::new(row, col).to_id(cols);
                        self.render_cell(id, cell, theme, &entity)
                    }))
            }))
    }

    fn render_cell(
        &self,
        id: usize,
        cell: &CellView,
        theme: &Theme,
        entity: &Entity<Self>,
    ) -> AnyElement {
        let size = px(self.cell_size);
        let is_selected = self.selected == Some(id);
        let is_editing = self.editing == Some(id);

        let background = match cell.type_marker {
            CellType::Filled => theme.block,
            CellType::Empty => theme.base,
            CellType::Text => theme.paper,
        };

        div()
            .id(ElementId::Name(cell.rendered_id.clone().into()))
            .relative()
            .w(size)
            .h(size)
            .flex_none()
            .flex()
            .items_center()
            .justify_center()
            .bg(background)
            .border_1()
            .border_color(if is_selected { theme.accent } else { theme.surface1 })
            .when(is_selected, |d| d.border_2())
            .overflow_hidden()
            .on_mouse_down(MouseButton::Left, {
                let entity = entity.clone();
                move |_, window, app| {
                    entity.update(app, |this, cx| {
                        this.on_cell_click(id, window, cx);
                    });
                }
            })
            .when(cell.shows_hint_label(), |d| {
                d.child(
                    div()
                        .absolute()
                        .top(px(1.))
                        .left(px(3.))
                        .text_size(px(HINT_LABEL_SIZE))
                        .text_color(theme.ink)
                        .child(cell.hint_label.clone()),
                )
            })
            .when(cell.children_visible && is_editing, |d| {
                d.child(self.active_input.clone())
            })
            .when(cell.children_visible && !is_editing, |d| {
                d.child(
                    div()
                        .text_size(px(self.cell_size * 0.4))
                        .text_color(theme.ink)
                        .font_weight(FontWeight::BOLD)
                        .child(cell.field.clone()),
                )
            })
            .into_any_element()
    }

    fn render_footer(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.global::<Theme>();
        let mode_text = match self.session.mode() {
            Mode::Char => "-- LETTERS --",
            Mode::Type => "-- CELL TYPES --",
            Mode::Hint => "-- HINT NUMBERS --",
        };
        let crossword = self.session.crossword();
        let selected = self
            .selected
            .map(|id| CellPosition::from_id(id, crossword.cols()))
            .and_then(|pos| {
                crossword.cell_at(pos).map(|cell| {
                    format!("R{} C{}  {}", pos.row + 1, pos.col + 1, cell.cell_type.name())
                })
            })
            .unwrap_or_default();

        div()
            .flex()
            .flex_row()
            .w_full()
            .h(px(FOOTER_HEIGHT))
            .bg(theme.mantle)
            .border_t_1()
            .border_color(theme.surface0)
            .items_center()
            .justify_between()
            .px(px(8.))
            .text_size(px(12.))
            .text_color(theme.subtext0)
            .child(div().font_weight(FontWeight::BOLD).child(mode_text))
            .child(selected)
    }
}

impl Render for CrosswordGrid {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let key_context = if self.editing.is_some() {
            "EditingCell"
        } else {
            "CrosswordGrid"
        };

        div()
            .flex()
            .flex_col()
            .size_full()
            .key_context(key_context)
            .track_focus(&self.focus_handle)
            .on_action(cx.listener(Self::char_mode))
            .on_action(cx.listener(Self::type_mode))
            .on_action(cx.listener(Self::hint_mode))
            .on_action(cx.listener(Self::select_up))
            .on_action(cx.listener(Self::select_down))
            .on_action(cx.listener(Self::select_left))
            .on_action(cx.listener(Self::select_right))
            .on_action(cx.listener(Self::activate_selected))
            .on_action(cx.listener(Self::on_commit_edit))
            .child(self.render_header(cx))
            .child(self.render_grid(cx))
            .child(self.render_footer(cx))
    }
}

impl Focusable for CrosswordGrid {
    fn focus_handle(&self, _: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}
