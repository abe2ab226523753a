// Text field shown inside the cell being edited.
// Holds letters in char mode and the hint number in hint mode, never more
// than TEXT_MAX_LEN graphemes.

use std::ops::Range;

use gpui::*;
use unicode_segmentation::*;

use crossgrid::cell::{TEXT_MAX_LEN, clamp_text};

use crate::Theme;

actions!(cell_input, [Backspace, Left, Right, Paste]);

pub struct CellInput {
    focus_handle: FocusHandle,
    content: SharedString,
    selected_range: Range<usize>,
    selection_reversed: bool,
    marked_range: Option<Range<usize>>,
    last_layout: Option<ShapedLine>,
    last_bounds: Option<Bounds<Pixels>>,
}

impl CellInput {
    pub fn new(cx: &mut Context<Self>) -> Self {
        Self {
            focus_handle: cx.focus_handle(),
            content: "".into(),
            selected_range: 0..0,
            selection_reversed: false,
            marked_range: None,
            last_layout: None,
            last_bounds: None,
        }
    }

    /// Load a cell's field, selecting all of it so typing replaces it
    pub fn set_content(&mut self, text: &str, cx: &mut Context<Self>) {
        let text = clamp_text(text);
        let len = text.len();
        self.content = text.into();
        self.selected_range = 0..len;
        self.selection_reversed = false;
        self.marked_range = None;
        cx.notify();
    }

    pub fn get_content(&self) -> String {
        self.content.to_string()
    }

    fn grapheme_count(&self) -> usize {
        self.content.graphemes(true).count()
    }

    fn left(&mut self, _: &Left, _: &mut Window, cx: &mut Context<Self>) {
        if self.selected_range.is_empty() {
            self.move_to(self.previous_boundary(self.cursor_offset()), cx);
        } else {
            self.move_to(self.selected_range.start, cx)
        }
    }

    fn right(&mut self, _: &Right, _: &mut Window, cx: &mut Context<Self>) {
        if self.selected_range.is_empty() {
            self.move_to(self.next_boundary(self.selected_range.end), cx);
        } else {
            self.move_to(self.selected_range.end, cx)
        }
    }

    fn backspace(&mut self, _: &Backspace, window: &mut Window, cx: &mut Context<Self>) {
        if self.selected_range.is_empty() {
            let start = self.previous_boundary(self.cursor_offset());
            self.selected_range = start..self.selected_range.end;
        }
        self.replace_text_in_range(None, "", window, cx)
    }

    fn paste(&mut self, _: &Paste, window: &mut Window, cx: &mut Context<Self>) {
        if let Some(text) = cx.read_from_clipboard().and_then(|item| item.text()) {
            // Fields are single-line
            let line = text.lines().next().unwrap_or_default().to_string();
            self.replace_text_in_range(None, &line, window, cx);
        }
    }

    fn move_to(&mut self, offset: usize, cx: &mut Context<Self>) {
        self.selected_range = offset..offset;
        self.selection_reversed = false;
        cx.notify()
    }

    fn cursor_offset(&self) -> usize {
        if self.selection_reversed {
            self.selected_range.start
        } else {
            self.selected_range.end
        }
    }

    fn previous_boundary(&self, offset: usize) -> usize {
        self.content
            .grapheme_indices(true)
            .rev()
            .find_map(|(idx, _)| (idx < offset).then_some(idx))
            .unwrap_or(0)
    }

    fn next_boundary(&self, offset: usize) -> usize {
        self.content
            .grapheme_indices(true)
            .find_map(|(idx, _)| (idx > offset).then_some(idx))
            .unwrap_or(self.content.len())
    }

    /// Splice `new_text` over `range`, dropping whatever would push the field
    /// past TEXT_MAX_LEN. Returns the byte range the inserted text ended up in.
    fn splice(&mut self, range: Range<usize>, new_text: &str) -> Range<usize> {
        let removed = self.content[range.clone()].graphemes(true).count();
        let kept = self.grapheme_count().saturating_sub(removed);
        let room = TEXT_MAX_LEN.saturating_sub(kept);
        let inserted: String = new_text.graphemes(true).take(room).collect();

        self.content =
            (self.content[0..range.start].to_owned() + &inserted + &self.content[range.end..])
                .into();
        range.start..range.start + inserted.len()
    }

    /// Byte offset of the char boundary at or after UTF-16 offset `offset`
    fn offset_from_utf16(&self, offset: usize) -> usize {
        let mut utf16 = 0;
        self.content
            .char_indices()
            .find_map(|(idx, ch)| {
                let hit = utf16 >= offset;
                utf16 += ch.len_utf16();
                hit.then_some(idx)
            })
            .unwrap_or(self.content.len())
    }

    fn offset_to_utf16(&self, offset: usize) -> usize {
        self.content
            .char_indices()
            .take_while(|(idx, _)| *idx < offset)
            .map(|(_, ch)| ch.len_utf16())
            .sum()
    }

    fn range_to_utf16(&self, range: &Range<usize>) -> Range<usize> {
        self.offset_to_utf16(range.start)..self.offset_to_utf16(range.end)
    }

    fn range_from_utf16(&self, range_utf16: &Range<usize>) -> Range<usize> {
        self.offset_from_utf16(range_utf16.start)..self.offset_from_utf16(range_utf16.end)
    }

    /// The range an IME edit applies to: explicit, else marked, else selected
    fn edit_range(&self, range_utf16: Option<Range<usize>>) -> Range<usize> {
        range_utf16
            .map(|range| self.range_from_utf16(&range))
            .or_else(|| self.marked_range.clone())
            .unwrap_or_else(|| self.selected_range.clone())
    }
}

impl EntityInputHandler for CellInput {
    fn text_for_range(
        &mut self,
        range_utf16: Range<usize>,
        actual_range: &mut Option<Range<usize>>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<String> {
        let range = self.range_from_utf16(&range_utf16);
        actual_range.replace(self.range_to_utf16(&range));
        Some(self.content[range].to_string())
    }

    fn selected_text_range(
        &mut self,
        _ignore_disabled_input: bool,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<UTF16Selection> {
        Some(UTF16Selection {
            range: self.range_to_utf16(&self.selected_range),
            reversed: self.selection_reversed,
        })
    }

    fn marked_text_range(
        &self,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<Range<usize>> {
        self.marked_range
            .as_ref()
            .map(|range| self.range_to_utf16(range))
    }

    fn unmark_text(&mut self, _window: &mut Window, _cx: &mut Context<Self>) {
        self.marked_range = None;
    }

    fn replace_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        _: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let inserted = self.splice(self.edit_range(range_utf16), new_text);
        self.selected_range = inserted.end..inserted.end;
        self.selection_reversed = false;
        self.marked_range.take();
        cx.notify();
    }

    fn replace_and_mark_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        _new_selected_range_utf16: Option<Range<usize>>,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let inserted = self.splice(self.edit_range(range_utf16), new_text);
        self.marked_range = Some(inserted.clone());
        self.selected_range = inserted.end..inserted.end;
        cx.notify();
    }

    fn bounds_for_range(
        &mut self,
        range_utf16: Range<usize>,
        bounds: Bounds<Pixels>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<Bounds<Pixels>> {
        let last_layout = self.last_layout.as_ref()?;
        let range = self.range_from_utf16(&range_utf16);
        Some(Bounds::from_corners(
            point(
                bounds.left() + last_layout.x_for_index(range.start),
                bounds.top(),
            ),
            point(
                bounds.left() + last_layout.x_for_index(range.end),
                bounds.bottom(),
            ),
        ))
    }

    fn character_index_for_point(
        &mut self,
        point: gpui::Point<Pixels>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<usize> {
        let line_point = self.last_bounds?.localize(&point)?;
        let last_layout = self.last_layout.as_ref()?;
        let utf8_index = last_layout.index_for_x(point.x - line_point.x)?;
        Some(self.offset_to_utf16(utf8_index))
    }
}

/// Paints the field text, its selection and the cursor
pub struct CellInputElement {
    pub input: Entity<CellInput>,
}

pub struct CellInputPrepaintState {
    line: Option<ShapedLine>,
    cursor: Option<(Bounds<Pixels>, Rgba)>,
    selection: Option<PaintQuad>,
}

impl IntoElement for CellInputElement {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

impl Element for CellInputElement {
    type RequestLayoutState = ();
    type PrepaintState = CellInputPrepaintState;

    fn id(&self) -> Option<ElementId> {
        None
    }

    fn request_layout(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        window: &mut Window,
        cx: &mut App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        let mut style = Style::default();
        style.size.width = relative(1.).into();
        style.size.height = window.line_height().into();
        (window.request_layout(style, [], cx), ())
    }

    fn prepaint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        window: &mut Window,
        cx: &mut App,
    ) -> Self::PrepaintState {
        let input = self.input.read(cx);
        let content = input.content.clone();
        let selected_range = input.selected_range.clone();
        let cursor = input.cursor_offset();
        let style = window.text_style();
        let accent = cx.global::<Theme>().accent;
        let font_size = style.font_size.to_pixels(window.rem_size());

        // Shape a blank so an empty field still has a line height
        let (display_text, color): (SharedString, Hsla) = if content.is_empty() {
            (" ".into(), Hsla::transparent_black())
        } else {
            (content.clone(), style.color)
        };
        let run = TextRun {
            len: display_text.len(),
            font: style.font(),
            color,
            background_color: None,
            underline: None,
            strikethrough: None,
        };
        let line = window
            .text_system()
            .shape_line(display_text, font_size, &[run], None);

        let cursor_pos = if content.is_empty() {
            px(0.)
        } else {
            line.x_for_index(cursor)
        };

        let (selection, cursor) = if selected_range.is_empty() || content.is_empty() {
            (
                None,
                Some((
                    Bounds::new(
                        point(bounds.left() + cursor_pos, bounds.top()),
                        size(px(2.), bounds.bottom() - bounds.top()),
                    ),
                    accent,
                )),
            )
        } else {
            (
                Some(fill(
                    Bounds::from_corners(
                        point(
                            bounds.left() + line.x_for_index(selected_range.start),
                            bounds.top(),
                        ),
                        point(
                            bounds.left() + line.x_for_index(selected_range.end),
                            bounds.bottom(),
                        ),
                    ),
                    rgba(0x3311ff30),
                )),
                None,
            )
        };

        CellInputPrepaintState {
            line: Some(line),
            cursor,
            selection,
        }
    }

    fn paint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        prepaint: &mut Self::PrepaintState,
        window: &mut Window,
        cx: &mut App,
    ) {
        let focus_handle = self.input.read(cx).focus_handle.clone();
        window.handle_input(
            &focus_handle,
            ElementInputHandler::new(bounds, self.input.clone()),
            cx,
        );
        if let Some(selection) = prepaint.selection.take() {
            window.paint_quad(selection)
        }
        let Some(line) = prepaint.line.take() else {
            return;
        };
        if let Err(e) = line.paint(
            bounds.origin,
            window.line_height(),
            gpui::TextAlign::Left,
            None,
            window,
            cx,
        ) {
            tracing::warn!("Failed to paint cell field: {}", e);
        }

        if focus_handle.is_focused(window) {
            if let Some((cursor_bounds, cursor_color)) = prepaint.cursor.take() {
                window.paint_quad(fill(cursor_bounds, cursor_color));
            }
        }

        self.input.update(cx, |input, _cx| {
            input.last_layout = Some(line);
            input.last_bounds = Some(bounds);
        });
    }

    fn source_location(&self) -> Option<&'static core::panic::Location<'static>> {
        None
    }
}

impl Render for CellInput {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.global::<Theme>();
        div()
            .flex()
            .key_context("CellInput")
            .track_focus(&self.focus_handle)
            .cursor(CursorStyle::IBeam)
            .on_action(cx.listener(Self::backspace))
            .on_action(cx.listener(Self::left))
            .on_action(cx.listener(Self::right))
            .on_action(cx.listener(Self::paste))
            .bg(theme.surface0)
            .size_full()
            .items_center()
            .overflow_hidden()
            .line_height(px(20.))
            .text_size(px(16.))
            .child(
                div()
                    .h(px(20.))
                    .w_full()
                    .px(px(2.))
                    .child(CellInputElement {
                        input: cx.entity().clone(),
                    }),
            )
    }
}

impl Focusable for CellInput {
    fn focus_handle(&self, _: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}
