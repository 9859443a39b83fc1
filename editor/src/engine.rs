use std::ops::Range;

use tracing::{debug, info};
use web_sys::HtmlElement;

use crate::block::{BlockId, BlockKind, PairSide};
use crate::consts::{RAIL_HEIGHT_PX, REORDER_EASING_CSS};
use crate::document::Document;
use crate::dom;
use crate::drag::{DragMachine, DragSession, DragView};
use crate::flip::{FlipAnimation, Offset};
use crate::format::{FormatAttr, FormatMap, FormatState, FormatTarget, ListStyle};
use crate::input::{Button, Key, Modifiers, UiState};
use crate::layout::{Extent, LayoutSnapshot, Point, Side};
use crate::popover::PopoverId;
use crate::selection::{SelectionCache, floor_boundary};
use crate::text::{self, Continuation, Edit};
use crate::toolbar::{RailAction, rail_top};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Start routing pointer-move and pointer-up from the whole page.
    RegisterGlobalPointer,
    /// Stop routing them. Emitted exactly once per drag.
    ReleaseGlobalPointer,
    ShowGhost { id: BlockId, at: Point },
    MoveGhost { at: Point },
    DestroyGhost,
    HideBlock { id: BlockId },
    ShowBlock { id: BlockId },
    ShowInsertion { id: BlockId, side: Side },
    ClearInsertion,
    /// Block order changed; re-render in this order.
    Reordered { order: Vec<BlockId> },
    /// Block content or structure changed; re-render.
    DocumentChanged,
    /// Measure the rendered blocks and report back through `on_layout`.
    MeasureLayout,
    /// Translate blocks vertically. A zero duration applies instantly.
    SetOffsets { offsets: Vec<Offset>, duration_ms: f64, easing: &'static str },
    ShowClone { id: BlockId, at: Point },
    MoveClone { to: Point, duration_ms: f64, easing: &'static str },
    RemoveClone,
    /// Call `on_animation_frame` on the next frame.
    RequestFrame,
    PositionRail { top: f64 },
    ActiveChanged(Option<BlockId>),
    PopoverChanged(Option<PopoverId>),
    /// Focus a field and select `range` in it.
    RestoreSelection { target: FormatTarget, range: Range<usize> },
    SetFieldText { target: FormatTarget, text: String, selection: Range<usize> },
    /// Recompute a multi-line field's height from its content.
    ResizeField(FormatTarget),
    FormatChanged { target: FormatTarget, state: FormatState },
}

/// Editor state and every rule that doesn't need the DOM. Layouts come in
/// as arguments; effects go out as [`Action`]s.
#[derive(Debug, Default)]
pub struct EditorCore {
    pub doc: Document,
    pub ui: UiState,
    pub drag: DragMachine,
    pub formats: FormatMap,
    pub selection: SelectionCache,
    pub flip: Option<FlipAnimation>,
    /// Last layout the host reported.
    pub layout: LayoutSnapshot,
    pub header: Option<Extent>,
}

impl EditorCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing a previously saved document.
    #[must_use]
    pub fn with_document(doc: Document) -> Self {
        Self { doc, ..Self::default() }
    }

    // --- Data inputs ---

    /// Replace the document wholesale, dropping drag, animation, formatting,
    /// and selection state tied to the old one.
    pub fn load_document(&mut self, doc: Document) -> Vec<Action> {
        let mut out = Vec::new();
        if self.drag.finish().is_some() {
            out.push(Action::ReleaseGlobalPointer);
        }
        self.settle_flip(&mut out);
        self.sync_drag_view(&mut out);
        self.doc = doc;
        self.formats = FormatMap::new();
        self.selection.clear();
        self.ui.focused = None;
        if self.ui.popover.close() {
            out.push(Action::PopoverChanged(None));
        }
        out.push(Action::DocumentChanged);
        self.activate(None, &mut out);
        out.push(Action::MeasureLayout);
        out
    }

    // --- Queries ---

    #[must_use]
    pub fn active(&self) -> Option<BlockId> {
        self.ui.active_id
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    #[must_use]
    pub fn format_state(&self, target: &FormatTarget) -> FormatState {
        self.formats.get(target)
    }

    // --- Active block ---

    /// Mark a block active. Ids that don't resolve clear the active block.
    pub fn set_active(&mut self, id: Option<BlockId>) -> Vec<Action> {
        let mut out = Vec::new();
        self.activate(id, &mut out);
        out
    }

    fn activate(&mut self, id: Option<BlockId>, out: &mut Vec<Action>) {
        let id = id.filter(|id| self.doc.contains(id));
        if self.ui.active_id != id {
            self.ui.active_id = id;
            out.push(Action::ActiveChanged(id));
        }
        self.reposition_rail(out);
    }

    fn reposition_rail(&mut self, out: &mut Vec<Action>) {
        let top = rail_top(self.ui.active_id.as_ref(), &self.layout, self.header, RAIL_HEIGHT_PX);
        if top != self.ui.rail_top {
            self.ui.rail_top = top;
            if let Some(top) = top {
                out.push(Action::PositionRail { top });
            }
        }
    }

    // --- Structural edits ---

    /// Insert a default block after `anchor` (or at the end) and make it active.
    pub fn insert_after(&mut self, anchor: Option<&BlockId>, kind: BlockKind) -> Vec<Action> {
        let id = self.doc.insert_after(anchor, kind);
        info!(%id, ?kind, "block inserted");
        self.structural(Some(id))
    }

    pub fn duplicate(&mut self, id: &BlockId) -> Vec<Action> {
        let Some(copy) = self.doc.duplicate(id) else {
            return Vec::new();
        };
        info!(source = %id, %copy, "block duplicated");
        self.structural(Some(copy))
    }

    /// Remove a block. The block now at its index becomes active, else the
    /// one before it, else nothing.
    pub fn delete(&mut self, id: &BlockId) -> Vec<Action> {
        let Some(index) = self.doc.delete(id) else {
            return Vec::new();
        };
        info!(%id, index, "block deleted");
        let mut out = Vec::new();
        self.forget_block(id, &mut out);
        let next = self.doc.active_after_removal(index);
        out.append(&mut self.structural(next));
        out
    }

    pub fn change_type(&mut self, id: &BlockId, kind: BlockKind) -> Vec<Action> {
        if !self.doc.change_type(id, kind) {
            return Vec::new();
        }
        info!(%id, ?kind, "block type changed");
        let mut out = Vec::new();
        self.forget_block(id, &mut out);
        out.append(&mut self.structural(Some(*id)));
        out
    }

    /// Fold a block's description into the block above; that block becomes active.
    pub fn merge_with_above(&mut self, id: &BlockId) -> Vec<Action> {
        let Some(target) = self.doc.merge_with_above(id) else {
            return Vec::new();
        };
        info!(%id, into = %target, "block merged");
        let mut out = Vec::new();
        self.forget_block(id, &mut out);
        out.append(&mut self.structural(Some(target)));
        out
    }

    fn structural(&mut self, active: Option<BlockId>) -> Vec<Action> {
        let mut out = vec![Action::DocumentChanged];
        self.activate(active, &mut out);
        out.push(Action::MeasureLayout);
        out
    }

    /// Drop per-block UI state for a block whose fields went away.
    fn forget_block(&mut self, id: &BlockId, out: &mut Vec<Action>) {
        self.formats.forget_block(id);
        if self.ui.popover.forget_block(id) {
            out.push(Action::PopoverChanged(None));
        }
        if self.selection.snapshot().is_some_and(|s| s.field.block_id == Some(*id)) {
            self.selection.clear();
        }
        if self.ui.focused.is_some_and(|t| t.block_id == Some(*id)) {
            self.ui.focused = None;
        }
    }

    // --- Options / items / pairs ---

    pub fn add_option(&mut self, id: &BlockId) -> Vec<Action> {
        let changed = self.doc.add_option(id);
        Self::content(changed)
    }

    pub fn add_option_with_text(&mut self, id: &BlockId, text: impl Into<String>) -> Vec<Action> {
        let changed = self.doc.add_option_with_text(id, text);
        Self::content(changed)
    }

    pub fn update_option_text(&mut self, id: &BlockId, index: usize, text: impl Into<String>) -> Vec<Action> {
        let changed = self.doc.update_option_text(id, index, text);
        Self::content(changed)
    }

    pub fn update_pair(&mut self, id: &BlockId, index: usize, side: PairSide, text: impl Into<String>) -> Vec<Action> {
        let changed = self.doc.update_pair(id, index, side, text);
        Self::content(changed)
    }

    pub fn remove_option(&mut self, id: &BlockId, index: usize) -> Vec<Action> {
        let changed = self.doc.remove_option(id, index);
        Self::content(changed)
    }

    pub fn set_correct_option(&mut self, id: &BlockId, index: usize) -> Vec<Action> {
        let changed = self.doc.set_correct_option(id, index);
        Self::content(changed)
    }

    pub fn toggle_correct_option(&mut self, id: &BlockId, index: usize) -> Vec<Action> {
        let changed = self.doc.toggle_correct_option(id, index);
        Self::content(changed)
    }

    fn content(changed: bool) -> Vec<Action> {
        if changed { vec![Action::DocumentChanged, Action::MeasureLayout] } else { Vec::new() }
    }

    // --- Formatting ---

    /// Remember the selection of a field. Called on every selection change.
    pub fn record_selection(&mut self, target: FormatTarget, start: usize, end: usize) {
        self.selection.record(target, start, end);
        self.ui.focused = Some(target);
    }

    pub fn toggle_format(&mut self, target: FormatTarget, attr: FormatAttr) -> Vec<Action> {
        let Some(text) = self.doc.field(&target) else {
            return Vec::new();
        };
        let range = self.selection.restore(&target, text);
        let state = self.formats.toggle(target, attr);
        debug!(?target, ?attr, "format toggled");
        vec![Action::RestoreSelection { target, range }, Action::FormatChanged { target, state }]
    }

    /// Enter `style` on the selected lines, or leave it (stripping every
    /// marker) when the field is already in that style.
    pub fn toggle_list(&mut self, target: FormatTarget, style: ListStyle) -> Vec<Action> {
        let Some(text) = self.doc.field(&target) else {
            return Vec::new();
        };
        let range = self.selection.restore(&target, text);
        let leaving = self.formats.get(&target).list == Some(style);
        let edit = if leaving {
            text::strip_list_markers(text, range.clone())
        } else {
            text::apply_list_markers(text, range.clone(), style)
        };
        let state = self.formats.set_list(target, (!leaving).then_some(style));

        let mut out = vec![Action::RestoreSelection { target, range }];
        self.write_field(target, edit, &mut out);
        out.push(Action::FormatChanged { target, state });
        out
    }

    /// Drop every toggle and strip markers and link syntax from the text.
    pub fn clear_formatting(&mut self, target: FormatTarget) -> Vec<Action> {
        let Some(text) = self.doc.field(&target) else {
            return Vec::new();
        };
        let range = self.selection.restore(&target, text);
        let edit = text::clear_formatting(text, range.clone());
        self.formats.clear(&target);

        let mut out = vec![Action::RestoreSelection { target, range }];
        self.write_field(target, edit, &mut out);
        out.push(Action::FormatChanged { target, state: FormatState::default() });
        out
    }

    /// Wrap the restored selection as a link to `url`.
    pub fn insert_link(&mut self, target: FormatTarget, url: &str) -> Vec<Action> {
        let url = url.trim();
        let Some(text) = self.doc.field(&target).filter(|_| !url.is_empty()) else {
            return Vec::new();
        };
        let range = self.selection.restore(&target, text);
        let edit = text::wrap_link(text, range.clone(), url);

        let mut out = vec![Action::RestoreSelection { target, range }];
        if self.ui.popover.close() {
            out.push(Action::PopoverChanged(None));
        }
        self.write_field(target, edit, &mut out);
        out
    }

    /// Line-break typed at `caret`. List lines are handled here; on any other
    /// line nothing is returned and the host inserts the newline itself.
    pub fn line_break(&mut self, target: FormatTarget, caret: usize) -> Vec<Action> {
        let Some(text) = self.doc.field(&target) else {
            return Vec::new();
        };
        let caret = floor_boundary(text, caret);
        let result = text::line_break(text, caret);
        if result.continuation == Continuation::Plain {
            return Vec::new();
        }

        let mut out = Vec::new();
        let edit = Edit { text: result.text, selection: result.caret..result.caret };
        self.write_field(target, edit, &mut out);
        if result.continuation == Continuation::Exited {
            let state = self.formats.set_list(target, None);
            out.push(Action::FormatChanged { target, state });
        }
        out
    }

    /// Text typed into a field by the user.
    pub fn set_field_text(&mut self, target: FormatTarget, text: impl Into<String>) -> Vec<Action> {
        let Some(field) = self.doc.field_mut(&target) else {
            return Vec::new();
        };
        *field = text.into();
        vec![Action::ResizeField(target), Action::MeasureLayout]
    }

    fn write_field(&mut self, target: FormatTarget, edit: Edit, out: &mut Vec<Action>) {
        let Some(field) = self.doc.field_mut(&target) else {
            return;
        };
        field.clone_from(&edit.text);
        if edit.selection.is_empty() {
            self.selection.place_caret(target, edit.selection.start);
        } else {
            self.selection.record(target, edit.selection.start, edit.selection.end);
        }
        out.push(Action::SetFieldText { target, text: edit.text, selection: edit.selection });
        out.push(Action::ResizeField(target));
        out.push(Action::MeasureLayout);
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        if key.is("Escape") {
            return if self.ui.popover.close() { vec![Action::PopoverChanged(None)] } else { Vec::new() };
        }
        let Some(target) = self.ui.focused else {
            return Vec::new();
        };
        if key.is("Enter") && !modifiers.shift && !modifiers.command() {
            let caret = self.selection.snapshot().filter(|s| s.field == target && s.start == s.end);
            return caret.map_or_else(Vec::new, |s| self.line_break(target, s.end));
        }
        if modifiers.command() {
            let attr = if key.is("b") {
                FormatAttr::Bold
            } else if key.is("i") {
                FormatAttr::Italic
            } else if key.is("u") {
                FormatAttr::Underline
            } else {
                return Vec::new();
            };
            return self.toggle_format(target, attr);
        }
        Vec::new()
    }

    // --- Drag reorder ---

    /// Pointer-down on a block's drag handle.
    pub fn on_handle_pointer_down(
        &mut self,
        id: BlockId,
        pointer: Point,
        button: Button,
        layout: LayoutSnapshot,
    ) -> Vec<Action> {
        let mut out = Vec::new();
        self.dismiss_popover(None, &mut out);
        if button != Button::Primary || self.drag.is_dragging() || !self.doc.contains(&id) {
            return out;
        }
        self.layout = layout;
        let Some(grabbed) = self.layout.get(&id).copied() else {
            debug!(%id, "pointer-down on unmeasured block ignored");
            return out;
        };
        self.settle_flip(&mut out);
        if self.drag.begin(&grabbed, pointer) {
            out.push(Action::RegisterGlobalPointer);
        }
        self.sync_drag_view(&mut out);
        out
    }

    /// Pointer-move while dragging. Reads only the drag machine and the
    /// layout measured at pointer-down.
    pub fn on_pointer_move(&mut self, pointer: Point) -> Vec<Action> {
        if !self.drag.is_dragging() {
            return Vec::new();
        }
        self.drag.track(pointer, &self.layout);
        let mut out = Vec::new();
        self.sync_drag_view(&mut out);
        out
    }

    /// Pointer-up ends the drag. `layout` is measured right before the
    /// commit and becomes the "first" layout of the reorder animation.
    pub fn on_pointer_up(&mut self, pointer: Point, layout: LayoutSnapshot) -> Vec<Action> {
        if !self.drag.is_dragging() {
            return Vec::new();
        }
        self.layout = layout;
        self.drag.track(pointer, &self.layout);
        let Some(session) = self.drag.finish() else {
            return Vec::new();
        };

        let mut out = vec![Action::ReleaseGlobalPointer];
        let committed = self.commit_drop(&session);
        if committed {
            self.flip = Some(FlipAnimation::begin(self.layout.clone(), session.dragged_id, session.ghost_at));
        }
        self.sync_drag_view(&mut out);
        if committed {
            info!(id = %session.dragged_id, target = ?session.target, "reorder committed");
            out.push(Action::Reordered { order: self.doc.ids() });
            self.activate(Some(session.dragged_id), &mut out);
            out.push(Action::MeasureLayout);
        }
        out
    }

    /// Apply a finished drag to the document. Stale ids make it a no-op.
    fn commit_drop(&mut self, session: &DragSession) -> bool {
        let dragged = &session.dragged_id;
        if !self.doc.contains(dragged) {
            debug!(%dragged, "drop ignored: dragged block no longer exists");
            return false;
        }
        match session.target {
            Some((target, _)) if target == *dragged => false,
            Some((target, side)) => self.doc.move_block(dragged, &target, side),
            None => self.doc.move_to_end(dragged),
        }
    }

    // --- Layout / animation ---

    /// The host re-rendered and measured. Drives the invert step of a pending
    /// reorder animation and keeps the rail in place.
    pub fn on_layout(&mut self, layout: LayoutSnapshot, header: Option<Extent>) -> Vec<Action> {
        self.layout = layout;
        self.header = header;
        let mut out = Vec::new();
        if let Some(flip) = self.flip.as_mut() {
            if let Some(step) = flip.on_layout(&self.layout) {
                out.push(Action::SetOffsets { offsets: step.offsets, duration_ms: 0.0, easing: REORDER_EASING_CSS });
                if let Some(clone) = step.clone {
                    out.push(Action::ShowClone { id: clone.id, at: clone.from });
                }
                if flip.is_done() {
                    self.flip = None;
                    self.sync_drag_view(&mut out);
                } else {
                    out.push(Action::RequestFrame);
                }
            }
        }
        self.reposition_rail(&mut out);
        out
    }

    /// Next frame after the invert step: release offsets and fly the clone.
    pub fn on_animation_frame(&mut self) -> Vec<Action> {
        let Some(flip) = self.flip.as_mut() else {
            return Vec::new();
        };
        if !flip.on_frame() {
            return Vec::new();
        }
        let duration_ms = flip.duration_ms();
        let mut out = vec![Action::SetOffsets {
            offsets: zeroed(flip.offsets()),
            duration_ms,
            easing: REORDER_EASING_CSS,
        }];
        if let Some(clone) = flip.clone_flight() {
            out.push(Action::MoveClone { to: clone.to, duration_ms, easing: REORDER_EASING_CSS });
        } else {
            flip.settle();
            self.flip = None;
            self.sync_drag_view(&mut out);
        }
        out
    }

    /// The clone reached the dragged block's slot: discard it and reveal the block.
    pub fn on_clone_settled(&mut self) -> Vec<Action> {
        let Some(mut flip) = self.flip.take() else {
            return Vec::new();
        };
        let mut out = Vec::new();
        if flip.settle() && flip.clone_flight().is_some() {
            out.push(Action::RemoveClone);
        }
        debug!(id = %flip.dragged(), "reorder animation settled");
        self.sync_drag_view(&mut out);
        out
    }

    /// Cut a running animation short so a new drag starts from a still layout.
    fn settle_flip(&mut self, out: &mut Vec<Action>) {
        let Some(mut flip) = self.flip.take() else {
            return;
        };
        if flip.settle() {
            if flip.clone_flight().is_some() {
                out.push(Action::RemoveClone);
            }
            if !flip.offsets().is_empty() {
                out.push(Action::SetOffsets {
                    offsets: zeroed(flip.offsets()),
                    duration_ms: 0.0,
                    easing: REORDER_EASING_CSS,
                });
            }
        }
    }

    /// What the host should currently show for the drag: the machine's view,
    /// with the dragged block kept hidden until its reorder animation ends.
    fn projected_view(&self) -> DragView {
        let mut view = self.drag.view();
        if view.hidden.is_none() {
            view.hidden = self.flip.as_ref().filter(|f| !f.is_done()).map(FlipAnimation::dragged);
        }
        view
    }

    /// Copy the projection into `UiState`, emitting an action per change.
    fn sync_drag_view(&mut self, out: &mut Vec<Action>) {
        let next = self.projected_view();
        let prev = std::mem::replace(&mut self.ui.drag, next);

        match (prev.ghost, next.ghost) {
            (None, Some(g)) => out.push(Action::ShowGhost { id: g.id, at: g.at }),
            (Some(a), Some(b)) if a.id != b.id => {
                out.push(Action::DestroyGhost);
                out.push(Action::ShowGhost { id: b.id, at: b.at });
            }
            (Some(a), Some(b)) if a.at != b.at => out.push(Action::MoveGhost { at: b.at }),
            (Some(_), None) => out.push(Action::DestroyGhost),
            _ => {}
        }
        if prev.hidden != next.hidden {
            if let Some(id) = prev.hidden {
                out.push(Action::ShowBlock { id });
            }
            if let Some(id) = next.hidden {
                out.push(Action::HideBlock { id });
            }
        }
        if prev.indicator != next.indicator {
            out.push(match next.indicator {
                Some((id, side)) => Action::ShowInsertion { id, side },
                None => Action::ClearInsertion,
            });
        }
    }

    // --- Surface / toolbar ---

    /// Click anywhere on the editing surface: the block with the nearest
    /// vertical center becomes active.
    pub fn on_surface_click(&mut self, y: f64, layout: LayoutSnapshot) -> Vec<Action> {
        let mut out = Vec::new();
        self.dismiss_popover(None, &mut out);
        if self.drag.is_dragging() {
            return out;
        }
        self.layout = layout;
        if let Some((id, _)) = self.layout.nearest(y, None) {
            self.activate(Some(id), &mut out);
        }
        out
    }

    pub fn on_resize(&mut self, layout: LayoutSnapshot, header: Option<Extent>) -> Vec<Action> {
        self.remeasure(layout, header)
    }

    pub fn on_scroll(&mut self, layout: LayoutSnapshot, header: Option<Extent>) -> Vec<Action> {
        self.remeasure(layout, header)
    }

    fn remeasure(&mut self, layout: LayoutSnapshot, header: Option<Extent>) -> Vec<Action> {
        self.layout = layout;
        self.header = header;
        let mut out = Vec::new();
        self.reposition_rail(&mut out);
        out
    }

    /// A rail button: insert after the active block, or at the end.
    pub fn on_rail(&mut self, action: RailAction) -> Vec<Action> {
        let anchor = self.ui.active_id;
        self.insert_after(anchor.as_ref(), action.kind())
    }

    // --- Popovers ---

    pub fn toggle_popover(&mut self, id: PopoverId) -> Vec<Action> {
        self.ui.popover.toggle(id);
        vec![Action::PopoverChanged(self.ui.popover.open())]
    }

    /// Any accepted input; `inside` is the popover it landed in, if any.
    pub fn on_popover_input(&mut self, inside: Option<PopoverId>) -> Vec<Action> {
        let mut out = Vec::new();
        self.dismiss_popover(inside, &mut out);
        out
    }

    fn dismiss_popover(&mut self, inside: Option<PopoverId>, out: &mut Vec<Action>) {
        if self.ui.popover.on_input(inside) {
            out.push(Action::PopoverChanged(None));
        }
    }
}

fn zeroed(offsets: &[Offset]) -> Vec<Offset> {
    offsets.iter().map(|o| Offset { id: o.id, dy: 0.0 }).collect()
}

/// The full editor. Wraps `EditorCore` and owns the browser surface element.
///
/// Pointer coordinates arrive in client space and are converted to surface
/// space here; every layout is measured from the DOM right before the core
/// sees the event. Presentational actions are applied to the DOM, and the
/// full list is returned so the caller can handle the rest (listeners,
/// frames, re-rendering).
pub struct Editor {
    surface: HtmlElement,
    pub core: EditorCore,
}

impl Editor {
    /// Create an editor bound to the given surface element.
    #[must_use]
    pub fn new(surface: HtmlElement) -> Self {
        Self { surface, core: EditorCore::new() }
    }

    #[must_use]
    pub fn with_document(surface: HtmlElement, doc: Document) -> Self {
        Self { surface, core: EditorCore::with_document(doc) }
    }

    /// Apply the presentational part of `actions` and hand them back.
    pub fn run(&self, actions: Vec<Action>) -> Vec<Action> {
        dom::apply(&self.surface, &actions);
        actions
    }

    // --- Input events ---

    pub fn on_handle_pointer_down(&mut self, id: BlockId, client_x: f64, client_y: f64, button: Button) -> Vec<Action> {
        let pointer = dom::surface_point(&self.surface, client_x, client_y);
        let layout = dom::measure_blocks(&self.surface);
        let actions = self.core.on_handle_pointer_down(id, pointer, button, layout);
        self.run(actions)
    }

    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) -> Vec<Action> {
        let pointer = dom::surface_point(&self.surface, client_x, client_y);
        let actions = self.core.on_pointer_move(pointer);
        self.run(actions)
    }

    pub fn on_pointer_up(&mut self, client_x: f64, client_y: f64) -> Vec<Action> {
        let pointer = dom::surface_point(&self.surface, client_x, client_y);
        let layout = dom::measure_blocks(&self.surface);
        let actions = self.core.on_pointer_up(pointer, layout);
        self.run(actions)
    }

    pub fn on_surface_click(&mut self, client_y: f64) -> Vec<Action> {
        let y = dom::surface_point(&self.surface, 0.0, client_y).y;
        let layout = dom::measure_blocks(&self.surface);
        let actions = self.core.on_surface_click(y, layout);
        self.run(actions)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.on_key_down(key, modifiers);
        self.run(actions)
    }

    /// Selection change reported in UTF-16 offsets, as the DOM counts them.
    pub fn record_selection(&mut self, target: FormatTarget, start_utf16: u32, end_utf16: u32) {
        let Some(text) = self.core.doc.field(&target) else {
            return;
        };
        let start = dom::byte_offset(text, start_utf16);
        let end = dom::byte_offset(text, end_utf16);
        self.core.record_selection(target, start, end);
    }

    // --- Layout ---

    /// Call after every re-render the engine asked for.
    pub fn on_layout(&mut self) -> Vec<Action> {
        let layout = dom::measure_blocks(&self.surface);
        let header = dom::measure_header(&self.surface);
        let actions = self.core.on_layout(layout, header);
        self.run(actions)
    }

    pub fn on_animation_frame(&mut self) -> Vec<Action> {
        let actions = self.core.on_animation_frame();
        self.run(actions)
    }

    pub fn on_clone_settled(&mut self) -> Vec<Action> {
        let actions = self.core.on_clone_settled();
        self.run(actions)
    }

    pub fn on_resize(&mut self) -> Vec<Action> {
        let layout = dom::measure_blocks(&self.surface);
        let header = dom::measure_header(&self.surface);
        let actions = self.core.on_resize(layout, header);
        self.run(actions)
    }

    pub fn on_scroll(&mut self) -> Vec<Action> {
        let layout = dom::measure_blocks(&self.surface);
        let header = dom::measure_header(&self.surface);
        let actions = self.core.on_scroll(layout, header);
        self.run(actions)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn active(&self) -> Option<BlockId> {
        self.core.active()
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        self.core.document()
    }
}
