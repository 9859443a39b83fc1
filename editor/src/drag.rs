//! Drag-to-reorder state machine.
//!
//! `DragMachine` is the synchronous source of truth for an in-flight drag.
//! Pointer-move fires far more often than the host re-renders, so handlers
//! read and write only the machine; the render-visible `DragView` is a
//! projection of it that the engine copies into `UiState` after each event.
//! Every mutation goes through the machine's methods, which keep the
//! session and the listener flag in step.
//!
//! Idle → Dragging on a handle pointer-down; Dragging → Idle on pointer-up,
//! whatever the outcome. A second pointer-down while Dragging is ignored.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use tracing::debug;

use crate::block::BlockId;
use crate::layout::{BlockBox, LayoutSnapshot, Point, Side};

/// A live drag, from pointer-down to pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub dragged_id: BlockId,
    /// Pointer position relative to the dragged block's top-left at grab time.
    pub grab_offset: Point,
    /// Ghost's current top-left in surface coordinates.
    pub ghost_at: Point,
    /// Block the pointer is nearest to, and which side of its center.
    pub target: Option<(BlockId, Side)>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Floating copy of the dragged block that follows the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostView {
    pub id: BlockId,
    pub at: Point,
}

/// What the UI must draw for the current drag.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragView {
    pub ghost: Option<GhostView>,
    /// Original block, hidden in place while its ghost is out.
    pub hidden: Option<BlockId>,
    /// Insertion line: above or below this block.
    pub indicator: Option<(BlockId, Side)>,
}

/// Mutable drag state read by the high-frequency pointer handlers.
#[derive(Debug, Clone, Default)]
pub struct DragMachine {
    phase: DragPhase,
    /// Whether global pointer-move/up listeners are currently registered.
    listening: bool,
}

impl DragMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        match &self.phase {
            DragPhase::Dragging(s) => Some(s),
            DragPhase::Idle => None,
        }
    }

    /// Start dragging the block measured as `grabbed`. Ignored while another
    /// drag is live. Returns whether a session started.
    pub fn begin(&mut self, grabbed: &BlockBox, pointer: Point) -> bool {
        if self.is_dragging() {
            debug!(id = %grabbed.id, "pointer-down ignored: drag already in progress");
            return false;
        }
        let origin = Point::new(grabbed.left, grabbed.top);
        self.phase = DragPhase::Dragging(DragSession {
            dragged_id: grabbed.id,
            grab_offset: Point::new(pointer.x - origin.x, pointer.y - origin.y),
            ghost_at: origin,
            target: None,
        });
        self.listening = true;
        debug!(id = %grabbed.id, "drag started");
        true
    }

    /// Follow the pointer: move the ghost and retarget to the nearest other
    /// block by vertical center. No-op while Idle.
    pub fn track(&mut self, pointer: Point, layout: &LayoutSnapshot) {
        let DragPhase::Dragging(session) = &mut self.phase else {
            return;
        };
        session.ghost_at = Point::new(pointer.x - session.grab_offset.x, pointer.y - session.grab_offset.y);
        session.target = layout.nearest(pointer.y, Some(&session.dragged_id));
    }

    /// End the drag, returning the finished session. Returns `None` when no
    /// drag was live, so listener teardown happens exactly once per session.
    pub fn finish(&mut self) -> Option<DragSession> {
        let DragPhase::Dragging(session) = std::mem::take(&mut self.phase) else {
            return None;
        };
        self.listening = false;
        Some(session)
    }

    /// Render projection of the current state.
    #[must_use]
    pub fn view(&self) -> DragView {
        match &self.phase {
            DragPhase::Idle => DragView::default(),
            DragPhase::Dragging(s) => DragView {
                ghost: Some(GhostView { id: s.dragged_id, at: s.ghost_at }),
                hidden: Some(s.dragged_id),
                indicator: s.target,
            },
        }
    }
}
