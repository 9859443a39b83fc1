//! Input model: mouse buttons, keys, modifiers, and the render-visible UI state.
//!
//! `UiState` holds what the host has to draw: the active block, the drag
//! projection, the rail position, and the open popover. It is written only
//! by the engine after each handled event. The drag state machine itself
//! lives in [`crate::drag::DragMachine`] and is never read from here.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::block::BlockId;
use crate::drag::DragView;
use crate::format::FormatTarget;
use crate::popover::PopoverState;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A keyboard key, named as the browser reports it (e.g. `"Enter"`, `"Escape"`, `"b"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Block the rail follows and new blocks are inserted after.
    pub active_id: Option<BlockId>,
    /// Field that last reported a selection; keyboard commands apply to it.
    pub focused: Option<FormatTarget>,
    /// Ghost, hidden block, and insertion line as last reported to the host.
    pub drag: DragView,
    /// Current top of the action rail, once something has been measured.
    pub rail_top: Option<f64>,
    pub popover: PopoverState,
}
