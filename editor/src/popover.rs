//! At most one small contextual menu open at a time.
//!
//! Any accepted input that doesn't land inside the open popover dismisses it.

#[cfg(test)]
#[path = "popover_test.rs"]
mod popover_test;

use crate::block::BlockId;

/// Which contextual menu a popover is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopoverId {
    /// Block-kind picker for a block.
    KindPicker(BlockId),
    /// Per-block overflow menu (duplicate, delete, required).
    BlockMenu(BlockId),
    /// Link URL entry for a formattable field.
    LinkEntry,
}

impl PopoverId {
    /// The block this popover belongs to, if any.
    #[must_use]
    pub fn block(&self) -> Option<BlockId> {
        match self {
            Self::KindPicker(id) | Self::BlockMenu(id) => Some(*id),
            Self::LinkEntry => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopoverState {
    open: Option<PopoverId>,
}

impl PopoverState {
    #[must_use]
    pub fn open(&self) -> Option<PopoverId> {
        self.open
    }

    /// Open `id`, or close it if it's already the open one. Opening replaces
    /// any other open popover.
    pub fn toggle(&mut self, id: PopoverId) {
        self.open = if self.open == Some(id) { None } else { Some(id) };
    }

    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }

    /// An input landed inside `inside` (or outside every popover when `None`).
    /// Returns whether this dismissed the open popover.
    pub fn on_input(&mut self, inside: Option<PopoverId>) -> bool {
        match (self.open, inside) {
            (Some(open), Some(hit)) if open == hit => false,
            (Some(_), _) => self.close(),
            (None, _) => false,
        }
    }

    /// Close the popover if it belongs to a block that's going away.
    pub fn forget_block(&mut self, id: &BlockId) -> bool {
        if self.open.and_then(|p| p.block()) == Some(*id) {
            return self.close();
        }
        false
    }
}
