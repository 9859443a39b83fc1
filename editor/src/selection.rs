//! Selection cache that survives focus moving from a field to the toolbar.
//!
//! Clicking a toolbar control blurs the field being edited, so the host's
//! live selection is gone by the time a formatting command runs. The host
//! reports every selection change here; commands restore the last snapshot
//! for their field before touching text. Offsets are byte offsets into the
//! field's text.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use std::ops::Range;

use tracing::debug;

use crate::format::FormatTarget;

/// Last known selection of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub field: FormatTarget,
    pub start: usize,
    pub end: usize,
}

/// Single-slot cache, overwritten by every selection change in any field.
#[derive(Debug, Clone, Default)]
pub struct SelectionCache {
    slot: Option<SelectionSnapshot>,
}

impl SelectionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a selection. Reversed ranges are normalized.
    pub fn record(&mut self, field: FormatTarget, start: usize, end: usize) {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        self.slot = Some(SelectionSnapshot { field, start, end });
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<SelectionSnapshot> {
        self.slot
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// Range to operate on in `text` for `field`.
    ///
    /// Uses the cached snapshot when it belongs to `field`, clamped to the
    /// text and snapped to char boundaries. Otherwise falls back to the whole
    /// field.
    #[must_use]
    pub fn restore(&self, field: &FormatTarget, text: &str) -> Range<usize> {
        match self.slot {
            Some(snap) if snap.field == *field => {
                let start = floor_boundary(text, snap.start);
                let end = floor_boundary(text, snap.end).max(start);
                start..end
            }
            _ => {
                debug!(?field, "no cached selection for field; using whole field");
                0..text.len()
            }
        }
    }

    /// Move the cached caret after an edit changed the field's text.
    pub fn place_caret(&mut self, field: FormatTarget, at: usize) {
        self.record(field, at, at);
    }
}

/// Largest char boundary in `text` at or below `at`.
#[must_use]
pub fn floor_boundary(text: &str, at: usize) -> usize {
    let mut at = at.min(text.len());
    while !text.is_char_boundary(at) {
        at -= 1;
    }
    at
}
