//! Layout measurements supplied by the host, and nearest-block lookup.
//!
//! The engine never measures anything itself. The host reports each rendered
//! block's vertical box in surface coordinates as a `LayoutSnapshot`, and the
//! drag engine, FLIP animation, and toolbar positioning all read from it.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::block::BlockId;

/// A point in surface coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which side of a block's vertical center the pointer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Above,
    Below,
}

/// Rendered box of one block. Only the vertical extent drives ordering;
/// `left` positions the drag ghost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockBox {
    pub id: BlockId,
    pub left: f64,
    pub top: f64,
    pub height: f64,
}

impl BlockBox {
    #[must_use]
    pub fn new(id: BlockId, top: f64, height: f64) -> Self {
        Self { id, left: 0.0, top, height }
    }

    #[must_use]
    pub fn with_left(mut self, left: f64) -> Self {
        self.left = left;
        self
    }

    #[must_use]
    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Vertical extent of a non-block element, such as the document header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub top: f64,
    pub height: f64,
}

impl Extent {
    #[must_use]
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[must_use]
    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Rendered boxes of the visible blocks, in the order the host measured them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutSnapshot {
    boxes: Vec<BlockBox>,
}

impl LayoutSnapshot {
    #[must_use]
    pub fn new(boxes: Vec<BlockBox>) -> Self {
        Self { boxes }
    }

    #[must_use]
    pub fn boxes(&self) -> &[BlockBox] {
        &self.boxes
    }

    #[must_use]
    pub fn get(&self, id: &BlockId) -> Option<&BlockBox> {
        self.boxes.iter().find(|b| b.id == *id)
    }

    #[must_use]
    pub fn top_of(&self, id: &BlockId) -> Option<f64> {
        self.get(id).map(|b| b.top)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// The block whose vertical center is closest to `y`, skipping `exclude`,
    /// and which side of that center `y` falls on. Ties go to the earlier box.
    #[must_use]
    pub fn nearest(&self, y: f64, exclude: Option<&BlockId>) -> Option<(BlockId, Side)> {
        self.boxes
            .iter()
            .filter(|b| Some(&b.id) != exclude)
            .fold(None::<(&BlockBox, f64)>, |best, b| {
                let dist = (b.center() - y).abs();
                match best {
                    Some((_, d)) if d <= dist => best,
                    _ => Some((b, dist)),
                }
            })
            .map(|(b, _)| {
                let side = if y < b.center() { Side::Above } else { Side::Below };
                (b.id, side)
            })
    }
}
