//! FLIP (First, Last, Invert, Play) animation for committed reorders.
//!
//! The block order is already final when an animation starts; this module
//! only describes how to make the jump look like a slide.
//!
//! 1. **First**: the layout measured just before the reorder is kept.
//! 2. **Last**: after the host re-renders, `on_layout` receives the new
//!    layout and computes, for every sibling, the offset that puts it back
//!    where it was. Those offsets are applied with no transition.
//! 3. **Play**: on the next frame, `on_frame` releases every offset back to
//!    zero over a fixed duration with an ease-out curve.
//!
//! The dragged block doesn't take part: its "first" position is wherever
//! the ghost was dropped, which means nothing relative to its siblings.
//! Instead a separate clone flies from the drop point to the block's new
//! slot while the real block stays hidden until `settle`.
//!
//! Hosts without CSS transitions can drive everything from `sample`.

#[cfg(test)]
#[path = "flip_test.rs"]
mod flip_test;

use tracing::debug;

use crate::block::BlockId;
use crate::consts::{FLIP_MIN_OFFSET_PX, REORDER_ANIMATION_MS};
use crate::layout::{LayoutSnapshot, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipPhase {
    /// Reorder applied; waiting for the host to measure the new layout.
    AwaitingLayout,
    /// Inverse offsets applied; waiting for the next frame to release them.
    Inverted,
    /// Offsets and clone are transitioning.
    Playing,
    Done,
}

/// Vertical offset of one block from its laid-out position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    pub id: BlockId,
    pub dy: f64,
}

/// Path of the dragged block's stand-in clone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloneFlight {
    pub id: BlockId,
    pub from: Point,
    pub to: Point,
}

/// Output of the invert step: apply instantly.
#[derive(Debug, Clone, PartialEq)]
pub struct InvertStep {
    pub offsets: Vec<Offset>,
    pub clone: Option<CloneFlight>,
}

/// Snapshot of an animation at some elapsed time.
#[derive(Debug, Clone, PartialEq)]
pub struct FlipFrame {
    pub offsets: Vec<Offset>,
    pub clone_at: Option<Point>,
}

/// One reorder animation, from commit to settle.
#[derive(Debug, Clone)]
pub struct FlipAnimation {
    phase: FlipPhase,
    first: LayoutSnapshot,
    dragged: BlockId,
    dropped_at: Point,
    duration_ms: f64,
    offsets: Vec<Offset>,
    clone: Option<CloneFlight>,
}

impl FlipAnimation {
    /// Start an animation from the pre-reorder layout and the point where the
    /// dragged block was dropped.
    #[must_use]
    pub fn begin(first: LayoutSnapshot, dragged: BlockId, dropped_at: Point) -> Self {
        Self {
            phase: FlipPhase::AwaitingLayout,
            first,
            dragged,
            dropped_at,
            duration_ms: REORDER_ANIMATION_MS,
            offsets: Vec::new(),
            clone: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> FlipPhase {
        self.phase
    }

    #[must_use]
    pub fn dragged(&self) -> BlockId {
        self.dragged
    }

    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.phase == FlipPhase::Done
    }

    #[must_use]
    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    #[must_use]
    pub fn clone_flight(&self) -> Option<CloneFlight> {
        self.clone
    }

    /// Last + Invert: compare against the post-reorder layout. Returns `None`
    /// unless the animation was waiting for a layout. When nothing moved and
    /// the dragged block wasn't measured, the animation finishes immediately.
    pub fn on_layout(&mut self, last: &LayoutSnapshot) -> Option<InvertStep> {
        if self.phase != FlipPhase::AwaitingLayout {
            return None;
        }
        self.offsets = last
            .boxes()
            .iter()
            .filter(|b| b.id != self.dragged)
            .filter_map(|b| {
                let dy = self.first.top_of(&b.id)? - b.top;
                (dy.abs() >= FLIP_MIN_OFFSET_PX).then_some(Offset { id: b.id, dy })
            })
            .collect();
        self.clone = last
            .get(&self.dragged)
            .map(|b| CloneFlight { id: self.dragged, from: self.dropped_at, to: Point::new(b.left, b.top) });

        self.phase = if self.offsets.is_empty() && self.clone.is_none() {
            FlipPhase::Done
        } else {
            FlipPhase::Inverted
        };
        debug!(moved = self.offsets.len(), clone = self.clone.is_some(), "flip inverted");
        Some(InvertStep { offsets: self.offsets.clone(), clone: self.clone })
    }

    /// Play: release the inverse offsets. Returns whether playback started.
    pub fn on_frame(&mut self) -> bool {
        if self.phase != FlipPhase::Inverted {
            return false;
        }
        self.phase = FlipPhase::Playing;
        true
    }

    /// Transitions finished (or were cut short). Returns whether the
    /// animation was still running.
    pub fn settle(&mut self) -> bool {
        if self.phase == FlipPhase::Done {
            return false;
        }
        self.phase = FlipPhase::Done;
        true
    }

    /// Interpolated offsets and clone position `elapsed_ms` into playback.
    #[must_use]
    pub fn sample(&self, elapsed_ms: f64) -> FlipFrame {
        let progress = match self.phase {
            FlipPhase::AwaitingLayout | FlipPhase::Inverted => 0.0,
            FlipPhase::Playing => ease_out_cubic(elapsed_ms / self.duration_ms),
            FlipPhase::Done => 1.0,
        };
        FlipFrame {
            offsets: self.offsets.iter().map(|o| Offset { id: o.id, dy: o.dy * (1.0 - progress) }).collect(),
            clone_at: self.clone.map(|c| {
                Point::new(c.from.x + (c.to.x - c.from.x) * progress, c.from.y + (c.to.y - c.from.y) * progress)
            }),
        }
    }
}

/// Ease-out cubic on `t` clamped to `[0, 1]`.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}
