//! Floating action rail that follows the active block.

#[cfg(test)]
#[path = "toolbar_test.rs"]
mod toolbar_test;

use crate::block::{BlockId, BlockKind};
use crate::consts::DEFAULT_QUESTION_KIND;
use crate::layout::{BlockBox, Extent, LayoutSnapshot};

/// Buttons on the action rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RailAction {
    AddQuestion,
    AddTitleBlock,
    AddImage,
    AddSection,
}

impl RailAction {
    /// Kind of block the action inserts.
    #[must_use]
    pub fn kind(self) -> BlockKind {
        match self {
            Self::AddQuestion => DEFAULT_QUESTION_KIND,
            Self::AddTitleBlock => BlockKind::TitleBlock,
            Self::AddImage => BlockKind::ImageBlock,
            Self::AddSection => BlockKind::SectionBreak,
        }
    }
}

/// Top coordinate that centers a rail of `rail_height` on the active block,
/// or on the header when nothing is active or the active block isn't
/// measured. `None` when neither can be found.
#[must_use]
pub fn rail_top(
    active: Option<&BlockId>,
    layout: &LayoutSnapshot,
    header: Option<Extent>,
    rail_height: f64,
) -> Option<f64> {
    let center = active
        .and_then(|id| layout.get(id))
        .map(BlockBox::center)
        .or_else(|| header.map(|h| h.center()))?;
    Some(center - rail_height / 2.0)
}
