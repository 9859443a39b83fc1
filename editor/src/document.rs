//! Document model: the header plus the ordered block sequence, and every
//! structural edit applied to it.
//!
//! Sequence order is semantic: it is the render order and it defines section
//! numbering. Block ids are unique within the sequence; every operation here
//! preserves that, and ids that don't resolve to a live block make an
//! operation a silent no-op rather than an error. Operations that target a
//! field the block's kind doesn't define are no-ops as well, reported through
//! a `false` / `None` return so callers can skip follow-up work.

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

use uuid::Uuid;

use crate::block::{Block, BlockBody, BlockId, BlockKind, MatchPair, PairSide, item_label, option_label};
use crate::format::{FormatField, FormatScope, FormatTarget};
use crate::layout::Side;

/// Document header. Not a block: it can't be moved, deleted, or merged into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    pub description: String,
}

/// The document being edited: header plus ordered blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub header: Header,
    blocks: Vec<Block>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with the given header text.
    #[must_use]
    pub fn with_header(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { header: Header { title: title.into(), description: description.into() }, blocks: Vec::new() }
    }

    /// Build from already-validated parts. Callers guarantee unique ids.
    pub(crate) fn from_parts(header: Header, blocks: Vec<Block>) -> Self {
        Self { header, blocks }
    }

    // --- Queries ---

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == *id)
    }

    pub fn get_mut(&mut self, id: &BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &BlockId) -> bool {
        self.index_of(id).is_some()
    }

    #[must_use]
    pub fn index_of(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == *id)
    }

    /// Block ids in sequence order.
    #[must_use]
    pub fn ids(&self) -> Vec<BlockId> {
        self.blocks.iter().map(|b| b.id).collect()
    }

    // --- Sequence edits ---

    /// Insert a default block of `kind` directly after `anchor`, or at the end
    /// when the anchor is absent or doesn't resolve. Returns the new id.
    pub fn insert_after(&mut self, anchor: Option<&BlockId>, kind: BlockKind) -> BlockId {
        let block = Block::new(kind);
        let id = block.id;
        let at = anchor.and_then(|a| self.index_of(a)).map_or(self.blocks.len(), |i| i + 1);
        self.blocks.insert(at, block);
        id
    }

    /// Deep-copy a block under a fresh id, placed right after the source.
    pub fn duplicate(&mut self, id: &BlockId) -> Option<BlockId> {
        let index = self.index_of(id)?;
        let copy = self.blocks[index].duplicate_as(Uuid::new_v4());
        let new_id = copy.id;
        self.blocks.insert(index + 1, copy);
        Some(new_id)
    }

    /// Remove a block, returning the index it occupied.
    pub fn delete(&mut self, id: &BlockId) -> Option<usize> {
        let index = self.index_of(id)?;
        self.blocks.remove(index);
        Some(index)
    }

    /// The block that should become active after a removal at `index`: the one
    /// now at `index`, else the one before it, else none.
    #[must_use]
    pub fn active_after_removal(&self, index: usize) -> Option<BlockId> {
        self.blocks
            .get(index)
            .or_else(|| index.checked_sub(1).and_then(|i| self.blocks.get(i)))
            .map(|b| b.id)
    }

    /// Replace a block with the default of `kind`, keeping its id and title.
    pub fn change_type(&mut self, id: &BlockId, kind: BlockKind) -> bool {
        let Some(block) = self.get_mut(id) else {
            return false;
        };
        let title = std::mem::take(block.title_mut());
        *block = Block::default_for(kind, *id);
        *block.title_mut() = title;
        true
    }

    /// Fold this block's description into the previous block's and remove it.
    ///
    /// Both blocks must carry a description field. Returns the id of the block
    /// that absorbed the text.
    pub fn merge_with_above(&mut self, id: &BlockId) -> Option<BlockId> {
        let index = self.index_of(id)?;
        let above = index.checked_sub(1)?;
        self.blocks[above].description()?;
        let moved = self.blocks[index].description()?.to_owned();

        self.blocks.remove(index);
        let target = &mut self.blocks[above];
        let target_id = target.id;
        if let Some(description) = target.description_mut() {
            if description.is_empty() {
                *description = moved;
            } else if !moved.is_empty() {
                description.push_str("\n\n");
                description.push_str(&moved);
            }
        }
        Some(target_id)
    }

    /// Move `dragged` so it sits directly above or below `target`.
    ///
    /// This is the one reorder primitive: remove, then reinsert, shifting the
    /// insertion index down by one when the removal happened before it.
    /// Returns false when either id is stale or both are the same block.
    pub fn move_block(&mut self, dragged: &BlockId, target: &BlockId, side: Side) -> bool {
        if dragged == target {
            return false;
        }
        let (Some(from), Some(to)) = (self.index_of(dragged), self.index_of(target)) else {
            return false;
        };
        let block = self.blocks.remove(from);
        let mut at = match side {
            Side::Above => to,
            Side::Below => to + 1,
        };
        if from < at {
            at -= 1;
        }
        self.blocks.insert(at, block);
        true
    }

    /// Move a block to the end of the sequence.
    pub fn move_to_end(&mut self, id: &BlockId) -> bool {
        let Some(from) = self.index_of(id) else {
            return false;
        };
        let block = self.blocks.remove(from);
        self.blocks.push(block);
        true
    }

    // --- Field edits ---

    pub fn set_header_title(&mut self, text: impl Into<String>) {
        self.header.title = text.into();
    }

    pub fn set_header_description(&mut self, text: impl Into<String>) {
        self.header.description = text.into();
    }

    pub fn set_title(&mut self, id: &BlockId, text: impl Into<String>) -> bool {
        let Some(block) = self.get_mut(id) else {
            return false;
        };
        *block.title_mut() = text.into();
        true
    }

    pub fn set_required(&mut self, id: &BlockId, required: bool) -> bool {
        self.get_mut(id).is_some_and(|b| b.set_required(required))
    }

    pub fn set_description(&mut self, id: &BlockId, text: impl Into<String>) -> bool {
        let Some(description) = self.get_mut(id).and_then(Block::description_mut) else {
            return false;
        };
        *description = text.into();
        true
    }

    /// Set the expected answer of an identification question.
    pub fn set_answer(&mut self, id: &BlockId, text: impl Into<String>) -> bool {
        match self.get_mut(id).map(|b| &mut b.body) {
            Some(BlockBody::Identification { answer, .. }) => {
                *answer = text.into();
                true
            }
            _ => false,
        }
    }

    /// Store an uploaded image reference and its alt text.
    pub fn set_image(&mut self, id: &BlockId, source: impl Into<String>, alt: impl Into<String>) -> bool {
        match self.get_mut(id).map(|b| &mut b.body) {
            Some(BlockBody::ImageBlock { source: s, alt: a, .. }) => {
                *s = source.into();
                *a = alt.into();
                true
            }
            _ => false,
        }
    }

    // --- Options / items / pairs ---

    /// Append a default-labelled entry to the block's list.
    pub fn add_option(&mut self, id: &BlockId) -> bool {
        let Some(block) = self.get_mut(id) else {
            return false;
        };
        match &mut block.body {
            BlockBody::MultipleChoice { options, .. } | BlockBody::Checkboxes { options, .. } => {
                options.push(option_label(options.len() + 1));
            }
            BlockBody::Enumeration { items, .. } => items.push(item_label(items.len() + 1)),
            BlockBody::Matching { pairs, .. } => pairs.push(MatchPair::default()),
            _ => return false,
        }
        true
    }

    /// Append an entry with the given text. For matching blocks the text
    /// becomes the left side of a new pair.
    pub fn add_option_with_text(&mut self, id: &BlockId, text: impl Into<String>) -> bool {
        let Some(block) = self.get_mut(id) else {
            return false;
        };
        let text = text.into();
        match &mut block.body {
            BlockBody::MultipleChoice { options, .. } | BlockBody::Checkboxes { options, .. } => options.push(text),
            BlockBody::Enumeration { items, .. } => items.push(text),
            BlockBody::Matching { pairs, .. } => pairs.push(MatchPair { left: text, right: String::new() }),
            _ => return false,
        }
        true
    }

    /// Replace the text of entry `index`. Matching blocks edit the left side.
    pub fn update_option_text(&mut self, id: &BlockId, index: usize, text: impl Into<String>) -> bool {
        let Some(block) = self.get_mut(id) else {
            return false;
        };
        let slot = match &mut block.body {
            BlockBody::MultipleChoice { options, .. } | BlockBody::Checkboxes { options, .. } => {
                options.get_mut(index)
            }
            BlockBody::Enumeration { items, .. } => items.get_mut(index),
            BlockBody::Matching { pairs, .. } => pairs.get_mut(index).map(|p| &mut p.left),
            _ => None,
        };
        let Some(slot) = slot else {
            return false;
        };
        *slot = text.into();
        true
    }

    /// Replace one side of a matching pair.
    pub fn update_pair(&mut self, id: &BlockId, index: usize, side: PairSide, text: impl Into<String>) -> bool {
        let Some(BlockBody::Matching { pairs, .. }) = self.get_mut(id).map(|b| &mut b.body) else {
            return false;
        };
        let Some(pair) = pairs.get_mut(index) else {
            return false;
        };
        match side {
            PairSide::Left => pair.left = text.into(),
            PairSide::Right => pair.right = text.into(),
        }
        true
    }

    /// Remove entry `index`, re-indexing correct-answer marks so none dangle.
    pub fn remove_option(&mut self, id: &BlockId, index: usize) -> bool {
        let Some(block) = self.get_mut(id) else {
            return false;
        };
        match &mut block.body {
            BlockBody::MultipleChoice { options, correct_option, .. } => {
                if index >= options.len() {
                    return false;
                }
                options.remove(index);
                *correct_option = match *correct_option {
                    _ if options.is_empty() => None,
                    Some(c) if c == index => Some(0),
                    Some(c) if c > index => Some(c - 1),
                    other => other,
                };
            }
            BlockBody::Checkboxes { options, correct_options, .. } => {
                if index >= options.len() {
                    return false;
                }
                options.remove(index);
                *correct_options = correct_options
                    .iter()
                    .filter(|&&c| c != index)
                    .map(|&c| if c > index { c - 1 } else { c })
                    .collect();
            }
            BlockBody::Enumeration { items, .. } => {
                if index >= items.len() {
                    return false;
                }
                items.remove(index);
            }
            BlockBody::Matching { pairs, .. } => {
                if index >= pairs.len() {
                    return false;
                }
                pairs.remove(index);
            }
            _ => return false,
        }
        true
    }

    /// Mark option `index` correct. Multiple choice replaces the mark,
    /// checkboxes add to the set.
    pub fn set_correct_option(&mut self, id: &BlockId, index: usize) -> bool {
        match self.get_mut(id).map(|b| &mut b.body) {
            Some(BlockBody::MultipleChoice { options, correct_option, .. }) if index < options.len() => {
                *correct_option = Some(index);
                true
            }
            Some(BlockBody::Checkboxes { options, correct_options, .. }) if index < options.len() => {
                correct_options.insert(index);
                true
            }
            _ => false,
        }
    }

    /// Flip option `index`. Checkboxes toggle membership; multiple choice is
    /// single-select, so the mark simply moves to `index`.
    pub fn toggle_correct_option(&mut self, id: &BlockId, index: usize) -> bool {
        match self.get_mut(id).map(|b| &mut b.body) {
            Some(BlockBody::MultipleChoice { options, correct_option, .. }) if index < options.len() => {
                *correct_option = Some(index);
                true
            }
            Some(BlockBody::Checkboxes { options, correct_options, .. }) if index < options.len() => {
                if !correct_options.remove(&index) {
                    correct_options.insert(index);
                }
                true
            }
            _ => false,
        }
    }

    // --- Derived numbering ---

    /// Section a block belongs to. The header opens section 1 and every
    /// section break opens the next one, itself included.
    #[must_use]
    pub fn section_number(&self, id: &BlockId) -> Option<usize> {
        self.section_numbers().into_iter().find(|(b, _)| b == id).map(|(_, n)| n)
    }

    /// Section number of every block, in order.
    #[must_use]
    pub fn section_numbers(&self) -> Vec<(BlockId, usize)> {
        let mut section = 1;
        self.blocks
            .iter()
            .map(|b| {
                if b.kind() == BlockKind::SectionBreak {
                    section += 1;
                }
                (b.id, section)
            })
            .collect()
    }

    /// 1-based running number of a question block. Non-questions are unnumbered.
    #[must_use]
    pub fn question_number(&self, id: &BlockId) -> Option<usize> {
        let mut n = 0;
        for block in &self.blocks {
            if block.kind().is_question() {
                n += 1;
                if block.id == *id {
                    return Some(n);
                }
            } else if block.id == *id {
                return None;
            }
        }
        None
    }

    // --- Formattable fields ---

    /// Text of the field a format target addresses, if it resolves.
    #[must_use]
    pub fn field(&self, target: &FormatTarget) -> Option<&str> {
        match target.scope {
            FormatScope::Header => Some(match target.field {
                FormatField::Title => self.header.title.as_str(),
                FormatField::Description => self.header.description.as_str(),
            }),
            FormatScope::Section | FormatScope::TitleBlock => {
                let block = self.get(target.block_id.as_ref()?)?;
                if !target.scope.accepts(block.kind()) {
                    return None;
                }
                match target.field {
                    FormatField::Title => Some(block.title()),
                    FormatField::Description => block.description(),
                }
            }
        }
    }

    pub fn field_mut(&mut self, target: &FormatTarget) -> Option<&mut String> {
        match target.scope {
            FormatScope::Header => Some(match target.field {
                FormatField::Title => &mut self.header.title,
                FormatField::Description => &mut self.header.description,
            }),
            FormatScope::Section | FormatScope::TitleBlock => {
                let block = self.get_mut(target.block_id.as_ref()?)?;
                if !target.scope.accepts(block.kind()) {
                    return None;
                }
                match target.field {
                    FormatField::Title => Some(block.title_mut()),
                    FormatField::Description => block.description_mut(),
                }
            }
        }
    }
}
