//! Per-field formatting toggles.
//!
//! Formatting is keyed by `FormatTarget`, the (scope, block, field) triple
//! that names one text field. Bold, italic, and underline are independent
//! flags; list style is at most one of bulleted or numbered. A target with no
//! entry in the map has no formatting, and entries that fall back to the
//! default are dropped so the map only holds formatted fields.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use std::collections::HashMap;

use crate::block::{BlockId, BlockKind};

/// Where a formattable field lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatScope {
    /// The document header (not a block).
    Header,
    /// A section-break block.
    Section,
    /// A title-and-description block.
    TitleBlock,
}

impl FormatScope {
    /// Whether a block of `kind` can be addressed through this scope.
    #[must_use]
    pub fn accepts(self, kind: BlockKind) -> bool {
        match self {
            Self::Header => false,
            Self::Section => kind == BlockKind::SectionBreak,
            Self::TitleBlock => kind == BlockKind::TitleBlock,
        }
    }
}

/// Which text field of the scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatField {
    Title,
    Description,
}

/// Identifies one formattable text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatTarget {
    pub scope: FormatScope,
    pub block_id: Option<BlockId>,
    pub field: FormatField,
}

impl FormatTarget {
    #[must_use]
    pub fn header(field: FormatField) -> Self {
        Self { scope: FormatScope::Header, block_id: None, field }
    }

    #[must_use]
    pub fn section(id: BlockId, field: FormatField) -> Self {
        Self { scope: FormatScope::Section, block_id: Some(id), field }
    }

    #[must_use]
    pub fn title_block(id: BlockId, field: FormatField) -> Self {
        Self { scope: FormatScope::TitleBlock, block_id: Some(id), field }
    }
}

/// Independent boolean text attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatAttr {
    Bold,
    Italic,
    Underline,
}

/// List mode of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    Bulleted,
    Numbered,
}

/// Formatting of one field.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatState {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub list: Option<ListStyle>,
}

impl FormatState {
    #[must_use]
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    #[must_use]
    pub fn has(&self, attr: FormatAttr) -> bool {
        match attr {
            FormatAttr::Bold => self.bold,
            FormatAttr::Italic => self.italic,
            FormatAttr::Underline => self.underline,
        }
    }

    fn flip(&mut self, attr: FormatAttr) {
        let flag = match attr {
            FormatAttr::Bold => &mut self.bold,
            FormatAttr::Italic => &mut self.italic,
            FormatAttr::Underline => &mut self.underline,
        };
        *flag = !*flag;
    }
}

/// Formatting of every field, keyed by target.
#[derive(Debug, Clone, Default)]
pub struct FormatMap {
    states: HashMap<FormatTarget, FormatState>,
}

impl FormatMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current formatting of a field; plain when absent.
    #[must_use]
    pub fn get(&self, target: &FormatTarget) -> FormatState {
        self.states.get(target).copied().unwrap_or_default()
    }

    /// Flip one boolean attribute, returning the new state.
    pub fn toggle(&mut self, target: FormatTarget, attr: FormatAttr) -> FormatState {
        self.update(target, |s| s.flip(attr))
    }

    /// Set or clear the list style, returning the new state.
    pub fn set_list(&mut self, target: FormatTarget, list: Option<ListStyle>) -> FormatState {
        self.update(target, |s| s.list = list)
    }

    /// Drop every attribute of a field.
    pub fn clear(&mut self, target: &FormatTarget) {
        self.states.remove(target);
    }

    /// Forget formatting for every field of a removed block.
    pub fn forget_block(&mut self, id: &BlockId) {
        self.states.retain(|t, _| t.block_id.as_ref() != Some(id));
    }

    /// Number of fields carrying formatting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn update(&mut self, target: FormatTarget, f: impl FnOnce(&mut FormatState)) -> FormatState {
        let mut state = self.get(&target);
        f(&mut state);
        if state.is_plain() {
            self.states.remove(&target);
        } else {
            self.states.insert(target, state);
        }
        state
    }
}
