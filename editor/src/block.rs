//! Block model: the closed set of block kinds and their per-kind payloads.
//!
//! A `Block` is one addressable unit of assessment content. Its identity is a
//! v4 UUID that stays stable for the block's lifetime; its payload is a tagged
//! `BlockBody` so every consumer matches exhaustively over the kinds. Adding a
//! kind means touching `BlockKind`, `BlockBody`, `Block::default_for`, the
//! editing operations in `document`, and the record mapping in `wire`.

#[cfg(test)]
#[path = "block_test.rs"]
mod block_test;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a block.
pub type BlockId = Uuid;

/// The kind of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    /// Single-line free-text answer.
    ShortAnswer,
    /// Multi-line free-text answer.
    Paragraph,
    /// Single-select choice among options.
    MultipleChoice,
    /// Multi-select choice among options.
    Checkboxes,
    /// Free-text answer checked against a stored answer.
    Identification,
    /// Ordered list of expected items.
    Enumeration,
    /// Left/right pairs to be matched.
    Matching,
    /// Heading with a description; not a question.
    TitleBlock,
    /// Embedded image.
    ImageBlock,
    /// Starts a new numbered section.
    SectionBreak,
}

impl BlockKind {
    /// Every kind, in type-picker order.
    pub const ALL: [Self; 10] = [
        Self::ShortAnswer,
        Self::Paragraph,
        Self::MultipleChoice,
        Self::Checkboxes,
        Self::Identification,
        Self::Enumeration,
        Self::Matching,
        Self::TitleBlock,
        Self::ImageBlock,
        Self::SectionBreak,
    ];

    /// Whether blocks of this kind are answerable questions.
    #[must_use]
    pub fn is_question(self) -> bool {
        !matches!(self, Self::TitleBlock | Self::ImageBlock | Self::SectionBreak)
    }

    /// Human-readable label for pickers and outlines.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ShortAnswer => "Short answer",
            Self::Paragraph => "Paragraph",
            Self::MultipleChoice => "Multiple choice",
            Self::Checkboxes => "Checkboxes",
            Self::Identification => "Identification",
            Self::Enumeration => "Enumeration",
            Self::Matching => "Matching",
            Self::TitleBlock => "Title and description",
            Self::ImageBlock => "Image",
            Self::SectionBreak => "Section",
        }
    }
}

/// One left/right pair of a matching question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
    pub left: String,
    pub right: String,
}

/// Which side of a matching pair an edit addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairSide {
    Left,
    Right,
}

/// Per-kind payload.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockBody {
    ShortAnswer {
        title: String,
        required: bool,
    },
    Paragraph {
        title: String,
        required: bool,
    },
    MultipleChoice {
        title: String,
        required: bool,
        options: Vec<String>,
        /// Index into `options`, if a correct answer is marked.
        correct_option: Option<usize>,
    },
    Checkboxes {
        title: String,
        required: bool,
        options: Vec<String>,
        /// Indices into `options` marked correct.
        correct_options: BTreeSet<usize>,
    },
    Identification {
        title: String,
        required: bool,
        answer: String,
    },
    Enumeration {
        title: String,
        required: bool,
        items: Vec<String>,
    },
    Matching {
        title: String,
        required: bool,
        pairs: Vec<MatchPair>,
    },
    TitleBlock {
        title: String,
        description: String,
    },
    ImageBlock {
        title: String,
        /// Reference returned by the upload collaborator.
        source: String,
        alt: String,
    },
    SectionBreak {
        title: String,
        description: String,
    },
}

/// A block: stable id plus payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    pub body: BlockBody,
}

impl Block {
    /// Build a block of `kind` with default payload.
    #[must_use]
    pub fn default_for(kind: BlockKind, id: BlockId) -> Self {
        let body = match kind {
            BlockKind::ShortAnswer => BlockBody::ShortAnswer { title: String::new(), required: false },
            BlockKind::Paragraph => BlockBody::Paragraph { title: String::new(), required: false },
            BlockKind::MultipleChoice => BlockBody::MultipleChoice {
                title: String::new(),
                required: false,
                options: vec![option_label(1)],
                correct_option: Some(0),
            },
            BlockKind::Checkboxes => BlockBody::Checkboxes {
                title: String::new(),
                required: false,
                options: vec![option_label(1)],
                correct_options: BTreeSet::new(),
            },
            BlockKind::Identification => {
                BlockBody::Identification { title: String::new(), required: false, answer: String::new() }
            }
            BlockKind::Enumeration => {
                BlockBody::Enumeration { title: String::new(), required: false, items: vec![item_label(1)] }
            }
            BlockKind::Matching => {
                BlockBody::Matching { title: String::new(), required: false, pairs: vec![MatchPair::default()] }
            }
            BlockKind::TitleBlock => BlockBody::TitleBlock { title: String::new(), description: String::new() },
            BlockKind::ImageBlock => {
                BlockBody::ImageBlock { title: String::new(), source: String::new(), alt: String::new() }
            }
            BlockKind::SectionBreak => {
                BlockBody::SectionBreak { title: String::new(), description: String::new() }
            }
        };
        Self { id, body }
    }

    /// Build a block of `kind` with a fresh random id.
    #[must_use]
    pub fn new(kind: BlockKind) -> Self {
        Self::default_for(kind, Uuid::new_v4())
    }

    #[must_use]
    pub fn kind(&self) -> BlockKind {
        match &self.body {
            BlockBody::ShortAnswer { .. } => BlockKind::ShortAnswer,
            BlockBody::Paragraph { .. } => BlockKind::Paragraph,
            BlockBody::MultipleChoice { .. } => BlockKind::MultipleChoice,
            BlockBody::Checkboxes { .. } => BlockKind::Checkboxes,
            BlockBody::Identification { .. } => BlockKind::Identification,
            BlockBody::Enumeration { .. } => BlockKind::Enumeration,
            BlockBody::Matching { .. } => BlockKind::Matching,
            BlockBody::TitleBlock { .. } => BlockKind::TitleBlock,
            BlockBody::ImageBlock { .. } => BlockKind::ImageBlock,
            BlockBody::SectionBreak { .. } => BlockKind::SectionBreak,
        }
    }

    /// Title text. Every kind carries one.
    #[must_use]
    pub fn title(&self) -> &str {
        match &self.body {
            BlockBody::ShortAnswer { title, .. }
            | BlockBody::Paragraph { title, .. }
            | BlockBody::MultipleChoice { title, .. }
            | BlockBody::Checkboxes { title, .. }
            | BlockBody::Identification { title, .. }
            | BlockBody::Enumeration { title, .. }
            | BlockBody::Matching { title, .. }
            | BlockBody::TitleBlock { title, .. }
            | BlockBody::ImageBlock { title, .. }
            | BlockBody::SectionBreak { title, .. } => title,
        }
    }

    pub fn title_mut(&mut self) -> &mut String {
        match &mut self.body {
            BlockBody::ShortAnswer { title, .. }
            | BlockBody::Paragraph { title, .. }
            | BlockBody::MultipleChoice { title, .. }
            | BlockBody::Checkboxes { title, .. }
            | BlockBody::Identification { title, .. }
            | BlockBody::Enumeration { title, .. }
            | BlockBody::Matching { title, .. }
            | BlockBody::TitleBlock { title, .. }
            | BlockBody::ImageBlock { title, .. }
            | BlockBody::SectionBreak { title, .. } => title,
        }
    }

    /// Description text, for kinds that carry one.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match &self.body {
            BlockBody::TitleBlock { description, .. } | BlockBody::SectionBreak { description, .. } => {
                Some(description)
            }
            _ => None,
        }
    }

    pub fn description_mut(&mut self) -> Option<&mut String> {
        match &mut self.body {
            BlockBody::TitleBlock { description, .. } | BlockBody::SectionBreak { description, .. } => {
                Some(description)
            }
            _ => None,
        }
    }

    /// The `required` flag, for question kinds.
    #[must_use]
    pub fn required(&self) -> Option<bool> {
        match &self.body {
            BlockBody::ShortAnswer { required, .. }
            | BlockBody::Paragraph { required, .. }
            | BlockBody::MultipleChoice { required, .. }
            | BlockBody::Checkboxes { required, .. }
            | BlockBody::Identification { required, .. }
            | BlockBody::Enumeration { required, .. }
            | BlockBody::Matching { required, .. } => Some(*required),
            BlockBody::TitleBlock { .. } | BlockBody::ImageBlock { .. } | BlockBody::SectionBreak { .. } => None,
        }
    }

    /// Set the `required` flag. Returns false for kinds without one.
    pub fn set_required(&mut self, value: bool) -> bool {
        match &mut self.body {
            BlockBody::ShortAnswer { required, .. }
            | BlockBody::Paragraph { required, .. }
            | BlockBody::MultipleChoice { required, .. }
            | BlockBody::Checkboxes { required, .. }
            | BlockBody::Identification { required, .. }
            | BlockBody::Enumeration { required, .. }
            | BlockBody::Matching { required, .. } => {
                *required = value;
                true
            }
            BlockBody::TitleBlock { .. } | BlockBody::ImageBlock { .. } | BlockBody::SectionBreak { .. } => false,
        }
    }

    /// Copy of this block under a new id.
    #[must_use]
    pub fn duplicate_as(&self, id: BlockId) -> Self {
        Self { id, body: self.body.clone() }
    }
}

/// Default text for the `n`th (1-based) choice option.
#[must_use]
pub fn option_label(n: usize) -> String {
    format!("Option {n}")
}

/// Default text for the `n`th (1-based) enumeration item.
#[must_use]
pub fn item_label(n: usize) -> String {
    format!("Item {n}")
}
