//! Record mapping for the persistence collaborator.
//!
//! A saved assessment is a flat, ordered list of [`BlockRecord`]s under a
//! [`DocumentRecord`]. Fields are optional so each kind only carries what it
//! defines. Choice answers travel as option *text*, not index; loading maps
//! them back by equality against the block's current options.

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::block::{Block, BlockBody, BlockId, BlockKind, MatchPair};
use crate::document::{Document, Header};

#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("duplicate block id {0}")]
    DuplicateId(BlockId),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// A saved document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub blocks: Vec<BlockRecord>,
}

/// One saved block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    pub id: BlockId,
    pub kind: BlockKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pairs: Option<Vec<MatchPair>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl BlockRecord {
    /// Bare record carrying only identity and kind.
    #[must_use]
    pub fn new(id: BlockId, kind: BlockKind) -> Self {
        Self {
            id,
            kind,
            title: None,
            required: None,
            options: None,
            correct_answer: None,
            correct_answers: None,
            answer: None,
            items: None,
            pairs: None,
            description: None,
            source: None,
            alt: None,
        }
    }
}

// =============================================================================
// Document -> records
// =============================================================================

#[must_use]
pub fn to_record(doc: &Document) -> DocumentRecord {
    DocumentRecord {
        title: doc.header.title.clone(),
        description: doc.header.description.clone(),
        blocks: doc.blocks().iter().map(block_record).collect(),
    }
}

fn block_record(block: &Block) -> BlockRecord {
    let mut record = BlockRecord::new(block.id, block.kind());
    record.title = Some(block.title().to_owned());
    record.required = block.required();
    match &block.body {
        BlockBody::MultipleChoice { options, correct_option, .. } => {
            record.correct_answer = correct_option.and_then(|i| options.get(i)).cloned();
            record.options = Some(options.clone());
        }
        BlockBody::Checkboxes { options, correct_options, .. } => {
            record.correct_answers = Some(correct_options.iter().filter_map(|&i| options.get(i)).cloned().collect());
            record.options = Some(options.clone());
        }
        BlockBody::Identification { answer, .. } => record.answer = Some(answer.clone()),
        BlockBody::Enumeration { items, .. } => record.items = Some(items.clone()),
        BlockBody::Matching { pairs, .. } => record.pairs = Some(pairs.clone()),
        BlockBody::TitleBlock { description, .. } | BlockBody::SectionBreak { description, .. } => {
            record.description = Some(description.clone());
        }
        BlockBody::ImageBlock { source, alt, .. } => {
            record.source = Some(source.clone());
            record.alt = Some(alt.clone());
        }
        BlockBody::ShortAnswer { .. } | BlockBody::Paragraph { .. } => {}
    }
    record
}

// =============================================================================
// Records -> document
// =============================================================================

/// Hydrate a document. Missing fields fall back to the kind's defaults.
///
/// # Errors
///
/// Returns [`WireError::DuplicateId`] if two records share an id.
pub fn from_record(record: DocumentRecord) -> Result<Document, WireError> {
    let mut seen = HashSet::with_capacity(record.blocks.len());
    let mut blocks = Vec::with_capacity(record.blocks.len());
    for block in record.blocks {
        if !seen.insert(block.id) {
            return Err(WireError::DuplicateId(block.id));
        }
        blocks.push(hydrate(block));
    }
    let header = Header { title: record.title, description: record.description };
    Ok(Document::from_parts(header, blocks))
}

fn hydrate(record: BlockRecord) -> Block {
    let mut block = Block::default_for(record.kind, record.id);
    if let Some(title) = record.title {
        *block.title_mut() = title;
    }
    if let Some(value) = record.required {
        block.set_required(value);
    }
    match &mut block.body {
        BlockBody::MultipleChoice { options, correct_option, .. } => {
            if let Some(saved) = record.options {
                *options = saved;
            }
            *correct_option = if options.is_empty() {
                None
            } else {
                let found = record.correct_answer.as_deref().and_then(|text| position(options.as_slice(), text));
                if found.is_none() {
                    debug!(id = %record.id, "correct answer not among options; defaulting to first");
                }
                Some(found.unwrap_or(0))
            };
        }
        BlockBody::Checkboxes { options, correct_options, .. } => {
            if let Some(saved) = record.options {
                *options = saved;
            }
            *correct_options = record
                .correct_answers
                .unwrap_or_default()
                .iter()
                .filter_map(|text| position(options.as_slice(), text))
                .collect::<BTreeSet<_>>();
        }
        BlockBody::Identification { answer, .. } => {
            if let Some(saved) = record.answer {
                *answer = saved;
            }
        }
        BlockBody::Enumeration { items, .. } => {
            if let Some(saved) = record.items {
                *items = saved;
            }
        }
        BlockBody::Matching { pairs, .. } => {
            if let Some(saved) = record.pairs {
                *pairs = saved;
            }
        }
        BlockBody::TitleBlock { description, .. } | BlockBody::SectionBreak { description, .. } => {
            if let Some(saved) = record.description {
                *description = saved;
            }
        }
        BlockBody::ImageBlock { source, alt, .. } => {
            if let Some(saved) = record.source {
                *source = saved;
            }
            if let Some(saved) = record.alt {
                *alt = saved;
            }
        }
        BlockBody::ShortAnswer { .. } | BlockBody::Paragraph { .. } => {}
    }
    block
}

fn position(options: &[String], text: &str) -> Option<usize> {
    options.iter().position(|o| o == text)
}

// =============================================================================
// JSON
// =============================================================================

/// Serialize a document to pretty JSON.
///
/// # Errors
///
/// Returns [`WireError::Json`] if serialization fails.
pub fn to_json(doc: &Document) -> Result<String, WireError> {
    Ok(serde_json::to_string_pretty(&to_record(doc))?)
}

/// Parse and hydrate a document from JSON.
///
/// # Errors
///
/// Returns [`WireError::Json`] for malformed input or unknown kinds, and
/// [`WireError::DuplicateId`] for repeated ids.
pub fn from_json(raw: &str) -> Result<Document, WireError> {
    from_record(serde_json::from_str(raw)?)
}
