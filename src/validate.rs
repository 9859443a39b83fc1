//! Save-time validation.
//!
//! The editor only guarantees structural consistency. Whether a document is
//! complete enough to publish is decided here, before anything is sent.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use editor::block::BlockId;
use editor::document::Document;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("the assessment needs a title")]
    EmptyTitle,
    #[error("the assessment has no blocks")]
    NoBlocks,
    #[error("question {number} ({id}) needs a title")]
    UntitledQuestion { number: usize, id: BlockId },
}

/// Every problem that blocks a save, in document order.
#[must_use]
pub fn validate(doc: &Document) -> Vec<ValidationError> {
    let mut problems = Vec::new();
    if doc.header.title.trim().is_empty() {
        problems.push(ValidationError::EmptyTitle);
    }
    if doc.is_empty() {
        problems.push(ValidationError::NoBlocks);
    }
    for block in doc.blocks() {
        if !block.kind().is_question() || !block.title().trim().is_empty() {
            continue;
        }
        if let Some(number) = doc.question_number(&block.id) {
            problems.push(ValidationError::UntitledQuestion { number, id: block.id });
        }
    }
    problems
}
