//! Document edits driven from the command line.
//!
//! Each [`EditCommand`] maps onto one document operation. The editor treats
//! stale ids and edits a kind doesn't support as silent no-ops; here they are
//! reported, since a command-line user gets no other feedback.

#[cfg(test)]
#[path = "edit_test.rs"]
mod edit_test;

use clap::{Args, Subcommand};
use editor::block::{BlockId, BlockKind, PairSide};
use editor::document::Document;
use editor::layout::Side;
use tracing::info;

use crate::CliError;

#[derive(Subcommand, Debug, Clone)]
pub enum EditCommand {
    /// Set the assessment title and/or description.
    Header {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Insert a new block, after `--after` or at the end.
    Add {
        #[arg(value_parser = parse_kind)]
        kind: BlockKind,
        #[arg(long)]
        after: Option<BlockId>,
    },
    Duplicate {
        id: BlockId,
    },
    Remove {
        id: BlockId,
    },
    /// Change a block's kind, keeping its title.
    Retype {
        id: BlockId,
        #[arg(value_parser = parse_kind)]
        kind: BlockKind,
    },
    Title {
        id: BlockId,
        text: String,
    },
    Describe {
        id: BlockId,
        text: String,
    },
    Required {
        id: BlockId,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Expected answer of an identification question.
    Answer {
        id: BlockId,
        text: String,
    },
    /// Fold a title or section block's description into the one above it.
    Merge {
        id: BlockId,
    },
    Option(OptionCommand),
    Pair {
        id: BlockId,
        index: usize,
        #[arg(long)]
        left: Option<String>,
        #[arg(long)]
        right: Option<String>,
    },
    /// Reorder a block next to another one, or to the end.
    Move {
        id: BlockId,
        #[arg(long, conflicts_with_all = ["after", "to_end"])]
        before: Option<BlockId>,
        #[arg(long, conflicts_with = "to_end")]
        after: Option<BlockId>,
        #[arg(long, default_value_t = false)]
        to_end: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct OptionCommand {
    #[command(subcommand)]
    pub command: OptionSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum OptionSubcommand {
    /// Append an option, item, or pair.
    Add { id: BlockId, text: Option<String> },
    Set { id: BlockId, index: usize, text: String },
    Remove { id: BlockId, index: usize },
    /// Mark an option correct. Checkboxes toggle.
    Correct { id: BlockId, index: usize },
}

/// Parse a kebab-case kind name such as `multiple-choice`.
///
/// # Errors
///
/// Returns a message listing the valid names.
pub fn parse_kind(raw: &str) -> Result<BlockKind, String> {
    match serde_json::from_value(serde_json::Value::String(raw.trim().to_ascii_lowercase())) {
        Ok(kind) => Ok(kind),
        Err(_) => Err(format!("unknown block kind `{raw}`; expected one of: {}", kind_names().join(", "))),
    }
}

fn kind_names() -> Vec<String> {
    BlockKind::ALL
        .iter()
        .filter_map(|kind| match serde_json::to_value(kind) {
            Ok(serde_json::Value::String(name)) => Some(name),
            _ => None,
        })
        .collect()
}

/// Apply one command. Returns the block the user should look at next, if any.
///
/// # Errors
///
/// Returns [`CliError::UnknownBlock`] for ids not in the document and
/// [`CliError::NotApplicable`] when the block's kind has no such field.
pub fn apply(doc: &mut Document, command: EditCommand) -> Result<Option<BlockId>, CliError> {
    match command {
        EditCommand::Header { title, description } => {
            if let Some(title) = title {
                doc.set_header_title(title);
            }
            if let Some(description) = description {
                doc.set_header_description(description);
            }
            Ok(None)
        }
        EditCommand::Add { kind, after } => {
            if let Some(anchor) = &after {
                live(doc, anchor)?;
            }
            let id = doc.insert_after(after.as_ref(), kind);
            info!(%id, ?kind, "block added");
            Ok(Some(id))
        }
        EditCommand::Duplicate { id } => doc.duplicate(&id).map(Some).ok_or(CliError::UnknownBlock(id)),
        EditCommand::Remove { id } => {
            let index = doc.delete(&id).ok_or(CliError::UnknownBlock(id))?;
            Ok(doc.active_after_removal(index))
        }
        EditCommand::Retype { id, kind } => {
            require(doc.change_type(&id, kind), doc, id, "kind")?;
            Ok(Some(id))
        }
        EditCommand::Title { id, text } => {
            require(doc.set_title(&id, text), doc, id, "title")?;
            Ok(Some(id))
        }
        EditCommand::Describe { id, text } => {
            require(doc.set_description(&id, text), doc, id, "description")?;
            Ok(Some(id))
        }
        EditCommand::Required { id, value } => {
            require(doc.set_required(&id, value), doc, id, "required flag")?;
            Ok(Some(id))
        }
        EditCommand::Answer { id, text } => {
            require(doc.set_answer(&id, text), doc, id, "answer")?;
            Ok(Some(id))
        }
        EditCommand::Merge { id } => {
            live(doc, &id)?;
            doc.merge_with_above(&id).map(Some).ok_or(CliError::NotApplicable { id, what: "merge target" })
        }
        EditCommand::Option(option) => apply_option(doc, option.command),
        EditCommand::Pair { id, index, left, right } => {
            if let Some(text) = left {
                require(doc.update_pair(&id, index, PairSide::Left, text), doc, id, "pair")?;
            }
            if let Some(text) = right {
                require(doc.update_pair(&id, index, PairSide::Right, text), doc, id, "pair")?;
            }
            Ok(Some(id))
        }
        EditCommand::Move { id, before, after, to_end } => {
            live(doc, &id)?;
            let moved = match (before, after) {
                (Some(target), _) => reorder(doc, id, target, Side::Above)?,
                (None, Some(target)) => reorder(doc, id, target, Side::Below)?,
                (None, None) if to_end => doc.move_to_end(&id),
                (None, None) => return Err(CliError::MissingField("--before, --after, or --to-end")),
            };
            if moved {
                info!(%id, "block moved");
            }
            Ok(Some(id))
        }
    }
}

fn apply_option(doc: &mut Document, command: OptionSubcommand) -> Result<Option<BlockId>, CliError> {
    let (id, changed) = match command {
        OptionSubcommand::Add { id, text: Some(text) } => (id, doc.add_option_with_text(&id, text)),
        OptionSubcommand::Add { id, text: None } => (id, doc.add_option(&id)),
        OptionSubcommand::Set { id, index, text } => (id, doc.update_option_text(&id, index, text)),
        OptionSubcommand::Remove { id, index } => (id, doc.remove_option(&id, index)),
        OptionSubcommand::Correct { id, index } => (id, doc.toggle_correct_option(&id, index)),
    };
    require(changed, doc, id, "option")?;
    Ok(Some(id))
}

fn reorder(doc: &mut Document, id: BlockId, target: BlockId, side: Side) -> Result<bool, CliError> {
    live(doc, &target)?;
    Ok(doc.move_block(&id, &target, side))
}

fn live(doc: &Document, id: &BlockId) -> Result<(), CliError> {
    if doc.contains(id) { Ok(()) } else { Err(CliError::UnknownBlock(*id)) }
}

/// Turn a `false` from a document edit into the right error.
fn require(changed: bool, doc: &Document, id: BlockId, what: &'static str) -> Result<(), CliError> {
    if changed {
        return Ok(());
    }
    live(doc, &id)?;
    Err(CliError::NotApplicable { id, what })
}
