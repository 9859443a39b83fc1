use editor::block::BlockBody;
use uuid::Uuid;

use super::*;

fn doc_with(kinds: &[BlockKind]) -> (Document, Vec<BlockId>) {
    let mut doc = Document::with_header("Quiz", "");
    let mut ids = Vec::new();
    for &kind in kinds {
        let id = doc.insert_after(ids.last(), kind);
        ids.push(id);
    }
    (doc, ids)
}

// =============================================================
// Kind names
// =============================================================

#[test]
fn kinds_parse_from_kebab_case() {
    assert_eq!(parse_kind("multiple-choice"), Ok(BlockKind::MultipleChoice));
    assert_eq!(parse_kind(" Section-Break "), Ok(BlockKind::SectionBreak));
    let err = parse_kind("essay").unwrap_err();
    assert!(err.contains("short-answer"));
    assert!(err.contains("image-block"));
}

// =============================================================
// Structure
// =============================================================

#[test]
fn add_inserts_after_anchor() {
    let (mut doc, ids) = doc_with(&[BlockKind::ShortAnswer, BlockKind::Paragraph]);
    let added = apply(&mut doc, EditCommand::Add { kind: BlockKind::Matching, after: Some(ids[0]) }).unwrap().unwrap();
    assert_eq!(doc.ids(), vec![ids[0], added, ids[1]]);
}

#[test]
fn add_after_unknown_block_fails() {
    let (mut doc, _) = doc_with(&[BlockKind::ShortAnswer]);
    let ghost = Uuid::new_v4();
    let result = apply(&mut doc, EditCommand::Add { kind: BlockKind::Paragraph, after: Some(ghost) });
    assert!(matches!(result, Err(CliError::UnknownBlock(id)) if id == ghost));
    assert_eq!(doc.len(), 1);
}

#[test]
fn remove_points_at_the_next_block() {
    let (mut doc, ids) = doc_with(&[BlockKind::ShortAnswer, BlockKind::Paragraph, BlockKind::Checkboxes]);
    assert_eq!(apply(&mut doc, EditCommand::Remove { id: ids[1] }).unwrap(), Some(ids[2]));
    assert_eq!(apply(&mut doc, EditCommand::Remove { id: ids[2] }).unwrap(), Some(ids[0]));
    assert_eq!(apply(&mut doc, EditCommand::Remove { id: ids[0] }).unwrap(), None);
}

#[test]
fn move_routes_through_reorder() {
    let (mut doc, ids) =
        doc_with(&[BlockKind::ShortAnswer, BlockKind::Paragraph, BlockKind::Checkboxes, BlockKind::Matching]);
    apply(&mut doc, EditCommand::Move { id: ids[2], before: Some(ids[0]), after: None, to_end: false }).unwrap();
    assert_eq!(doc.ids(), vec![ids[2], ids[0], ids[1], ids[3]]);

    apply(&mut doc, EditCommand::Move { id: ids[2], before: None, after: Some(ids[3]), to_end: false }).unwrap();
    assert_eq!(doc.ids(), vec![ids[0], ids[1], ids[3], ids[2]]);

    apply(&mut doc, EditCommand::Move { id: ids[0], before: None, after: None, to_end: true }).unwrap();
    assert_eq!(doc.ids(), vec![ids[1], ids[3], ids[2], ids[0]]);
}

#[test]
fn move_without_destination_is_rejected() {
    let (mut doc, ids) = doc_with(&[BlockKind::ShortAnswer, BlockKind::Paragraph]);
    let result = apply(&mut doc, EditCommand::Move { id: ids[0], before: None, after: None, to_end: false });
    assert!(matches!(result, Err(CliError::MissingField(_))));
    assert_eq!(doc.ids(), ids);
}

#[test]
fn merge_reports_missing_target() {
    let (mut doc, ids) = doc_with(&[BlockKind::ShortAnswer, BlockKind::TitleBlock]);
    let result = apply(&mut doc, EditCommand::Merge { id: ids[1] });
    assert!(matches!(result, Err(CliError::NotApplicable { what: "merge target", .. })));
    assert_eq!(doc.len(), 2);
}

#[test]
fn merge_folds_section_descriptions() {
    let (mut doc, ids) = doc_with(&[BlockKind::SectionBreak, BlockKind::SectionBreak]);
    apply(&mut doc, EditCommand::Describe { id: ids[1], text: "Part B".into() }).unwrap();
    assert_eq!(apply(&mut doc, EditCommand::Merge { id: ids[1] }).unwrap(), Some(ids[0]));
    assert_eq!(doc.ids(), vec![ids[0]]);
    assert_eq!(doc.get(&ids[0]).unwrap().description(), Some("Part B"));
}

// =============================================================
// Fields and options
// =============================================================

#[test]
fn unsupported_field_is_not_applicable() {
    let (mut doc, ids) = doc_with(&[BlockKind::ShortAnswer]);
    let result = apply(&mut doc, EditCommand::Describe { id: ids[0], text: "x".into() });
    assert!(matches!(result, Err(CliError::NotApplicable { what: "description", .. })));

    let result = apply(&mut doc, EditCommand::Option(OptionCommand {
        command: OptionSubcommand::Add { id: ids[0], text: None },
    }));
    assert!(matches!(result, Err(CliError::NotApplicable { what: "option", .. })));
}

#[test]
fn unknown_block_beats_not_applicable() {
    let (mut doc, _) = doc_with(&[BlockKind::ShortAnswer]);
    let ghost = Uuid::new_v4();
    let result = apply(&mut doc, EditCommand::Title { id: ghost, text: "x".into() });
    assert!(matches!(result, Err(CliError::UnknownBlock(_))));
}

#[test]
fn option_commands_edit_choices() {
    let (mut doc, ids) = doc_with(&[BlockKind::MultipleChoice]);
    let id = ids[0];
    let option = |command| EditCommand::Option(OptionCommand { command });

    apply(&mut doc, option(OptionSubcommand::Add { id, text: Some("Paris".into()) })).unwrap();
    apply(&mut doc, option(OptionSubcommand::Set { id, index: 0, text: "Lyon".into() })).unwrap();
    apply(&mut doc, option(OptionSubcommand::Correct { id, index: 1 })).unwrap();
    assert!(matches!(
        &doc.get(&id).unwrap().body,
        BlockBody::MultipleChoice { options, correct_option: Some(1), .. } if options == &["Lyon", "Paris"]
    ));

    apply(&mut doc, option(OptionSubcommand::Remove { id, index: 0 })).unwrap();
    assert!(matches!(
        &doc.get(&id).unwrap().body,
        BlockBody::MultipleChoice { options, correct_option: Some(0), .. } if options == &["Paris"]
    ));

    let result = apply(&mut doc, option(OptionSubcommand::Correct { id, index: 5 }));
    assert!(matches!(result, Err(CliError::NotApplicable { .. })));
}

#[test]
fn pair_sets_either_side() {
    let (mut doc, ids) = doc_with(&[BlockKind::Matching]);
    apply(&mut doc, EditCommand::Pair { id: ids[0], index: 0, left: Some("H2O".into()), right: Some("water".into()) })
        .unwrap();
    let BlockBody::Matching { pairs, .. } = &doc.get(&ids[0]).unwrap().body else {
        panic!("expected matching");
    };
    assert_eq!(pairs[0].left, "H2O");
    assert_eq!(pairs[0].right, "water");
}

#[test]
fn header_updates_only_given_fields() {
    let mut doc = Document::with_header("Old", "Keep");
    apply(&mut doc, EditCommand::Header { title: Some("New".into()), description: None }).unwrap();
    assert_eq!(doc.header.title, "New");
    assert_eq!(doc.header.description, "Keep");
}

#[test]
fn retype_keeps_the_title() {
    let (mut doc, ids) = doc_with(&[BlockKind::ShortAnswer]);
    apply(&mut doc, EditCommand::Title { id: ids[0], text: "Capital?".into() }).unwrap();
    apply(&mut doc, EditCommand::Retype { id: ids[0], kind: BlockKind::Identification }).unwrap();
    let block = doc.get(&ids[0]).unwrap();
    assert_eq!(block.kind(), BlockKind::Identification);
    assert_eq!(block.title(), "Capital?");
}
