use uuid::Uuid;

use super::*;

fn header_title() -> FormatTarget {
    FormatTarget::header(FormatField::Title)
}

// =============================================================
// FormatMap toggles
// =============================================================

#[test]
fn absent_target_is_plain() {
    let map = FormatMap::new();
    assert!(map.get(&header_title()).is_plain());
    assert!(map.is_empty());
}

#[test]
fn toggle_bold_twice_round_trips() {
    let mut map = FormatMap::new();
    let t = header_title();
    let before = map.get(&t);
    assert!(map.toggle(t, FormatAttr::Bold).bold);
    let after = map.toggle(t, FormatAttr::Bold);
    assert_eq!(after, before);
    assert!(map.is_empty());
}

#[test]
fn toggles_are_independent() {
    let mut map = FormatMap::new();
    let t = header_title();
    map.toggle(t, FormatAttr::Bold);
    map.toggle(t, FormatAttr::Underline);
    let state = map.get(&t);
    assert!(state.has(FormatAttr::Bold));
    assert!(!state.has(FormatAttr::Italic));
    assert!(state.has(FormatAttr::Underline));
}

#[test]
fn targets_do_not_share_state() {
    let mut map = FormatMap::new();
    let id = Uuid::new_v4();
    let title = FormatTarget::title_block(id, FormatField::Title);
    let description = FormatTarget::title_block(id, FormatField::Description);
    map.toggle(title, FormatAttr::Italic);
    assert!(map.get(&title).italic);
    assert!(!map.get(&description).italic);
    assert!(!map.get(&header_title()).italic);
}

#[test]
fn set_list_then_clear_drops_entry() {
    let mut map = FormatMap::new();
    let t = header_title();
    assert_eq!(map.set_list(t, Some(ListStyle::Numbered)).list, Some(ListStyle::Numbered));
    assert_eq!(map.len(), 1);
    map.set_list(t, None);
    assert!(map.is_empty());
}

#[test]
fn clear_removes_everything() {
    let mut map = FormatMap::new();
    let t = header_title();
    map.toggle(t, FormatAttr::Bold);
    map.set_list(t, Some(ListStyle::Bulleted));
    map.clear(&t);
    assert!(map.get(&t).is_plain());
}

#[test]
fn forget_block_only_touches_that_block() {
    let mut map = FormatMap::new();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    map.toggle(FormatTarget::section(a, FormatField::Title), FormatAttr::Bold);
    map.toggle(FormatTarget::section(b, FormatField::Title), FormatAttr::Bold);
    map.toggle(header_title(), FormatAttr::Bold);
    map.forget_block(&a);
    assert_eq!(map.len(), 2);
    assert!(map.get(&FormatTarget::section(b, FormatField::Title)).bold);
}

// =============================================================
// Scope acceptance
// =============================================================

#[test]
fn scope_accepts_matching_kinds_only() {
    assert!(FormatScope::Section.accepts(BlockKind::SectionBreak));
    assert!(!FormatScope::Section.accepts(BlockKind::TitleBlock));
    assert!(FormatScope::TitleBlock.accepts(BlockKind::TitleBlock));
    assert!(!FormatScope::TitleBlock.accepts(BlockKind::ShortAnswer));
    assert!(!FormatScope::Header.accepts(BlockKind::TitleBlock));
}
