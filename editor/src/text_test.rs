use super::*;

// =============================================================
// parse_marker
// =============================================================

#[test]
fn parse_bullet_markers() {
    for line in ["- a", "* a", "• a"] {
        let m = parse_marker(line).unwrap();
        assert_eq!(m.indent, 0);
        assert!(matches!(m.kind, MarkerKind::Bullet(_)));
        assert_eq!(&line[m.end()..], "a");
    }
}

#[test]
fn parse_numbered_marker_with_indent() {
    let m = parse_marker("  12. twelve").unwrap();
    assert_eq!(m.indent, 2);
    assert_eq!(m.kind, MarkerKind::Number(12));
    assert_eq!(m.end(), 6);
    assert_eq!(m.style(), ListStyle::Numbered);
}

#[test]
fn parse_rejects_non_markers() {
    assert!(parse_marker("").is_none());
    assert!(parse_marker("-no space").is_none());
    assert!(parse_marker("1.no space").is_none());
    assert!(parse_marker("plain text").is_none());
    assert!(parse_marker("3) paren").is_none());
}

// =============================================================
// apply_list_markers
// =============================================================

#[test]
fn bullets_prefix_current_line_only() {
    let edit = apply_list_markers("one\ntwo\nthree", 5..5, ListStyle::Bulleted);
    assert_eq!(edit.text, "one\n- two\nthree");
    assert_eq!(edit.selection, 7..7);
}

#[test]
fn numbers_prefix_each_selected_line() {
    let edit = apply_list_markers("a\nb\nc", 0..5, ListStyle::Numbered);
    assert_eq!(edit.text, "1. a\n2. b\n3. c");
}

#[test]
fn selection_ending_after_newline_skips_next_line() {
    let edit = apply_list_markers("a\nb\nc", 0..2, ListStyle::Bulleted);
    assert_eq!(edit.text, "- a\nb\nc");
}

#[test]
fn lines_with_other_marker_are_not_reprefixed() {
    let edit = apply_list_markers("- a\nb", 0..5, ListStyle::Numbered);
    assert_eq!(edit.text, "- a\n1. b");
}

#[test]
fn numbers_continue_from_line_above() {
    let edit = apply_list_markers("1. a\nb", 5..5, ListStyle::Numbered);
    assert_eq!(edit.text, "1. a\n2. b");
    assert_eq!(edit.selection, 8..8);
}

#[test]
fn numbers_continue_after_numbered_line_in_range() {
    let edit = apply_list_markers("x\n4. a\nb\nc", 0..10, ListStyle::Numbered);
    assert_eq!(edit.text, "1. x\n4. a\n5. b\n6. c");
}

#[test]
fn bullet_above_does_not_seed_numbers() {
    let edit = apply_list_markers("- a\nb", 4..4, ListStyle::Numbered);
    assert_eq!(edit.text, "- a\n1. b");
}

#[test]
fn empty_text_gets_a_marker() {
    let edit = apply_list_markers("", 0..0, ListStyle::Bulleted);
    assert_eq!(edit.text, "- ");
    assert_eq!(edit.selection, 2..2);
}

// =============================================================
// strip / clear
// =============================================================

#[test]
fn strip_removes_markers_on_every_line() {
    let edit = strip_list_markers("1. a\n2. b\n  - c\nplain", 0..0);
    assert_eq!(edit.text, "a\nb\n  c\nplain");
}

#[test]
fn strip_carries_caret() {
    // caret after "b" on the second line
    let edit = strip_list_markers("- a\n- b", 7..7);
    assert_eq!(edit.text, "a\nb");
    assert_eq!(edit.selection, 3..3);
}

#[test]
fn clear_unwraps_links_and_markers() {
    let edit = clear_formatting("- see [docs](http://x.y)\n[a](b) and [c](d)", 0..0);
    assert_eq!(edit.text, "see docs\na and c");
}

#[test]
fn clear_ignores_broken_links() {
    let text = "[open (no close\n[x]\n(y)";
    assert_eq!(clear_formatting(text, 0..0).text, text);
}

#[test]
fn clear_unwraps_only_the_inner_link_after_stray_bracket() {
    let edit = clear_formatting("[ foo [a](b)", 0..0);
    assert_eq!(edit.text, "[ foo a");
}

#[test]
fn clear_ignores_links_split_across_lines() {
    let text = "[a\n](b)";
    assert_eq!(clear_formatting(text, 0..0).text, text);
}

// =============================================================
// wrap_link
// =============================================================

#[test]
fn wrap_link_wraps_selection() {
    let edit = wrap_link("read the docs", 9..13, "http://d");
    assert_eq!(edit.text, "read the [docs](http://d)");
    assert_eq!(edit.selection, 25..25);
}

#[test]
fn wrap_link_on_empty_range_inserts_url_link() {
    let edit = wrap_link("go ", 3..3, "u");
    assert_eq!(edit.text, "go [u](u)");
}

// =============================================================
// line_break
// =============================================================

#[test]
fn numbered_line_continues_with_next_number() {
    let text = "1. first";
    let lb = line_break(text, text.len());
    assert_eq!(lb.text, "1. first\n2. ");
    assert_eq!(lb.caret, lb.text.len());
    assert_eq!(lb.continuation, Continuation::Continued);
}

#[test]
fn bare_bullet_line_exits_list() {
    let lb = line_break("- ", 2);
    assert_eq!(lb.text, "");
    assert_eq!(lb.caret, 0);
    assert_eq!(lb.continuation, Continuation::Exited);
}

#[test]
fn bare_numbered_line_after_items_exits_list() {
    let text = "1. a\n2. ";
    let lb = line_break(text, text.len());
    assert_eq!(lb.text, "1. a\n");
    assert_eq!(lb.caret, 5);
}

#[test]
fn star_bullet_is_normalized_before_continuing() {
    let text = "* milk";
    let lb = line_break(text, text.len());
    assert_eq!(lb.text, "- milk\n- ");
    assert_eq!(lb.caret, lb.text.len());
}

#[test]
fn dot_bullet_is_normalized_with_multibyte_glyph() {
    let text = "• eggs";
    let lb = line_break(text, text.len());
    assert_eq!(lb.text, "- eggs\n- ");
    assert_eq!(lb.caret, lb.text.len());
}

#[test]
fn break_mid_item_splits_content_onto_new_item() {
    let lb = line_break("- abcd", 4);
    assert_eq!(lb.text, "- ab\n- cd");
    assert_eq!(lb.caret, 7);
}

#[test]
fn indent_is_kept_on_continuation() {
    let text = "  3. c";
    let lb = line_break(text, text.len());
    assert_eq!(lb.text, "  3. c\n  4. ");
}

#[test]
fn plain_line_inserts_newline() {
    let lb = line_break("hello", 5);
    assert_eq!(lb.text, "hello\n");
    assert_eq!(lb.caret, 6);
    assert_eq!(lb.continuation, Continuation::Plain);
}

#[test]
fn caret_inside_marker_is_plain_break() {
    let lb = line_break("- item", 0);
    assert_eq!(lb.text, "\n- item");
    assert_eq!(lb.continuation, Continuation::Plain);
}

#[test]
fn only_caret_line_is_considered() {
    let text = "- a\nplain";
    let lb = line_break(text, text.len());
    assert_eq!(lb.text, "- a\nplain\n");
}
