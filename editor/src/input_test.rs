use super::*;

#[test]
fn command_modifier_is_ctrl_or_meta() {
    assert!(!Modifiers::default().command());
    assert!(Modifiers { ctrl: true, ..Modifiers::default() }.command());
    assert!(Modifiers { meta: true, ..Modifiers::default() }.command());
    assert!(!Modifiers { shift: true, alt: true, ..Modifiers::default() }.command());
}

#[test]
fn key_names_compare_case_insensitively() {
    assert!(Key("Enter".into()).is("enter"));
    assert!(Key("B".into()).is("b"));
    assert!(!Key("Escape".into()).is("Enter"));
}

#[test]
fn ui_state_starts_empty() {
    let ui = UiState::default();
    assert!(ui.active_id.is_none());
    assert!(ui.focused.is_none());
    assert!(ui.drag.ghost.is_none());
    assert!(ui.rail_top.is_none());
    assert!(ui.popover.open().is_none());
}
