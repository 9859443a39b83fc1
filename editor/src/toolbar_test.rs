#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

#[test]
fn rail_actions_map_to_kinds() {
    assert_eq!(RailAction::AddQuestion.kind(), BlockKind::MultipleChoice);
    assert_eq!(RailAction::AddTitleBlock.kind(), BlockKind::TitleBlock);
    assert_eq!(RailAction::AddImage.kind(), BlockKind::ImageBlock);
    assert_eq!(RailAction::AddSection.kind(), BlockKind::SectionBreak);
}

#[test]
fn rail_centers_on_active_block() {
    let id = Uuid::new_v4();
    let layout = LayoutSnapshot::new(vec![BlockBox::new(id, 300.0, 200.0)]);
    let top = rail_top(Some(&id), &layout, Some(Extent::new(0.0, 100.0)), 100.0);
    assert_eq!(top, Some(350.0));
}

#[test]
fn rail_falls_back_to_header_without_active() {
    let layout = LayoutSnapshot::default();
    let top = rail_top(None, &layout, Some(Extent::new(20.0, 100.0)), 40.0);
    assert_eq!(top, Some(50.0));
}

#[test]
fn rail_falls_back_to_header_when_active_unmeasured() {
    let layout = LayoutSnapshot::default();
    let top = rail_top(Some(&Uuid::new_v4()), &layout, Some(Extent::new(0.0, 80.0)), 40.0);
    assert_eq!(top, Some(20.0));
}

#[test]
fn rail_without_anything_measured_is_none() {
    assert!(rail_top(None, &LayoutSnapshot::default(), None, 40.0).is_none());
}
