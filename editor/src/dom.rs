//! Browser side of the editor: measuring rendered blocks and applying the
//! presentational actions to the DOM.
//!
//! This is the only module that touches [`web_sys`]. Blocks are found by
//! their `data-block-id` attribute and measured relative to the surface
//! element, so every coordinate the engine sees is in surface space. Ghost
//! and clone elements are deep copies of a block with the id attribute
//! stripped, which keeps them out of measurement.
//!
//! All fallible DOM calls propagate `JsValue` errors up to [`apply`], which
//! logs and moves on to the next action.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

use tracing::warn;
use uuid::Uuid;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, HtmlTextAreaElement};

use crate::block::BlockId;
use crate::consts::{BLOCK_ID_ATTR, CLONE_ATTR, FIELD_ATTR, GHOST_ATTR, HEADER_ATTR, INSERT_ATTR, RAIL_ATTR};
use crate::engine::Action;
use crate::flip::Offset;
use crate::format::{FormatField, FormatScope, FormatTarget};
use crate::layout::{BlockBox, Extent, LayoutSnapshot, Point, Side};
use crate::selection::floor_boundary;

/// Convert client coordinates to surface coordinates.
#[must_use]
pub fn surface_point(surface: &HtmlElement, client_x: f64, client_y: f64) -> Point {
    let rect = surface.get_bounding_client_rect();
    Point::new(client_x - rect.left(), client_y - rect.top())
}

/// Measure every rendered block, in document order.
#[must_use]
pub fn measure_blocks(surface: &HtmlElement) -> LayoutSnapshot {
    let origin = surface.get_bounding_client_rect();
    let nodes = match surface.query_selector_all(&format!("[{BLOCK_ID_ATTR}]")) {
        Ok(nodes) => nodes,
        Err(e) => {
            warn!(error = ?e, "block query failed");
            return LayoutSnapshot::default();
        }
    };
    let mut boxes = Vec::new();
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i) else {
            continue;
        };
        let Some(el) = node.dyn_ref::<Element>() else {
            continue;
        };
        let Some(raw) = el.get_attribute(BLOCK_ID_ATTR) else {
            continue;
        };
        let Ok(id) = Uuid::parse_str(&raw) else {
            warn!(%raw, "block element with malformed id");
            continue;
        };
        let rect = el.get_bounding_client_rect();
        boxes.push(BlockBox::new(id, rect.top() - origin.top(), rect.height()).with_left(rect.left() - origin.left()));
    }
    LayoutSnapshot::new(boxes)
}

/// Measure the document header, if rendered.
#[must_use]
pub fn measure_header(surface: &HtmlElement) -> Option<Extent> {
    let header = match surface.query_selector(&format!("[{HEADER_ATTR}]")) {
        Ok(found) => found?,
        Err(e) => {
            warn!(error = ?e, "header query failed");
            return None;
        }
    };
    let origin = surface.get_bounding_client_rect();
    let rect = header.get_bounding_client_rect();
    Some(Extent::new(rect.top() - origin.top(), rect.height()))
}

/// Apply the presentational actions. Everything else is left to the caller.
pub fn apply(surface: &HtmlElement, actions: &[Action]) {
    for action in actions {
        if let Err(e) = apply_one(surface, action) {
            warn!(?action, error = ?e, "dom action failed");
        }
    }
}

fn apply_one(surface: &HtmlElement, action: &Action) -> Result<(), JsValue> {
    match action {
        Action::ShowGhost { id, at } => {
            let ghost = detached_copy(surface, id, GHOST_ATTR)?;
            if let Some(ghost) = ghost {
                let style = ghost.style();
                style.set_property("pointer-events", "none")?;
                style.set_property("opacity", "0.85")?;
                style.set_property("z-index", "20")?;
                place(&ghost, *at)?;
            }
        }
        Action::MoveGhost { at } => {
            if let Some(ghost) = find(surface, &format!("[{GHOST_ATTR}]"))? {
                place(&ghost, *at)?;
            }
        }
        Action::DestroyGhost => remove_all(surface, GHOST_ATTR)?,
        Action::HideBlock { id } => {
            if let Some(block) = find_block(surface, id)? {
                block.style().set_property("visibility", "hidden")?;
            }
        }
        Action::ShowBlock { id } => {
            if let Some(block) = find_block(surface, id)? {
                block.style().remove_property("visibility")?;
            }
        }
        Action::ShowInsertion { id, side } => {
            clear_attr(surface, INSERT_ATTR)?;
            if let Some(block) = find_block(surface, id)? {
                let value = match side {
                    Side::Above => "above",
                    Side::Below => "below",
                };
                block.set_attribute(INSERT_ATTR, value)?;
            }
        }
        Action::ClearInsertion => clear_attr(surface, INSERT_ATTR)?,
        Action::SetOffsets { offsets, duration_ms, easing } => set_offsets(surface, offsets, *duration_ms, easing)?,
        Action::ShowClone { id, at } => {
            if let Some(clone) = detached_copy(surface, id, CLONE_ATTR)? {
                clone.style().set_property("pointer-events", "none")?;
                place(&clone, *at)?;
            }
        }
        Action::MoveClone { to, duration_ms, easing } => {
            if let Some(clone) = find(surface, &format!("[{CLONE_ATTR}]"))? {
                let transition = format!("top {duration_ms}ms {easing}, left {duration_ms}ms {easing}");
                clone.style().set_property("transition", &transition)?;
                place(&clone, *to)?;
            }
        }
        Action::RemoveClone => remove_all(surface, CLONE_ATTR)?,
        Action::PositionRail { top } => {
            if let Some(rail) = find(surface, &format!("[{RAIL_ATTR}]"))? {
                rail.style().set_property("top", &px(*top))?;
            }
        }
        Action::ResizeField(target) => {
            if let Some(field) = find_field(surface, target)? {
                resize(&field)?;
            }
        }
        Action::SetFieldText { target, text, selection } => {
            if let Some(field) = find_field(surface, target)? {
                field.set_value(text);
                field.set_selection_range(utf16_offset(text, selection.start), utf16_offset(text, selection.end))?;
            }
        }
        Action::RestoreSelection { target, range } => {
            if let Some(field) = find_field(surface, target)? {
                let text = field.value();
                field.focus()?;
                field.set_selection_range(utf16_offset(&text, range.start), utf16_offset(&text, range.end))?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Absolutely positioned deep copy of a block, appended to the surface.
fn detached_copy(surface: &HtmlElement, id: &BlockId, marker: &str) -> Result<Option<HtmlElement>, JsValue> {
    let Some(block) = find_block(surface, id)? else {
        return Ok(None);
    };
    let copy: HtmlElement = block.clone_node_with_deep(true)?.dyn_into()?;
    copy.remove_attribute(BLOCK_ID_ATTR)?;
    copy.remove_attribute(INSERT_ATTR)?;
    copy.set_attribute(marker, "")?;
    let style = copy.style();
    style.remove_property("visibility")?;
    style.remove_property("transform")?;
    style.set_property("position", "absolute")?;
    style.set_property("margin", "0")?;
    style.set_property("width", &px(block.get_bounding_client_rect().width()))?;
    surface.append_child(&copy)?;
    Ok(Some(copy))
}

fn place(el: &HtmlElement, at: Point) -> Result<(), JsValue> {
    let style = el.style();
    style.set_property("left", &px(at.x))?;
    style.set_property("top", &px(at.y))
}

fn set_offsets(surface: &HtmlElement, offsets: &[Offset], duration_ms: f64, easing: &str) -> Result<(), JsValue> {
    let transition = if duration_ms > 0.0 { format!("transform {duration_ms}ms {easing}") } else { "none".to_owned() };
    for offset in offsets {
        let Some(block) = find_block(surface, &offset.id)? else {
            continue;
        };
        let style = block.style();
        style.set_property("transition", &transition)?;
        if offset.dy == 0.0 {
            style.remove_property("transform")?;
        } else {
            style.set_property("transform", &format!("translateY({})", px(offset.dy)))?;
        }
    }
    Ok(())
}

/// Fit a textarea's height to its content.
fn resize(field: &HtmlTextAreaElement) -> Result<(), JsValue> {
    let style = field.style();
    style.set_property("height", "auto")?;
    style.set_property("height", &format!("{}px", field.scroll_height()))
}

fn find(surface: &HtmlElement, selector: &str) -> Result<Option<HtmlElement>, JsValue> {
    let Some(el) = surface.query_selector(selector)? else {
        return Ok(None);
    };
    match el.dyn_into::<HtmlElement>() {
        Ok(el) => Ok(Some(el)),
        Err(_) => Ok(None),
    }
}

fn find_block(surface: &HtmlElement, id: &BlockId) -> Result<Option<HtmlElement>, JsValue> {
    find(surface, &format!("[{BLOCK_ID_ATTR}=\"{id}\"]"))
}

fn find_field(surface: &HtmlElement, target: &FormatTarget) -> Result<Option<HtmlTextAreaElement>, JsValue> {
    let selector = format!("textarea[{FIELD_ATTR}=\"{}\"]", field_key(target));
    let Some(el) = surface.query_selector(&selector)? else {
        return Ok(None);
    };
    match el.dyn_into::<HtmlTextAreaElement>() {
        Ok(field) => Ok(Some(field)),
        Err(_) => Ok(None),
    }
}

fn remove_all(surface: &HtmlElement, marker: &str) -> Result<(), JsValue> {
    let nodes = surface.query_selector_all(&format!("[{marker}]"))?;
    for i in 0..nodes.length() {
        if let Some(el) = nodes.item(i).as_ref().and_then(|n| n.dyn_ref::<Element>()) {
            el.remove();
        }
    }
    Ok(())
}

fn clear_attr(surface: &HtmlElement, attr: &str) -> Result<(), JsValue> {
    let nodes = surface.query_selector_all(&format!("[{attr}]"))?;
    for i in 0..nodes.length() {
        if let Some(el) = nodes.item(i).as_ref().and_then(|n| n.dyn_ref::<Element>()) {
            el.remove_attribute(attr)?;
        }
    }
    Ok(())
}

/// Value of the `data-field` attribute for a formattable field.
#[must_use]
pub fn field_key(target: &FormatTarget) -> String {
    let field = match target.field {
        FormatField::Title => "title",
        FormatField::Description => "description",
    };
    match (target.scope, target.block_id) {
        (FormatScope::Header, _) | (_, None) => format!("header:{field}"),
        (_, Some(id)) => format!("{id}:{field}"),
    }
}

#[must_use]
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// Byte offset in `text` of a DOM (UTF-16) offset. Offsets inside a
/// surrogate pair round up to the end of that char.
#[must_use]
pub fn byte_offset(text: &str, utf16: u32) -> usize {
    let mut units = 0_u32;
    for (i, ch) in text.char_indices() {
        if units >= utf16 {
            return i;
        }
        units += if ch.len_utf16() == 2 { 2 } else { 1 };
    }
    text.len()
}

/// DOM (UTF-16) offset of a byte offset in `text`.
#[must_use]
pub fn utf16_offset(text: &str, byte: usize) -> u32 {
    let byte = floor_boundary(text, byte);
    u32::try_from(text[..byte].encode_utf16().count()).unwrap_or(u32::MAX)
}
