//! Block editor engine for authoring assessments.
//!
//! This crate is compiled to WebAssembly for the browser and as an `rlib` for
//! the command-line tool. It owns the document model and every editing rule:
//! structural edits, drag-to-reorder with its FLIP animation, per-field
//! formatting and list handling, the floating rail, and popovers. The host
//! renders the document, wires DOM events to the engine, and persists the
//! resulting [`wire::DocumentRecord`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Browser [`engine::Editor`] and testable [`engine::EditorCore`] |
//! | [`block`] | Block kinds and per-kind payloads |
//! | [`document`] | Header plus ordered blocks, and structural edits |
//! | [`drag`] | Drag-to-reorder state machine |
//! | [`flip`] | FLIP animation for committed reorders |
//! | [`layout`] | Host-reported block geometry and nearest-block lookup |
//! | [`format`] | Per-field formatting toggles |
//! | [`selection`] | Selection cache across toolbar clicks |
//! | [`text`] | List markers, links, and line breaks over field text |
//! | [`toolbar`] | Floating action rail |
//! | [`popover`] | Single open contextual menu |
//! | [`input`] | Input event types and render-visible UI state |
//! | [`wire`] | Record mapping for the persistence collaborator |
//! | [`dom`] | Measuring and mutating the rendered surface |
//! | [`consts`] | Animation timings, markers, and DOM attribute names |

pub mod block;
pub mod consts;
pub mod document;
pub mod dom;
pub mod drag;
pub mod engine;
pub mod flip;
pub mod format;
pub mod input;
pub mod layout;
pub mod popover;
pub mod selection;
pub mod text;
pub mod toolbar;
pub mod wire;
