//! Shared constants for the editor crate.

// ── Reorder animation ───────────────────────────────────────────

/// Duration of the slide-into-place animation after a reorder, in milliseconds.
pub const REORDER_ANIMATION_MS: f64 = 250.0;

/// CSS timing function matching [`crate::flip::ease_out_cubic`].
pub const REORDER_EASING_CSS: &str = "cubic-bezier(0.33, 1, 0.68, 1)";

/// Offsets below this many pixels are not worth animating.
pub const FLIP_MIN_OFFSET_PX: f64 = 0.5;

// ── Lists ───────────────────────────────────────────────────────

/// Glyphs recognized as bullet markers when followed by a space.
pub const BULLET_GLYPHS: [char; 3] = ['-', '*', '•'];

/// The bullet marker the editor writes.
pub const CANONICAL_BULLET: &str = "- ";

// ── Toolbar ─────────────────────────────────────────────────────

/// Height of the floating action rail, in CSS pixels.
pub const RAIL_HEIGHT_PX: f64 = 176.0;

/// Question kind inserted by the rail's add-question action.
pub const DEFAULT_QUESTION_KIND: crate::block::BlockKind = crate::block::BlockKind::MultipleChoice;

// ── DOM ─────────────────────────────────────────────────────────

/// Attribute the host puts on every rendered block element.
pub const BLOCK_ID_ATTR: &str = "data-block-id";

/// Attribute on the header element.
pub const HEADER_ATTR: &str = "data-editor-header";

/// Attribute on the floating drag ghost.
pub const GHOST_ATTR: &str = "data-drag-ghost";

/// Attribute on the clone that flies a dropped block into its slot.
pub const CLONE_ATTR: &str = "data-drag-clone";

/// Attribute marking the insertion line, valued `above` or `below`.
pub const INSERT_ATTR: &str = "data-insert";

/// Attribute on the floating action rail.
pub const RAIL_ATTR: &str = "data-editor-rail";

/// Attribute naming the formattable field a textarea edits.
pub const FIELD_ATTR: &str = "data-field";
