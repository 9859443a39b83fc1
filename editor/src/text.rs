//! Text-level list and link mutations for formattable fields.
//!
//! Everything here is a pure function over a field's text plus a byte range
//! or caret. Edits are expressed as a sorted list of splices so selections
//! can be carried across the rewrite with `shift`.
//!
//! Recognized line markers, after optional leading spaces/tabs:
//! - bullet: one of `-`, `*`, `•` followed by a space (canonical form `- `)
//! - numbered: one or more ASCII digits, `.`, then a space

#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;

use std::ops::Range;

use crate::consts::{BULLET_GLYPHS, CANONICAL_BULLET};
use crate::format::ListStyle;

/// Kind of a line-leading list marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Bullet(char),
    Number(u64),
}

/// A list marker found at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    /// Bytes of leading whitespace before the marker.
    pub indent: usize,
    /// Bytes of the marker itself, trailing space included.
    pub len: usize,
    pub kind: MarkerKind,
}

impl Marker {
    /// Offset, within the line, where the marker's content starts.
    #[must_use]
    pub fn end(&self) -> usize {
        self.indent + self.len
    }

    #[must_use]
    pub fn style(&self) -> ListStyle {
        match self.kind {
            MarkerKind::Bullet(_) => ListStyle::Bulleted,
            MarkerKind::Number(_) => ListStyle::Numbered,
        }
    }
}

/// Result of a text rewrite: new text and the selection carried across it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub text: String,
    pub selection: Range<usize>,
}

/// What a line-break did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Not a list line: a plain newline was inserted.
    Plain,
    /// A new marker was started on the following line.
    Continued,
    /// The line held only a marker; the marker was removed instead.
    Exited,
}

/// Result of handling a line-break at a caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBreak {
    pub text: String,
    pub caret: usize,
    pub continuation: Continuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Splice {
    at: usize,
    remove: usize,
    insert: String,
}

/// Parse a list marker at the start of `line`.
#[must_use]
pub fn parse_marker(line: &str) -> Option<Marker> {
    let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
    let rest = &line[indent..];
    let mut chars = rest.chars();
    let first = chars.next()?;

    if BULLET_GLYPHS.contains(&first) {
        return (chars.next() == Some(' ')).then(|| Marker {
            indent,
            len: first.len_utf8() + 1,
            kind: MarkerKind::Bullet(first),
        });
    }

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || !rest[digits..].starts_with(". ") {
        return None;
    }
    let Ok(n) = rest[..digits].parse::<u64>() else {
        return None;
    };
    Some(Marker { indent, len: digits + 2, kind: MarkerKind::Number(n) })
}

/// Byte offset of the start of the line containing `at`.
#[must_use]
pub fn line_start(text: &str, at: usize) -> usize {
    text[..at].rfind('\n').map_or(0, |i| i + 1)
}

/// Byte offset of the end of the line containing `at` (before its newline).
#[must_use]
pub fn line_end(text: &str, at: usize) -> usize {
    text[at..].find('\n').map_or(text.len(), |i| at + i)
}

/// Start offsets of every line touched by `range`. A selection that ends
/// right after a newline doesn't touch the following line.
fn touched_line_starts(text: &str, range: &Range<usize>) -> Vec<usize> {
    let last = if range.end > range.start && text[..range.end].ends_with('\n') {
        range.end - 1
    } else {
        range.end
    };
    let mut starts = vec![line_start(text, range.start)];
    starts.extend(text[range.start..last].match_indices('\n').map(|(i, _)| range.start + i + 1));
    starts
}

/// Start offsets of every line in `text`.
fn all_line_starts(text: &str) -> Vec<usize> {
    std::iter::once(0).chain(text.match_indices('\n').map(|(i, _)| i + 1)).collect()
}

/// Prefix each line touched by `range` with a `style` marker. Lines that
/// already carry a marker of either style are left alone. Numbered markers
/// continue from the numbered line directly above, or from an already
/// numbered line inside the range, and start at 1 otherwise.
#[must_use]
pub fn apply_list_markers(text: &str, range: Range<usize>, style: ListStyle) -> Edit {
    let starts = touched_line_starts(text, &range);
    let mut n = starts.first().map_or(0, |&first| number_above(text, first));
    let mut splices = Vec::new();
    for start in starts {
        match parse_marker(&text[start..line_end(text, start)]) {
            Some(Marker { kind: MarkerKind::Number(k), .. }) => n = k,
            Some(_) => {}
            None => {
                let insert = match style {
                    ListStyle::Bulleted => CANONICAL_BULLET.to_owned(),
                    ListStyle::Numbered => {
                        n = n.saturating_add(1);
                        format!("{n}. ")
                    }
                };
                splices.push(Splice { at: start, remove: 0, insert });
            }
        }
    }
    finish(text, &splices, range)
}

/// Number of the numbered line ending right before `start`, or 0.
fn number_above(text: &str, start: usize) -> u64 {
    let Some(prev_end) = start.checked_sub(1) else {
        return 0;
    };
    let prev = line_start(text, prev_end);
    match parse_marker(&text[prev..prev_end]) {
        Some(Marker { kind: MarkerKind::Number(k), .. }) => k,
        _ => 0,
    }
}

/// Remove the list marker from every line, keeping indentation.
#[must_use]
pub fn strip_list_markers(text: &str, selection: Range<usize>) -> Edit {
    let splices = marker_splices(text);
    finish(text, &splices, selection)
}

/// Strip list markers and unwrap `[label](url)` links to their label.
#[must_use]
pub fn clear_formatting(text: &str, selection: Range<usize>) -> Edit {
    let mut splices = marker_splices(text);
    splices.extend(
        find_links(text)
            .into_iter()
            .map(|(whole, label)| Splice { at: whole.start, remove: whole.len(), insert: text[label].to_owned() }),
    );
    splices.sort_by_key(|s| s.at);
    finish(text, &splices, selection)
}

/// Wrap `range` as a `[label](url)` link, or insert `[url](url)` at an empty
/// range. The selection collapses to just after the link.
#[must_use]
pub fn wrap_link(text: &str, range: Range<usize>, url: &str) -> Edit {
    let label = if range.is_empty() { url } else { &text[range.clone()] };
    let link = format!("[{label}]({url})");
    let caret = range.start + link.len();
    let splice = Splice { at: range.start, remove: range.len(), insert: link };
    Edit { text: apply(text, std::slice::from_ref(&splice)), selection: caret..caret }
}

/// Handle a line-break typed at `caret`.
///
/// On a list line the break continues the list: bulleted lines are first
/// normalized to the canonical glyph, numbered lines get `n + 1`. A list line
/// with nothing after its marker exits the list by dropping the marker.
#[must_use]
pub fn line_break(text: &str, caret: usize) -> LineBreak {
    let start = line_start(text, caret);
    let end = line_end(text, caret);
    let line = &text[start..end];

    let marker = parse_marker(line).filter(|m| caret >= start + m.end());
    let Some(marker) = marker else {
        return plain_break(text, caret);
    };

    if line[marker.end()..].trim().is_empty() {
        let at = start + marker.indent;
        let splice = Splice { at, remove: marker.len, insert: String::new() };
        return LineBreak {
            text: apply(text, std::slice::from_ref(&splice)),
            caret: at,
            continuation: Continuation::Exited,
        };
    }

    let indent = &line[..marker.indent];
    let mut splices = Vec::new();
    let next = match marker.kind {
        MarkerKind::Bullet(glyph) => {
            if glyph != '-' {
                splices.push(Splice {
                    at: start + marker.indent,
                    remove: marker.len,
                    insert: CANONICAL_BULLET.to_owned(),
                });
            }
            CANONICAL_BULLET.to_owned()
        }
        MarkerKind::Number(n) => format!("{}. ", n.saturating_add(1)),
    };
    let insert = format!("\n{indent}{next}");
    let inserted = insert.len();
    splices.push(Splice { at: caret, remove: 0, insert });

    let new_caret = shift(caret, &splices[..splices.len() - 1]) + inserted;
    LineBreak { text: apply(text, &splices), caret: new_caret, continuation: Continuation::Continued }
}

fn plain_break(text: &str, caret: usize) -> LineBreak {
    let splice = Splice { at: caret, remove: 0, insert: "\n".to_owned() };
    LineBreak { text: apply(text, std::slice::from_ref(&splice)), caret: caret + 1, continuation: Continuation::Plain }
}

fn marker_splices(text: &str) -> Vec<Splice> {
    all_line_starts(text)
        .into_iter()
        .filter_map(|start| {
            let marker = parse_marker(&text[start..line_end(text, start)])?;
            Some(Splice { at: start + marker.indent, remove: marker.len, insert: String::new() })
        })
        .collect()
}

/// Every `[label](url)` on a single line: (whole link range, label range).
fn find_links(text: &str) -> Vec<(Range<usize>, Range<usize>)> {
    let mut links = Vec::new();
    let mut from = 0;
    while let Some(rel) = text[from..].find('[') {
        let open = from + rel;
        from = open + 1;
        let Some(close) = text[open + 1..].find([']', '\n']).map(|i| open + 1 + i) else {
            break;
        };
        // Innermost `[` before the close bracket opens the label.
        let open = text[open..close].rfind('[').map_or(open, |i| open + i);
        if text.as_bytes()[close] != b']' || !text[close + 1..].starts_with('(') {
            continue;
        }
        let paren = close + 1;
        let Some(end) = text[paren + 1..].find([')', '\n']).map(|i| paren + 1 + i) else {
            break;
        };
        if text.as_bytes()[end] != b')' {
            continue;
        }
        links.push((open..end + 1, open + 1..close));
        from = end + 1;
    }
    links
}

fn finish(text: &str, splices: &[Splice], selection: Range<usize>) -> Edit {
    let start = shift(selection.start, splices);
    let end = shift(selection.end, splices).max(start);
    Edit { text: apply(text, splices), selection: start..end }
}

/// Apply sorted, non-overlapping splices.
fn apply(text: &str, splices: &[Splice]) -> String {
    let mut out = String::with_capacity(text.len() + splices.iter().map(|s| s.insert.len()).sum::<usize>());
    let mut cursor = 0;
    for s in splices {
        out.push_str(&text[cursor..s.at]);
        out.push_str(&s.insert);
        cursor = s.at + s.remove;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Map an offset in the original text to the rewritten text. An offset
/// inside a removed span lands after that splice's insertion.
fn shift(offset: usize, splices: &[Splice]) -> usize {
    let mut removed = 0;
    let mut inserted = 0;
    for s in splices.iter().take_while(|s| s.at <= offset) {
        removed += (offset - s.at).min(s.remove);
        inserted += s.insert.len();
    }
    offset - removed + inserted
}
