//! Plain-text outline of a document for `show`.

#[cfg(test)]
#[path = "outline_test.rs"]
mod outline_test;

use std::fmt::Write as _;

use editor::block::{Block, BlockBody};
use editor::document::Document;

#[must_use]
pub fn render(doc: &Document) -> String {
    let mut out = String::new();
    let title = if doc.header.title.is_empty() { "(untitled)" } else { doc.header.title.as_str() };
    line(&mut out, 0, &format!("# {title}"));
    if !doc.header.description.is_empty() {
        line(&mut out, 0, &doc.header.description);
    }
    for (id, section) in doc.section_numbers() {
        let Some(block) = doc.get(&id) else {
            continue;
        };
        let label = match doc.question_number(&id) {
            Some(n) => format!("Q{n}."),
            None => format!("[{}]", block.kind().label()),
        };
        let required = if block.required() == Some(true) { " *" } else { "" };
        line(&mut out, 0, &format!("§{section} {label} {}{required}  <{id}>", block.title()));
        details(&mut out, block);
    }
    out
}

fn details(out: &mut String, block: &Block) {
    match &block.body {
        BlockBody::MultipleChoice { options, correct_option, .. } => {
            for (i, option) in options.iter().enumerate() {
                let mark = if *correct_option == Some(i) { "(x)" } else { "( )" };
                line(out, 1, &format!("{i}: {mark} {option}"));
            }
        }
        BlockBody::Checkboxes { options, correct_options, .. } => {
            for (i, option) in options.iter().enumerate() {
                let mark = if correct_options.contains(&i) { "[x]" } else { "[ ]" };
                line(out, 1, &format!("{i}: {mark} {option}"));
            }
        }
        BlockBody::Identification { answer, .. } if !answer.is_empty() => line(out, 1, &format!("answer: {answer}")),
        BlockBody::Enumeration { items, .. } => {
            for (i, item) in items.iter().enumerate() {
                line(out, 1, &format!("{i}: {item}"));
            }
        }
        BlockBody::Matching { pairs, .. } => {
            for (i, pair) in pairs.iter().enumerate() {
                line(out, 1, &format!("{i}: {} = {}", pair.left, pair.right));
            }
        }
        BlockBody::TitleBlock { description, .. } | BlockBody::SectionBreak { description, .. }
            if !description.is_empty() =>
        {
            line(out, 1, description);
        }
        BlockBody::ImageBlock { source, .. } if !source.is_empty() => line(out, 1, &format!("image: {source}")),
        _ => {}
    }
}

fn line(out: &mut String, depth: usize, text: &str) {
    for (i, part) in text.lines().enumerate() {
        let indent = if i == 0 { depth * 4 } else { depth * 4 + 2 };
        // Writing to a String is infallible.
        if writeln!(out, "{:indent$}{part}", "").is_err() {
            return;
        }
    }
}
