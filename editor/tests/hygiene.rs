//! Hygiene checks over the editor's production sources.
//!
//! Each antipattern has a budget, ideally zero. The budget never grows: to
//! add one occurrence, remove another first.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

// Panics.
const MAX_UNWRAP: usize = 0;
const MAX_EXPECT: usize = 0;
const MAX_PANIC: usize = 0;
const MAX_UNREACHABLE: usize = 0;
const MAX_TODO: usize = 0;
const MAX_UNIMPLEMENTED: usize = 0;

// Silent loss.
const MAX_SILENT_DISCARD: usize = 0;
const MAX_DOT_OK: usize = 0;

// Structure.
const MAX_ALLOW_DEAD_CODE: usize = 0;
const MAX_PRINTLN: usize = 0;

/// Modules allowed to reach into the browser.
const DOM_MODULES: [&str; 2] = ["dom.rs", "engine.rs"];

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files under `src/`, skipping `*_test.rs`.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file
                .content
                .lines()
                .filter(|line| !line.trim_start().starts_with("//"))
                .filter(|line| line.contains(pattern))
                .count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn check(pattern: &str, max: usize) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the editor crate root");
    let found = hits(&files, pattern);
    let count: usize = found.iter().map(|(_, c)| c).sum();
    let listing = found
        .iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(count <= max, "`{pattern}` budget exceeded: found {count}, max {max}.\n{listing}");
}

// =============================================================
// Panics
// =============================================================

#[test]
fn unwrap_budget() {
    check(".unwrap()", MAX_UNWRAP);
}

#[test]
fn expect_budget() {
    check(".expect(", MAX_EXPECT);
}

#[test]
fn panic_budget() {
    check("panic!(", MAX_PANIC);
}

#[test]
fn unreachable_budget() {
    check("unreachable!(", MAX_UNREACHABLE);
}

#[test]
fn todo_budget() {
    check("todo!(", MAX_TODO);
}

#[test]
fn unimplemented_budget() {
    check("unimplemented!(", MAX_UNIMPLEMENTED);
}

// =============================================================
// Silent loss
// =============================================================

#[test]
fn silent_discard_budget() {
    check("let _ =", MAX_SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    check(".ok()", MAX_DOT_OK);
}

// =============================================================
// Structure
// =============================================================

#[test]
fn allow_dead_code_budget() {
    check("#[allow(dead_code)]", MAX_ALLOW_DEAD_CODE);
}

#[test]
fn println_budget() {
    check("println!(", MAX_PRINTLN);
}

#[test]
fn browser_access_stays_in_host_modules() {
    let offenders: Vec<String> = source_files()
        .into_iter()
        .filter(|file| !DOM_MODULES.iter().any(|m| file.path.ends_with(m)))
        .filter(|file| file.content.contains("web_sys"))
        .map(|file| file.path)
        .collect();
    assert!(offenders.is_empty(), "web_sys used outside the host modules: {offenders:?}");
}
