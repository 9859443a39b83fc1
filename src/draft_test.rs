use std::path::PathBuf;

use editor::block::BlockKind;
use uuid::Uuid;

use super::*;

fn scratch_path() -> PathBuf {
    std::env::temp_dir().join(format!("quizboard-{}.json", Uuid::new_v4()))
}

#[tokio::test]
async fn saved_draft_loads_back() {
    let path = scratch_path();
    let mut doc = Document::with_header("Quiz 3", "Chapters 4-5");
    let mc = doc.insert_after(None, BlockKind::MultipleChoice);
    doc.set_title(&mc, "Capital of France?");
    doc.add_option_with_text(&mc, "Paris");
    doc.set_correct_option(&mc, 1);

    save(&path, &doc).await.unwrap();
    let loaded = load(&path).await.unwrap();
    tokio::fs::remove_file(&path).await.unwrap();

    assert_eq!(loaded, doc);
}

#[tokio::test]
async fn missing_draft_is_reported() {
    let path = scratch_path();
    assert!(matches!(load(&path).await, Err(CliError::NoDraft(_))));
}

#[tokio::test]
async fn malformed_draft_is_a_wire_error() {
    let path = scratch_path();
    tokio::fs::write(&path, "{ not json").await.unwrap();
    let result = load(&path).await;
    tokio::fs::remove_file(&path).await.unwrap();
    assert!(matches!(result, Err(CliError::Wire(_))));
}
