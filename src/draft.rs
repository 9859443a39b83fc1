//! Local draft file: the document as saved records, pretty-printed JSON.

#[cfg(test)]
#[path = "draft_test.rs"]
mod draft_test;

use std::path::Path;

use editor::document::Document;
use editor::wire;
use tracing::debug;

use crate::CliError;

/// Read and hydrate the draft at `path`.
///
/// # Errors
///
/// Returns [`CliError::NoDraft`] if the file doesn't exist, and IO or wire
/// errors otherwise.
pub async fn load(path: &Path) -> Result<Document, CliError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CliError::NoDraft(path.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    let doc = wire::from_json(&raw)?;
    debug!(path = %path.display(), blocks = doc.len(), "draft loaded");
    Ok(doc)
}

/// Write the draft to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns IO or serialization errors.
pub async fn save(path: &Path, doc: &Document) -> Result<(), CliError> {
    let mut json = wire::to_json(doc)?;
    json.push('\n');
    tokio::fs::write(path, json).await?;
    debug!(path = %path.display(), blocks = doc.len(), "draft saved");
    Ok(())
}
