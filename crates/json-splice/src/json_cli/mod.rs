//! Text-level helpers used by the `json-splice` binary.

use json_splice_value::Value;
use thiserror::Error;

use crate::json_patch::{apply_patch, from_json_patch, PatchError};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Patch(#[from] PatchError),
}

// ── json-splice ───────────────────────────────────────────────────────────

/// Applies the JSON Patch text `patch_json` to the document text `doc_json`
/// and returns the result pretty-printed.
pub fn apply_json_patch(doc_json: &str, patch_json: &str) -> Result<String, CliError> {
    let doc: Value = serde_json::from_str(doc_json)?;
    let patch: serde_json::Value = serde_json::from_str(patch_json)?;
    let ops = from_json_patch(&patch)?;
    let result = apply_patch(&doc, &ops)?;
    Ok(serde_json::to_string_pretty(&result)?)
}
