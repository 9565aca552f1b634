//! Config sanitizer.
//!
//! Strips comments and redundant blank lines from the raw game config before
//! it is embedded into a binary's reserved slot. The smaller the sanitized
//! text, the more configs fit a slot whose capacity was fixed at build time.

use super::error::{ErrorExt, Result};
use std::path::Path;

/// Sanitizes raw config text for embedding.
///
/// Line endings are normalized to `\n`, each span from a `#` to the following
/// newline is removed (to end of text when no newline follows), and runs of
/// consecutive blank lines are collapsed to a single newline. No validation
/// of the remaining content is performed; an empty result is legal.
///
/// The function is pure and idempotent.
pub fn sanitize(raw: &str) -> String {
    let mut text = raw.replace("\r\n", "\n");

    // Strip comments, keeping the newline that ends each one.
    while let Some(begin) = text.find('#') {
        match text[begin..].find('\n') {
            Some(offset) => text.replace_range(begin..begin + offset, ""),
            None => text.truncate(begin),
        }
    }

    // Collapse blank-line runs.
    while text.contains("\n\n") {
        text = text.replace("\n\n", "\n");
    }

    text
}

/// Reads the config file at `path` and returns its sanitized text.
pub async fn load_sanitized(path: &Path) -> Result<String> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .fs_context("reading config file", path)?;
    Ok(sanitize(&raw))
}
