//! Literal text substitution in packaged artifacts.
//!
//! Used for the HTML template tokens (`$TITLE$`, `$LOADING$`) and for
//! retargeting filename references in the debug web page. Exact byte
//! matching only; no regex, no partial-match semantics.

use super::error::{ErrorExt, Result};
use std::path::Path;

/// Replaces every non-overlapping occurrence of `from` with `to` in the file
/// at `path` and writes the result back. Zero occurrences is a silent
/// success, not an error.
pub async fn replace_in_file(path: &Path, from: &str, to: &str) -> Result<()> {
    let data = tokio::fs::read(path)
        .await
        .fs_context("reading file for text patch", path)?;

    let patched = replace_all(&data, from.as_bytes(), to.as_bytes());

    tokio::fs::write(path, patched)
        .await
        .fs_context("writing patched file", path)?;
    Ok(())
}

/// Byte-level global substitution. Artifacts are patched as bytes so that a
/// stray non-UTF-8 sequence elsewhere in the file cannot fail the patch.
fn replace_all(data: &[u8], from: &[u8], to: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut rest = data;
    while let Some(pos) = rest
        .windows(from.len())
        .position(|window| window == from)
    {
        out.extend_from_slice(&rest[..pos]);
        out.extend_from_slice(to);
        rest = &rest[pos + from.len()..];
    }
    out.extend_from_slice(rest);
    out
}
