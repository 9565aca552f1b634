//! Reserved config slot patcher.
//!
//! Game binaries (and web memory images) are linked with a fixed-capacity
//! slot that holds the runtime config, so it can be swapped after the build
//! without relinking. The slot layout is:
//!
//! ```text
//! ###InternalConfig### <ASCII decimal capacity> 0x00 <capacity bytes of content>
//! ```
//!
//! Patching overwrites the leading `len(config) + 1` bytes of the content
//! region with the sanitized config plus a NUL terminator; everything beyond
//! is left untouched. The marker and size field survive, so a patched binary
//! can be patched again with an equal-or-smaller config.
//!
//! The rewrite is destructive and keeps no backup: it must only run on the
//! disposable copy already placed in the output tree, never on the canonical
//! build output.

use super::error::{Error, ErrorExt, Result};
use crate::bail;
use std::path::Path;

/// Literal marker that opens the reserved slot inside a binary.
pub const CONFIG_MARKER: &[u8] = b"###InternalConfig###";

/// Embeds `clean` into the reserved config slot of the file at `path`.
///
/// # Errors
///
/// - [`Error::MarkerNotFound`] if the file contains no slot marker.
/// - [`Error::ConfigTooLarge`] if `clean` exceeds the slot's declared
///   capacity; the file is left byte-for-byte unmodified.
/// - [`Error::Generic`] if the size field or slot extent is malformed.
pub async fn patch_config(path: &Path, clean: &str) -> Result<()> {
    let mut data = tokio::fs::read(path)
        .await
        .fs_context("reading binary for config patch", path)?;

    let content_start = splice_slot(&mut data, clean, path)?;
    log::debug!(
        "embedded {} config bytes at offset {} in {}",
        clean.len(),
        content_start,
        path.display()
    );

    tokio::fs::write(path, &data)
        .await
        .fs_context("writing patched binary", path)?;
    Ok(())
}

/// Locates the slot in `data`, validates capacity, and splices `clean` plus a
/// NUL terminator into the content region. Returns the content region offset.
fn splice_slot(data: &mut [u8], clean: &str, path: &Path) -> Result<usize> {
    let marker_pos = find(data, CONFIG_MARKER).ok_or_else(|| Error::MarkerNotFound {
        path: path.to_path_buf(),
    })?;

    let size_start = marker_pos + CONFIG_MARKER.len();
    let size_end = data[size_start..]
        .iter()
        .position(|&b| b == 0)
        .map(|offset| size_start + offset)
        .ok_or_else(|| Error::Generic(format!(
            "unterminated slot size field in {}",
            path.display()
        )))?;

    let capacity: usize = std::str::from_utf8(&data[size_start..size_end])
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| Error::Generic(format!(
            "malformed slot size field in {}",
            path.display()
        )))?;

    if clean.len() > capacity {
        return Err(Error::ConfigTooLarge {
            path: path.to_path_buf(),
            len: clean.len(),
            capacity,
        });
    }

    // The terminator may occupy the byte right after the capacity span when
    // the config fills the slot exactly.
    let content_start = size_end + 1;
    let span_end = content_start + capacity.max(clean.len() + 1);
    if span_end > data.len() {
        bail!("reserved slot in {} extends past end of file", path.display());
    }

    data[content_start..content_start + clean.len()].copy_from_slice(clean.as_bytes());
    data[content_start + clean.len()] = 0;
    Ok(content_start)
}

/// First occurrence of `needle` in `haystack`.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
