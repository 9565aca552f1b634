//! File system utilities for packaging.
//!
//! Safe copy operations with automatic parent directory creation. Recursive
//! work is offloaded to the blocking thread pool.

use crate::bail;
use crate::packager::error::{Error, ErrorExt, Result};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Copies a regular file, creating any parent directories of the destination
/// path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        bail!("{} does not exist", from.display());
    }
    if !from.is_file() {
        bail!("{} is not a file", from.display());
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating destination directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file", to)?;
    Ok(())
}

/// Recursively copies a directory tree, creating any parent directories of
/// the destination path as necessary.
///
/// Fails if the source path is not a directory or doesn't exist.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        bail!("{} does not exist", from.display());
    }
    if !from.is_dir() {
        bail!("{} is not a directory", from.display());
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent)
                .fs_context("creating destination parent", parent)?;
        }

        for entry in walkdir::WalkDir::new(&from) {
            let entry = entry?;
            let rel_path = entry.path().strip_prefix(&from)?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path)
                    .fs_context("creating directory", &dest_path)?;
            } else {
                std::fs::copy(entry.path(), &dest_path)
                    .fs_context("copying file", &dest_path)?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| Error::Generic(format!("directory copy task panicked: {}", e)))?
}

/// Removes the directory and its contents if it exists. Idempotent.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Lists the names of the top-level entries of a directory, sorted. No
/// recursion.
pub async fn list_entry_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let mut entries = fs::read_dir(dir)
        .await
        .fs_context("listing directory", dir)?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("listing directory", dir)?
    {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

/// Owned path helper used by recipes when renaming binaries into the output
/// tree: `<dir>/<name><suffix>`.
pub fn named(dir: &Path, name: &str, suffix: &str) -> PathBuf {
    dir.join(format!("{}{}", name, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn copy_dir_preserves_nesting() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("res");
        std::fs::create_dir_all(src.join("maps")).unwrap();
        std::fs::write(src.join("readme.txt"), "hi").unwrap();
        std::fs::write(src.join("maps/town.map"), "map").unwrap();

        let dst = dir.path().join("out/Data");
        copy_dir(&src, &dst).await.unwrap();

        assert_eq!(std::fs::read_to_string(dst.join("readme.txt")).unwrap(), "hi");
        assert_eq!(
            std::fs::read_to_string(dst.join("maps/town.map")).unwrap(),
            "map"
        );
    }

    #[tokio::test]
    async fn copy_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("FOnline.exe");
        std::fs::write(&src, "bin").unwrap();

        let dst = dir.path().join("out/Game/Game.exe");
        copy_file(&src, &dst).await.unwrap();
        assert_eq!(std::fs::read_to_string(&dst).unwrap(), "bin");
    }

    #[tokio::test]
    async fn copy_file_rejects_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_file(&dir.path().join("absent"), &dir.path().join("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Generic(_)));
    }

    #[tokio::test]
    async fn remove_dir_all_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone");
        remove_dir_all(&path).await.unwrap();
        std::fs::create_dir(&path).unwrap();
        remove_dir_all(&path).await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn entry_names_are_sorted_and_shallow() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("a")).unwrap();
        std::fs::write(dir.path().join("a/nested.txt"), "").unwrap();

        let names = list_entry_names(dir.path()).await.unwrap();
        assert_eq!(names, vec!["a".to_string(), "b.txt".to_string()]);
    }
}
