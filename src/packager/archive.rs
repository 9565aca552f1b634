//! Archive builders for distributable packages.
//!
//! Produces the zip used by the Windows package and the tar/tar.gz pairs used
//! by the Linux and Mac packages. Archive construction is blocking work and
//! runs under `spawn_blocking`.

use super::error::{Error, ErrorExt, Result};
use flate2::{Compression, write::GzEncoder};
use std::{
    fs::File,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};
use tar::HeaderMode;
use walkdir::WalkDir;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Compression framing for [`make_tar`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TarCompression {
    /// Plain uncompressed tar.
    Plain,
    /// Gzip-compressed tar.
    Gzip,
}

/// Creates a deflate-compressed zip of every file under `source_dir`.
///
/// Entry names are the paths relative to `source_dir`, `/`-separated. The
/// entry set is the full tree walk; ordering follows traversal order.
pub async fn make_zip(archive_path: &Path, source_dir: &Path) -> Result<PathBuf> {
    let archive_path = archive_path.to_path_buf();
    let source_dir = source_dir.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let file = File::create(&archive_path)
            .fs_context("creating zip archive", &archive_path)?;
        let mut zip = ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in WalkDir::new(&source_dir) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let rel_path = entry.path().strip_prefix(&source_dir)?;
            zip.start_file(zip_entry_name(rel_path), options)?;

            let mut src = File::open(entry.path())
                .fs_context("opening file for zip entry", entry.path())?;
            let mut buf = Vec::new();
            src.read_to_end(&mut buf)?;
            zip.write_all(&buf)?;
        }

        zip.finish()?;
        Ok(archive_path)
    })
    .await
    .map_err(|e| Error::Generic(format!("zip task panicked: {}", e)))?
}

/// Creates a tar (optionally gzip-compressed) of `source_dir`.
///
/// The archive contains the directory itself as its single top-level entry,
/// named by the last path segment of `source_dir`, so it unpacks into a
/// named folder. Every entry's permission bits are forced to `0o777` so the
/// archive is portable regardless of the origin filesystem's permissions.
pub async fn make_tar(
    archive_path: &Path,
    source_dir: &Path,
    compression: TarCompression,
) -> Result<PathBuf> {
    let archive_path = archive_path.to_path_buf();
    let source_dir = source_dir.to_path_buf();

    let folder = source_dir
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| Error::Generic(format!(
            "tar source {} has no final path segment",
            source_dir.display()
        )))?;

    tokio::task::spawn_blocking(move || {
        let file = File::create(&archive_path)
            .fs_context("creating tar archive", &archive_path)?;

        match compression {
            TarCompression::Plain => {
                let mut tar = tar::Builder::new(file);
                append_tree(&mut tar, &source_dir, &folder)?;
                let mut inner = tar.into_inner()?;
                inner.flush()?;
            }
            TarCompression::Gzip => {
                let enc = GzEncoder::new(file, Compression::default());
                let mut tar = tar::Builder::new(enc);
                append_tree(&mut tar, &source_dir, &folder)?;
                let enc = tar.into_inner()?;
                let mut inner = enc.finish()?;
                inner.flush()?;
            }
        }

        Ok(archive_path)
    })
    .await
    .map_err(|e| Error::Generic(format!("tar task panicked: {}", e)))?
}

/// Appends `source_dir` to the tar under the top-level name `folder`, with
/// all permission bits normalized to fully open.
fn append_tree<W: Write>(
    tar: &mut tar::Builder<W>,
    source_dir: &Path,
    folder: &Path,
) -> Result<()> {
    for entry in WalkDir::new(source_dir) {
        let entry = entry?;
        let rel_path = entry.path().strip_prefix(source_dir)?;
        let entry_path = folder.join(rel_path);

        let metadata = std::fs::metadata(entry.path())
            .fs_context("reading metadata for tar entry", entry.path())?;

        let mut header = tar::Header::new_gnu();
        header.set_metadata_in_mode(&metadata, HeaderMode::Deterministic);
        header.set_mode(0o777);

        if entry.file_type().is_dir() {
            tar.append_data(&mut header, &entry_path, &mut io::empty())?;
        } else {
            let mut file = File::open(entry.path())
                .fs_context("opening file for tar entry", entry.path())?;
            tar.append_data(&mut header, &entry_path, &mut file)?;
        }
    }
    Ok(())
}

/// Zip entry names are `/`-separated regardless of host platform.
fn zip_entry_name(rel_path: &Path) -> String {
    rel_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::collections::BTreeSet;

    fn sample_tree(root: &Path) {
        std::fs::create_dir_all(root.join("a/b")).unwrap();
        std::fs::write(root.join("a/x.txt"), "x").unwrap();
        std::fs::write(root.join("a/b/y.txt"), "yy").unwrap();
    }

    #[tokio::test]
    async fn zip_contains_exactly_the_tree_files() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        sample_tree(&src);
        let archive = dir.path().join("out.zip");

        make_zip(&archive, &src).await.unwrap();

        let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        let names: BTreeSet<String> = (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(
            names,
            BTreeSet::from(["a/x.txt".to_string(), "a/b/y.txt".to_string()])
        );
    }

    #[tokio::test]
    async fn zip_entries_round_trip_content() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        sample_tree(&src);
        let archive = dir.path().join("out.zip");

        make_zip(&archive, &src).await.unwrap();

        let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        let mut content = String::new();
        zip.by_name("a/b/y.txt")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "yy");
    }

    #[tokio::test]
    async fn tar_is_rooted_at_the_source_folder_name() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("Game");
        sample_tree(&src);
        let archive = dir.path().join("Game.tar");

        make_tar(&archive, &src, TarCompression::Plain).await.unwrap();

        let mut tar = tar::Archive::new(File::open(&archive).unwrap());
        let mut top_level = BTreeSet::new();
        for entry in tar.entries().unwrap() {
            let entry = entry.unwrap();
            let path = entry.path().unwrap().into_owned();
            let first = path.components().next().unwrap();
            top_level.insert(first.as_os_str().to_string_lossy().into_owned());
            assert_eq!(entry.header().mode().unwrap() & 0o777, 0o777);
        }
        assert_eq!(top_level, BTreeSet::from(["Game".to_string()]));
    }

    #[tokio::test]
    async fn gzip_tar_unpacks_to_the_same_tree() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("Game");
        sample_tree(&src);
        let archive = dir.path().join("Game.tar.gz");

        make_tar(&archive, &src, TarCompression::Gzip).await.unwrap();

        let mut tar = tar::Archive::new(GzDecoder::new(File::open(&archive).unwrap()));
        let unpack = dir.path().join("unpacked");
        tar.unpack(&unpack).unwrap();
        assert_eq!(
            std::fs::read_to_string(unpack.join("Game/a/b/y.txt")).unwrap(),
            "yy"
        );
    }
}
