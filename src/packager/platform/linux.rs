//! Linux package - tar and tar.gz of the game directory.

use crate::packager::{
    archive::{self, TarCompression},
    config,
    error::{ErrorExt, Result},
    settings::Settings,
    slot,
    utils::fs::{copy_dir, copy_file, named},
};
use std::path::Path;

/// Compiled client binaries under `<binaries>/Linux/`.
const CLIENT_BINARY_32: &str = "FOnline32";
const CLIENT_BINARY_64: &str = "FOnline64";

/// Assembles the Linux package.
///
/// Copies resources and both architecture binaries into the game directory,
/// embeds the sanitized config into each binary, then produces a plain tar
/// and a gzip tar of the directory.
pub async fn package(settings: &Settings, target_dir: &Path) -> Result<()> {
    let name = settings.game_name();
    let game_dir = target_dir.join(name);
    let binaries = settings.binaries_dir().join("Linux");

    log::info!("Packaging {} for Linux", name);

    // Raw files
    tokio::fs::create_dir_all(&game_dir)
        .await
        .fs_context("creating game directory", &game_dir)?;
    copy_dir(settings.resources_dir(), &game_dir.join("Data")).await?;
    copy_file(&binaries.join(CLIENT_BINARY_32), &named(&game_dir, name, "32")).await?;
    copy_file(&binaries.join(CLIENT_BINARY_64), &named(&game_dir, name, "64")).await?;

    let clean = config::load_sanitized(settings.config_path()).await?;
    slot::patch_config(&named(&game_dir, name, "32"), &clean).await?;
    slot::patch_config(&named(&game_dir, name, "64"), &clean).await?;

    // Tar
    archive::make_tar(
        &named(target_dir, name, ".tar"),
        &game_dir,
        TarCompression::Plain,
    )
    .await?;
    archive::make_tar(
        &named(target_dir, name, ".tar.gz"),
        &game_dir,
        TarCompression::Gzip,
    )
    .await?;

    Ok(())
}
