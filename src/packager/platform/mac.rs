//! Mac package - tar and tar.gz of the game directory.

use crate::packager::{
    archive::{self, TarCompression},
    config,
    error::{ErrorExt, Result},
    settings::Settings,
    slot,
    utils::fs::{copy_dir, copy_file, named},
};
use std::path::Path;

/// Compiled client binary under `<binaries>/Mac/`.
const CLIENT_BINARY: &str = "FOnline";

/// Assembles the Mac package.
pub async fn package(settings: &Settings, target_dir: &Path) -> Result<()> {
    let name = settings.game_name();
    let game_dir = target_dir.join(name);

    log::info!("Packaging {} for Mac", name);

    // Raw files
    tokio::fs::create_dir_all(&game_dir)
        .await
        .fs_context("creating game directory", &game_dir)?;
    copy_dir(settings.resources_dir(), &game_dir.join("Data")).await?;
    copy_file(
        &settings.binaries_dir().join("Mac").join(CLIENT_BINARY),
        &game_dir.join(name),
    )
    .await?;

    let clean = config::load_sanitized(settings.config_path()).await?;
    slot::patch_config(&game_dir.join(name), &clean).await?;

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
