//! Windows package - zip of the game directory plus staged binaries.

use crate::packager::{
    archive, config,
    error::{ErrorExt, Result},
    settings::Settings,
    slot,
    utils::fs::{copy_dir, copy_file, named},
};
use std::path::Path;

/// Compiled client binaries under `<binaries>/Windows/`.
const CLIENT_BINARY: &str = "FOnline.exe";
const CLIENT_SYMBOLS: &str = "FOnline.pdb";

/// Icon replacement tool, shipped alongside the Windows binaries.
#[cfg(windows)]
const ICON_TOOL: &str = "ReplaceVistaIcon.exe";

/// Assembles the Windows package.
///
/// Copies resources and the executable/symbol pair into the game directory,
/// embeds the sanitized config into the executable, patches the icon (on
/// Windows hosts), zips the directory, and stages the final binaries into
/// the sibling `Binaries` folder consumed by downstream tooling.
pub async fn package(settings: &Settings, target_dir: &Path) -> Result<()> {
    let name = settings.game_name();
    let game_dir = target_dir.join(name);
    let binaries = settings.binaries_dir().join("Windows");
    let exe = named(&game_dir, name, ".exe");
    let pdb = named(&game_dir, name, ".pdb");

    log::info!("Packaging {} for Windows", name);

    // Raw files
    tokio::fs::create_dir_all(&game_dir)
        .await
        .fs_context("creating game directory", &game_dir)?;
    copy_dir(settings.resources_dir(), &game_dir.join("Data")).await?;
    copy_file(&binaries.join(CLIENT_BINARY), &exe).await?;
    copy_file(&binaries.join(CLIENT_SYMBOLS), &pdb).await?;

    let clean = config::load_sanitized(settings.config_path()).await?;
    slot::patch_config(&exe, &clean).await?;

    // Patch icon (icon resource editing needs a Windows host)
    #[cfg(windows)]
    {
        use crate::packager::tools::ToolCommand;

        let ico = settings.output_dir().join("Client.ico");
        ToolCommand::new(binaries.join(ICON_TOOL))
            .arg(&exe)
            .arg(&ico)
            .run()
            .await?;
    }

    // Zip
    archive::make_zip(&named(target_dir, name, ".zip"), &game_dir).await?;

    // Update binaries staging folder next to the resources tree
    let staging = settings.resources_dir().join("../Binaries");
    copy_file(&exe, &named(&staging, name, ".exe")).await?;
    copy_file(&pdb, &named(&staging, name, ".pdb")).await?;

    Ok(())
}
