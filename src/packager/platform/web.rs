//! Web package - html/js/memory-image bundle plus packed resources.
//!
//! Produces a release set and a debug set from the prebuilt emscripten
//! output, embeds the config into each memory image, and packs the resource
//! tree with emscripten's `file_packager.py` into a data file and loader
//! script.

use crate::packager::{
    config,
    error::{Context, ErrorExt, Result},
    settings::Settings,
    slot, textpatch,
    tools::{self, ToolCommand},
    utils::fs::copy_file,
};
use std::path::Path;

/// Placeholder tokens in the shipped html templates.
const TITLE_TOKEN: &str = "$TITLE$";
const LOADING_TOKEN: &str = "$LOADING$";

/// Assembles the Web package.
pub async fn package(settings: &Settings, target_dir: &Path) -> Result<()> {
    let name = settings.game_name();
    let game_dir = target_dir.join(name);
    let binaries = settings.binaries_dir().join("Web");

    log::info!("Packaging {} for Web", name);

    let clean = config::load_sanitized(settings.config_path()).await?;

    // Release version
    tokio::fs::create_dir_all(&game_dir)
        .await
        .fs_context("creating game directory", &game_dir)?;
    copy_file(&binaries.join("index.html"), &game_dir.join("index.html")).await?;
    copy_file(&binaries.join("FOnline.js"), &game_dir.join("FOnline.js")).await?;
    copy_file(&binaries.join("FOnline.js.mem"), &game_dir.join("FOnline.js.mem")).await?;
    copy_file(
        &binaries.join("SimpleWebServer.py"),
        &game_dir.join("SimpleWebServer.py"),
    )
    .await?;
    slot::patch_config(&game_dir.join("FOnline.js.mem"), &clean).await?;

    // Debug version
    copy_file(&binaries.join("index.html"), &game_dir.join("debug.html")).await?;
    copy_file(
        &binaries.join("FOnline_Debug.js"),
        &game_dir.join("FOnline_Debug.js"),
    )
    .await?;
    copy_file(
        &binaries.join("FOnline_Debug.js.mem"),
        &game_dir.join("FOnline_Debug.js.mem"),
    )
    .await?;
    slot::patch_config(&game_dir.join("FOnline_Debug.js.mem"), &clean).await?;
    textpatch::replace_in_file(&game_dir.join("debug.html"), "FOnline.js", "FOnline_Debug.js")
        .await?;

    // Generate resources
    pack_resources(settings, target_dir, &game_dir)
        .await
        .context("failed to generate packed web resources")?;

    // Patch *.html
    let debug_name = format!("{} Debug", name);
    textpatch::replace_in_file(&game_dir.join("index.html"), TITLE_TOKEN, name).await?;
    textpatch::replace_in_file(&game_dir.join("index.html"), LOADING_TOKEN, name).await?;
    textpatch::replace_in_file(&game_dir.join("debug.html"), TITLE_TOKEN, &debug_name).await?;
    textpatch::replace_in_file(&game_dir.join("debug.html"), LOADING_TOKEN, &debug_name).await?;

    Ok(())
}

/// Packs the resource tree into `Resources.data` + `Resources.js` via
/// emscripten's file packager, then relocates both into the game directory.
async fn pack_resources(settings: &Settings, target_dir: &Path, game_dir: &Path) -> Result<()> {
    let packager_script = settings
        .tool_homes()
        .emscripten_root
        .join("tools/file_packager.py");
    let python = tools::find_on_path("python")?;

    let mut preload = settings.resources_dir().as_os_str().to_os_string();
    preload.push("@/Data");

    ToolCommand::new(python)
        .arg(packager_script)
        .arg("Resources.data")
        .arg("--preload")
        .arg(preload)
        .arg("--js-output=Resources.js")
        .current_dir(target_dir)
        .run()
        .await?;

    for generated in ["Resources.js", "Resources.data"] {
        let from = target_dir.join(generated);
        let to = game_dir.join(generated);
        tokio::fs::rename(&from, &to)
            .await
            .fs_context("relocating packed resources", &to)?;
    }

    Ok(())
}
