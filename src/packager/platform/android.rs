//! Android package - apk produced by the SDK's prebuilt ant project.

use crate::packager::{
    config,
    error::{Context, ErrorExt, Result},
    settings::Settings,
    slot,
    tools::ToolCommand,
    utils::fs::{copy_dir, copy_file, list_entry_names, named},
};
use std::path::Path;

/// Patched shared libraries inside the prebuilt project tree.
const CLIENT_LIBS: [&str; 2] = ["libs/armeabi-v7a/libFOnline.so", "libs/x86/libFOnline.so"];

/// Apk produced by the ant `debug` build.
const ANT_OUTPUT_APK: &str = "bin/SDLActivity-debug.apk";

/// Assembles the Android package.
///
/// Copies the prebuilt ant project tree, embeds the sanitized config into
/// both architecture shared libraries, bundles the resources as assets along
/// with a flat manifest of top-level resource names, runs ant, and places
/// the produced apk at the target output root.
pub async fn package(settings: &Settings, target_dir: &Path) -> Result<()> {
    let name = settings.game_name();
    let game_dir = target_dir.join(name);

    log::info!("Packaging {} for Android", name);

    copy_dir(&settings.binaries_dir().join("Android"), &game_dir).await?;

    let clean = config::load_sanitized(settings.config_path()).await?;
    for lib in CLIENT_LIBS {
        slot::patch_config(&game_dir.join(lib), &clean).await?;
    }

    // Bundle
    copy_dir(settings.resources_dir(), &game_dir.join("assets")).await?;
    let manifest = list_entry_names(settings.resources_dir()).await?.join("\n");
    let manifest_path = game_dir.join("assets/FilesTree.txt");
    tokio::fs::write(&manifest_path, manifest)
        .await
        .fs_context("writing files manifest", &manifest_path)?;

    // Pack
    let homes = settings.tool_homes();
    ToolCommand::new(homes.android_home.join("bin/ant"))
        .arg("-f")
        .arg(&game_dir)
        .arg("debug")
        .env("JAVA_HOME", &homes.java_home)
        .env("ANDROID_HOME", &homes.android_home)
        .run()
        .await?;

    copy_file(&game_dir.join(ANT_OUTPUT_APK), &named(target_dir, name, ".apk"))
        .await
        .context("ant build produced no installable package")?;

    Ok(())
}
