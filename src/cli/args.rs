//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Post-build packager for FOnline game distributions
#[derive(Parser, Debug)]
#[command(
    name = "fonline_packager",
    version,
    about = "Post-build packager for FOnline game distributions",
    long_about = "Assembles a distributable game package (zip, tar, apk, or web bundle) \
from compiled binaries, a resource tree, and a config file.

Usage:
  fonline_packager Game Binaries Resources Config.cfg Output \\
      /opt/jdk /opt/android-sdk /opt/emscripten Linux

Exit code 0 = the target output directory and its artifacts exist.
On any failure the target output directory is guaranteed absent."
)]
pub struct Args {
    /// Name the packaged game ships under
    #[arg(value_name = "GAME_NAME")]
    pub game_name: String,

    /// Root of the compiled binaries (one subdirectory per target)
    #[arg(value_name = "BINARIES_PATH")]
    pub binaries_path: PathBuf,

    /// Root of the game resource tree
    #[arg(value_name = "RESOURCES_PATH")]
    pub resources_path: PathBuf,

    /// Raw config file to sanitize and embed into the binaries
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,

    /// Output root; artifacts land under <OUTPUT_PATH>/<TARGET>/
    #[arg(value_name = "OUTPUT_PATH")]
    pub output_path: PathBuf,

    /// JDK home, passed to the Android packaging tool
    #[arg(value_name = "JAVA_HOME")]
    pub java_home: PathBuf,

    /// Android SDK home (also hosts the ant launcher)
    #[arg(value_name = "ANDROID_HOME")]
    pub android_home: PathBuf,

    /// Emscripten root, containing tools/file_packager.py
    #[arg(value_name = "EMSCRIPTEN")]
    pub emscripten_root: PathBuf,

    /// Target platform: Windows, Linux, Mac, Android, or Web (case-sensitive)
    #[arg(value_name = "TARGET")]
    pub target: String,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.game_name.is_empty() {
            return Err("Game name cannot be empty".to_string());
        }

        Ok(())
    }
}
