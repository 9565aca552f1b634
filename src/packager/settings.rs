//! Core Settings struct for a packaging run.

use super::platform::Target;
use std::path::{Path, PathBuf};

/// Home directories of the external collaborator tools.
///
/// The original build system exported these as process-wide environment
/// variables; here they are explicit values threaded into whichever recipe
/// invokes the corresponding tool, so each recipe's dependencies are visible
/// in its signature.
#[derive(Clone, Debug)]
pub struct ToolHomes {
    /// JDK home, consumed by the Android packaging tool.
    pub java_home: PathBuf,

    /// Android SDK home; also where the ant launcher lives.
    pub android_home: PathBuf,

    /// Emscripten root, containing `tools/file_packager.py`.
    pub emscripten_root: PathBuf,
}

/// Main settings for a packaging run.
///
/// Immutable description of one build request: what to package, where the
/// inputs live, where the output goes, and for which target platform.
///
/// # Examples
///
/// ```no_run
/// use fonline_packager::packager::{Settings, Target, ToolHomes};
///
/// let settings = Settings::new(
///     "Game",
///     "Binaries",
///     "Resources",
///     "Config.cfg",
///     "Output",
///     ToolHomes {
///         java_home: "/opt/jdk".into(),
///         android_home: "/opt/android-sdk".into(),
///         emscripten_root: "/opt/emscripten".into(),
///     },
///     Target::Linux,
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Name the packaged game ships under.
    game_name: String,

    /// Root of the compiled binaries, with one subdirectory per target.
    binaries_dir: PathBuf,

    /// Root of the game resource tree.
    resources_dir: PathBuf,

    /// Raw config file to sanitize and embed.
    config_path: PathBuf,

    /// Output root; artifacts land under `<output>/<Target>/`.
    output_dir: PathBuf,

    /// External tool home directories.
    tool_homes: ToolHomes,

    /// Target platform for this run.
    target: Target,
}

impl Settings {
    /// Creates settings for one packaging run.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        game_name: impl Into<String>,
        binaries_dir: impl Into<PathBuf>,
        resources_dir: impl Into<PathBuf>,
        config_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        tool_homes: ToolHomes,
        target: Target,
    ) -> Self {
        Self {
            game_name: game_name.into(),
            binaries_dir: binaries_dir.into(),
            resources_dir: resources_dir.into(),
            config_path: config_path.into(),
            output_dir: output_dir.into(),
            tool_homes,
            target,
        }
    }

    /// Returns the game name.
    pub fn game_name(&self) -> &str {
        &self.game_name
    }

    /// Returns the compiled binaries root.
    pub fn binaries_dir(&self) -> &Path {
        &self.binaries_dir
    }

    /// Returns the resource tree root.
    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    /// Returns the raw config file path.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Returns the output root directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the external tool homes.
    pub fn tool_homes(&self) -> &ToolHomes {
        &self.tool_homes
    }

    /// Returns the target platform for this run.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Returns the per-target output directory, `<output>/<Target>`.
    pub fn target_output_dir(&self) -> PathBuf {
        self.output_dir.join(self.target.dir_name())
    }

    /// Returns the per-game output directory, `<output>/<Target>/<gameName>`.
    pub fn game_output_dir(&self) -> PathBuf {
        self.target_output_dir().join(&self.game_name)
    }
}
