//! Platform-specific packaging recipes.
//!
//! Each target platform has one fixed, linear recipe over a shared step
//! vocabulary: copy trees and files, patch the reserved config slot, patch
//! literal text, build archives, and invoke external tools.
//!
//! | Target | Artifacts | Module |
//! |---------|-----------------------------|-----------|
//! | Windows | `<name>.zip` + staged exe/pdb | [`windows`] |
//! | Linux | `<name>.tar`, `<name>.tar.gz` | [`linux`] |
//! | Mac | `<name>.tar`, `<name>.tar.gz` | [`mac`] |
//! | Android | `<name>.apk` | [`android`] |
//! | Web | html/js/mem bundle | [`web`] |

pub mod android;
pub mod linux;
pub mod mac;
pub mod web;
pub mod windows;

use super::error::{Error, Result};
use super::settings::Settings;
use std::{fmt, str::FromStr};

/// Supported target platforms.
///
/// Closed set; the CLI tag is matched case-sensitively. An unknown tag is an
/// [`Error::UnsupportedTarget`] raised before any file is written.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Target {
    /// Windows desktop build, distributed as a zip.
    Windows,
    /// Linux desktop build (32- and 64-bit binaries), tar and tar.gz.
    Linux,
    /// Mac desktop build, tar and tar.gz.
    Mac,
    /// Android build, packaged as an apk by the SDK's ant project.
    Android,
    /// Web build, html/js/memory-image plus a packed resource file.
    Web,
}

impl Target {
    /// Returns the output directory name for this target.
    ///
    /// Matches the CLI tag so artifacts land under `<output>/<tag>/`.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Target::Windows => "Windows",
            Target::Linux => "Linux",
            Target::Mac => "Mac",
            Target::Android => "Android",
            Target::Web => "Web",
        }
    }

    /// Returns all supported targets.
    pub fn all() -> [Target; 5] {
        [
            Target::Windows,
            Target::Linux,
            Target::Mac,
            Target::Android,
            Target::Web,
        ]
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Windows" => Ok(Target::Windows),
            "Linux" => Ok(Target::Linux),
            "Mac" => Ok(Target::Mac),
            "Android" => Ok(Target::Android),
            "Web" => Ok(Target::Web),
            other => Err(Error::UnsupportedTarget(other.to_string())),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

/// Runs the recipe matching the settings' target.
///
/// `target_dir` is the freshly created `<output>/<Target>` directory the
/// recipe populates. Ownership of its cleanup stays with the orchestrator.
pub async fn package_project(settings: &Settings, target_dir: &std::path::Path) -> Result<()> {
    match settings.target() {
        Target::Windows => windows::package(settings, target_dir).await,
        Target::Linux => linux::package(settings, target_dir).await,
        Target::Mac => mac::package(settings, target_dir).await,
        Target::Android => android::package(settings, target_dir).await,
        Target::Web => web::package(settings, target_dir).await,
    }
}
