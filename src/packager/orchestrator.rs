//! Packaging orchestration and output directory lifecycle.
//!
//! The orchestrator owns the per-target output directory: it is removed and
//! recreated fresh at the start of every run (no incremental reuse), and it
//! is the unit of atomic cleanup — any failure in the recipe removes the
//! whole directory before the error is surfaced.

use super::error::{ErrorExt, Result};
use super::platform;
use super::settings::Settings;
use super::utils::fs::remove_dir_all;
use std::path::{Path, PathBuf};

/// Main packaging orchestrator.
///
/// Resolves the target output directory, dispatches to the platform recipe
/// selected by the settings, and guarantees the directory is gone again if
/// any step fails.
///
/// # Examples
///
/// ```no_run
/// use fonline_packager::packager::{Packager, Settings};
///
/// # async fn example(settings: Settings) -> fonline_packager::packager::Result<()> {
/// let artifacts_dir = Packager::new(settings).run().await?;
/// println!("Packaged into {}", artifacts_dir.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Packager {
    settings: Settings,
}

impl Packager {
    /// Creates a packager for one build request.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the packaging pipeline.
    ///
    /// On success the target output directory and its artifacts persist and
    /// its path is returned. On failure the directory is removed
    /// (best-effort) and the original error is propagated.
    pub async fn run(&self) -> Result<PathBuf> {
        let target_dir = self.settings.target_output_dir();

        log::info!(
            "Building {} package for {} into {}",
            self.settings.target(),
            self.settings.game_name(),
            target_dir.display()
        );

        // From-scratch semantics: stale output from a previous run is
        // discarded even if that run succeeded.
        remove_dir_all(&target_dir).await?;
        tokio::fs::create_dir_all(&target_dir)
            .await
            .fs_context("creating target output directory", &target_dir)?;

        let guard = CleanupGuard::new(&target_dir);
        platform::package_project(&self.settings, &target_dir).await?;
        guard.keep();

        log::info!("✓ Packaged {} into {}", self.settings.game_name(), target_dir.display());
        Ok(target_dir)
    }
}

/// Removes the output directory on drop unless disarmed.
///
/// Armed for the whole recipe run; [`keep`](Self::keep) disarms it on the
/// success path. Cleanup failures are swallowed — the original recipe error
/// is the one worth surfacing.
struct CleanupGuard {
    path: PathBuf,
    armed: bool,
}

impl CleanupGuard {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            armed: true,
        }
    }

    fn keep(mut self) {
        self.armed = false;
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if self.armed {
            log::warn!("packaging failed, removing {}", self.path.display());
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_removes_directory_when_armed() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("Linux");
        std::fs::create_dir_all(out.join("Game")).unwrap();

        drop(CleanupGuard::new(&out));
        assert!(!out.exists());
    }

    #[test]
    fn kept_guard_leaves_directory_alone() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("Linux");
        std::fs::create_dir_all(&out).unwrap();

        CleanupGuard::new(&out).keep();
        assert!(out.exists());
    }
}
