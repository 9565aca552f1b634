//! Command line interface for the packager.

mod args;

pub use args::Args;

use crate::error::{CliError, Result};
use crate::packager::{Packager, Settings, Target, ToolHomes};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();

    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    // Unknown targets fail here, before anything touches the filesystem.
    let target: Target = args.target.parse()?;

    let settings = Settings::new(
        args.game_name,
        args.binaries_path,
        args.resources_path,
        args.config_path,
        args.output_path,
        ToolHomes {
            java_home: args.java_home,
            android_home: args.android_home,
            emscripten_root: args.emscripten_root,
        },
        target,
    );

    let artifacts_dir = Packager::new(settings).run().await?;
    println!("Packaged into {}", artifacts_dir.display());

    Ok(0)
}
