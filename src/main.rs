//! FOnline Packager - post-build packaging for game distributions.
//!
//! This binary takes already-compiled game binaries, a resource tree, and a
//! text configuration file, and assembles the final distributable artifact
//! (zip, tarball, apk, or web bundle) for one target platform.

mod cli;
mod error;
mod packager;

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
