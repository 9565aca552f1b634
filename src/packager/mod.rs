//! Core packaging pipeline.
//!
//! The pipeline is a fixed, sequential assembly: the orchestrator resolves the
//! target output directory, dispatches to one platform recipe, and guarantees
//! the directory is removed again if any step fails. Recipes compose a small
//! step vocabulary: copy trees and files, patch the reserved config slot
//! inside binaries, patch literal text tokens, build archives, and invoke
//! external tools.

pub mod archive;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod platform;
pub mod settings;
pub mod slot;
pub mod textpatch;
pub mod tools;
pub mod utils;

pub use error::{Context, Error, ErrorExt, Result};
pub use orchestrator::Packager;
pub use platform::Target;
pub use settings::{Settings, ToolHomes};
