//! Post-build packaging library for FOnline game distributions.
//!
//! This library turns compiled game binaries, a resource tree, and a raw
//! config file into a distributable package for one of five targets:
//! - Windows (zip + staged binaries)
//! - Linux (tar + tar.gz)
//! - Mac (tar + tar.gz)
//! - Android (apk via the SDK's ant project)
//! - Web (html/js/memory-image bundle via emscripten's file packager)
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod packager;

// Re-export commonly used types
pub use error::{CliError, PackagerError};
pub use packager::{Packager, Settings, Target};
