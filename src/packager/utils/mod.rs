//! Shared helpers for the packaging steps.

pub mod fs;
