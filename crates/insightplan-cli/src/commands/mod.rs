//! CLI command implementations.

pub mod analyze;
pub mod format;
mod render;
