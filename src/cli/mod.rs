//! Command-line interface components
//!
//! This module contains CLI-specific code for the Film Portfolio binaries,
//! including argument parsing, command handling and text rendering.

pub mod args;
pub mod commands;
pub mod render;

pub use args::{Cli, Commands, GlobalArgs, OptimizeCli, ViewArgs};
pub use commands::{handle_config, handle_optimize, handle_view, load_config};
pub use render::{render_page, render_stats};
