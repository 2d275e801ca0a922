//! Command-line argument parsing for Film Portfolio
//!
//! Two entry points share this module: the `portfolio` viewer, which loads
//! site pages through the resource cache, and the `optimize_images` batch
//! tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Film Portfolio - browse the portfolio data from the terminal
#[derive(Parser, Debug)]
#[command(
    name = "portfolio",
    version,
    about = "Load and display film portfolio pages",
    long_about = "Reads the portfolio's static JSON data from the site origin and renders pages as text.
Pages loaded in one invocation share a single request-coalescing cache."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Site origin serving the /data/ folder
    #[arg(long, global = true, value_name = "URL")]
    pub origin: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load one or more pages and print them
    View(ViewArgs),

    /// Print the effective configuration
    Config {
        /// Print the commented default configuration instead
        #[arg(long)]
        defaults: bool,
    },
}

/// Arguments for the view command
#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Site paths to load, e.g. "/collections/seattle"
    #[arg(value_name = "ROUTE", default_value = "/")]
    pub routes: Vec<String>,

    /// Print cache statistics after loading
    #[arg(long)]
    pub stats: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level based on global arguments
    ///
    /// Verbosity flags win; otherwise `configured` is used when it names a
    /// valid level, falling back to WARN.
    pub fn log_level(&self, configured: Option<&str>) -> tracing::Level {
        if self.global.quiet {
            tracing::Level::ERROR
        } else if self.global.very_verbose {
            tracing::Level::DEBUG
        } else if self.global.verbose {
            tracing::Level::INFO
        } else {
            configured
                .and_then(|level| level.parse().ok())
                .unwrap_or(tracing::Level::WARN)
        }
    }
}

/// Recompress a portfolio image set
#[derive(Parser, Debug)]
#[command(
    name = "optimize_images",
    version,
    about = "Recompress the film scans of one image set",
    long_about = "Reads every JPEG in <IMAGE_ROOT>/<IMAGE_DIR>/film, re-encodes it at the given quality
and writes it under the same name into <IMAGE_ROOT>/<IMAGE_DIR>."
)]
pub struct OptimizeCli {
    /// Image set folder under the image root
    #[arg(value_name = "IMAGE_DIR")]
    pub image_dir: String,

    /// JPEG quality from 1 to 100
    #[arg(value_name = "QUALITY")]
    pub quality: Option<String>,

    /// Folder holding one subfolder per image set [default: images]
    #[arg(long, value_name = "DIR")]
    pub image_root: Option<PathBuf>,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}
