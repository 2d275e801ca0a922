//! Batch JPEG optimizer for portfolio image sets
//!
//! Usage: `optimize_images <image_dir> [quality] [--image-root DIR]`
//!
//! Exits with status 0 when every scan was recompressed and 1 on any error,
//! including invalid arguments.

use std::process;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use film_portfolio::cli::{handle_optimize, OptimizeCli};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let args = match OptimizeCli::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            process::exit(1);
        }
        Err(e) => {
            // --help and --version
            let _ = e.print();
            process::exit(0);
        }
    };

    init_logging(args.quiet);

    match handle_optimize(args).await {
        Ok(report) => {
            info!("Processed {} file(s)", report.files.len());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn init_logging(quiet: bool) {
    let level = if quiet { "error" } else { "warn" };
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("film_portfolio={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(false)
        .with_writer(std::io::stderr)
        .init();
}
