//! Film Portfolio CLI application
//!
//! Command-line viewer for the portfolio's static JSON data. Pages are loaded
//! through the shared resource cache and printed as text.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use film_portfolio::cli::{handle_config, handle_view, load_config, Cli, Commands};
use film_portfolio::errors::Result;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Load configuration, set up logging and dispatch the subcommand
async fn run() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    let config = load_config(&cli.global).await?;

    init_logging(&cli, &config.logging.level);

    info!("Film Portfolio v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::View(args) => {
            info!("Executing view command");
            handle_view(args, &config).await
        }
        Commands::Config { defaults } => {
            info!("Executing config command");
            handle_config(&config, defaults)
        }
    }
}

/// Initialize logging based on CLI verbosity settings
fn init_logging(cli: &Cli, configured_level: &str) {
    let log_level = cli.log_level(Some(configured_level));

    // Create environment filter
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("film_portfolio={}", log_level).parse() {
        filter = filter.add_directive(directive);
    }

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose) // Show levels only in very verbose mode
        .with_writer(std::io::stderr)
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
