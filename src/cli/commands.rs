//! Command handlers for the Film Portfolio CLIs
//!
//! This module implements the handlers that connect parsed arguments and the
//! loaded configuration to the core application functionality.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::app::optimizer::{optimize_images, parse_quality, OptimizeConfig, OptimizeReport};
use crate::app::pages::{resolve, Pages};
use crate::app::{PortfolioClient, ResourceCache};
use crate::cli::render::{render_page, render_stats};
use crate::cli::{GlobalArgs, OptimizeCli, ViewArgs};
use crate::config::AppConfig;
use crate::errors::{AppError, Result};

/// Load configuration and apply the global CLI overrides
pub async fn load_config(global: &GlobalArgs) -> Result<AppConfig> {
    let mut config = AppConfig::load(global.config.clone()).await?;
    config.apply_origin_override(global.origin.clone());
    debug!("Effective origin: {}", config.client.origin);
    Ok(config)
}

/// Handle the view command
///
/// Every requested route is loaded concurrently through one shared cache, so
/// routes that need the same resource cause a single fetch. Pages that end in
/// an error are still printed; the command then fails.
pub async fn handle_view(args: ViewArgs, config: &AppConfig) -> Result<()> {
    let client = PortfolioClient::new(&config.to_runtime_config())?;
    let cache = ResourceCache::shared(client);
    let pages = Pages::new(Arc::clone(&cache), config.site.title.clone());

    let routes: Vec<_> = args.routes.iter().map(|path| resolve(path)).collect();
    info!("Loading {} page(s) from {}", routes.len(), config.client.origin);

    let views = join_all(routes.iter().map(|route| pages.load(route))).await;

    let mut failed = Vec::new();
    for view in &views {
        println!("{}", render_page(view));
        if view.error().is_some() {
            failed.push(view.route.to_string());
        }
    }

    let stats = cache.stats();
    debug!("Cache statistics: {:?}", stats);
    if args.stats {
        println!("{}", render_stats(&stats));
    }

    if failed.is_empty() {
        Ok(())
    } else {
        warn!("{} page(s) failed to load", failed.len());
        Err(AppError::generic(format!(
            "Failed to load {}",
            failed.join(", ")
        )))
    }
}

/// Handle the config command
pub fn handle_config(config: &AppConfig, defaults: bool) -> Result<()> {
    if defaults {
        print!("{}", AppConfig::generate_default_config_content());
    } else {
        print!("{}", config.to_toml()?);
    }
    Ok(())
}

/// Handle the optimize_images command
///
/// The quality argument is validated before configuration or any image is
/// read. An explicit quality wins over `images.default_quality`.
pub async fn handle_optimize(args: OptimizeCli) -> Result<OptimizeReport> {
    let quality = args.quality.as_deref().map(parse_quality).transpose()?;

    let app_config = AppConfig::load(args.config.clone()).await?;
    let image_root = args
        .image_root
        .clone()
        .unwrap_or_else(|| app_config.images.root.clone());

    let mut config = OptimizeConfig::for_image_set(&image_root, &args.image_dir, quality);
    if quality.is_none() {
        config.quality = app_config.images.default_quality;
    }
    config.show_progress = !args.quiet;

    let report = optimize_images(&config).await?;
    info!(
        "Optimized {} file(s) in {:.2?}: {} -> {} bytes ({:.1}% saved)",
        report.files.len(),
        report.elapsed,
        report.original_bytes(),
        report.optimized_bytes(),
        report.savings() * 100.0
    );
    Ok(report)
}
