//! Optimizer configuration and argument validation

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::images;
use crate::errors::{OptimizeError, OptimizeResult};

/// Settings for one optimization run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizeConfig {
    /// Directory holding the original scans
    pub input_dir: PathBuf,
    /// Directory the recompressed files are written to
    pub output_dir: PathBuf,
    /// JPEG quality in 1..=100
    pub quality: u8,
    /// Whether `quality` was given explicitly rather than defaulted
    pub quality_overridden: bool,
    /// Show a progress bar while encoding
    pub show_progress: bool,
}

impl OptimizeConfig {
    /// Configuration for the image set `image_dir` under `image_root`
    ///
    /// Reads from `<root>/<image_dir>/film` and writes to `<root>/<image_dir>`.
    pub fn for_image_set(image_root: &Path, image_dir: &str, quality: Option<u8>) -> Self {
        let output_dir = image_root.join(image_dir);
        Self {
            input_dir: output_dir.join(images::FILM_SUBDIR),
            output_dir,
            quality: quality.unwrap_or(images::DEFAULT_QUALITY),
            quality_overridden: quality.is_some(),
            show_progress: true,
        }
    }

    /// Check quality bounds, then that both directories exist
    ///
    /// Quality is checked first so an invalid value fails before the
    /// filesystem is touched.
    pub fn validate(&self) -> OptimizeResult<()> {
        check_quality_range(u32::from(self.quality), &self.quality.to_string())?;

        for dir in [&self.input_dir, &self.output_dir] {
            if !dir.is_dir() {
                return Err(OptimizeError::DirectoryNotFound { path: dir.clone() });
            }
        }

        println!("Input dir:\t{}", self.input_dir.display());
        if self.quality_overridden {
            println!("Quality:\t{}", self.quality);
        }
        info!(
            "Validated optimizer settings: {} -> {} at quality {}",
            self.input_dir.display(),
            self.output_dir.display(),
            self.quality
        );
        Ok(())
    }

    /// Glob-style description of the files that will be processed
    pub fn input_glob(&self) -> String {
        format!(
            "{}/*.{{{}}}",
            self.input_dir.display(),
            images::JPEG_EXTENSIONS.join(",")
        )
    }
}

/// Parse a quality argument
///
/// Accepts an integer in 1..=100 (surrounding whitespace ignored).
pub fn parse_quality(raw: &str) -> OptimizeResult<u8> {
    let invalid = || OptimizeError::InvalidQuality {
        value: raw.to_string(),
    };
    let value: u32 = raw.trim().parse().map_err(|_| invalid())?;
    check_quality_range(value, raw)?;
    u8::try_from(value).map_err(|_| invalid())
}

fn check_quality_range(value: u32, raw: &str) -> OptimizeResult<()> {
    let range = u32::from(images::MIN_QUALITY)..=u32::from(images::MAX_QUALITY);
    if range.contains(&value) {
        Ok(())
    } else {
        Err(OptimizeError::InvalidQuality {
            value: raw.to_string(),
        })
    }
}
