//! JPEG discovery and recompression
//!
//! Decoding and encoding are CPU bound and run on the blocking pool, one file
//! at a time. Each output is written to a temporary file and renamed into
//! place so an interrupted run never leaves a truncated JPEG behind.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use image::codecs::jpeg::JpegEncoder;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use super::config::OptimizeConfig;
use crate::constants::images;
use crate::errors::{OptimizeError, OptimizeResult};

/// Result of optimizing one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub original_bytes: u64,
    pub optimized_bytes: u64,
}

/// Summary of an optimization run
#[derive(Debug, Clone, Default)]
pub struct OptimizeReport {
    pub files: Vec<OptimizedFile>,
    pub elapsed: Duration,
}

impl OptimizeReport {
    /// Total size of the inputs
    pub fn original_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.original_bytes).sum()
    }

    /// Total size of the outputs
    pub fn optimized_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.optimized_bytes).sum()
    }

    /// Fraction of bytes saved, zero when nothing was processed
    pub fn savings(&self) -> f64 {
        let original = self.original_bytes();
        if original == 0 {
            return 0.0;
        }
        1.0 - self.optimized_bytes() as f64 / original as f64
    }
}

/// Check if `path` has a JPEG extension
pub fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            images::JPEG_EXTENSIONS
                .iter()
                .any(|jpeg| ext.eq_ignore_ascii_case(jpeg))
        })
        .unwrap_or(false)
}

/// JPEG files directly inside `dir`, sorted by path
pub async fn find_jpegs(dir: &Path) -> OptimizeResult<Vec<PathBuf>> {
    let io_error = |source| OptimizeError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(io_error)?;
    let mut jpegs = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
        let path = entry.path();
        if entry.file_type().await.map_err(io_error)?.is_file() && is_jpeg(&path) {
            jpegs.push(path);
        }
    }

    jpegs.sort();
    debug!("Found {} JPEG files in {}", jpegs.len(), dir.display());
    Ok(jpegs)
}

/// Validate `config` and recompress every JPEG in its input directory
///
/// # Errors
///
/// Returns `OptimizeError` if validation fails or any file cannot be processed.
/// Files finished before the failure stay in the output directory.
pub async fn optimize_images(config: &OptimizeConfig) -> OptimizeResult<OptimizeReport> {
    config.validate()?;

    println!("Matching glob:\t{}", config.input_glob());
    println!("Output dir:\t{}", config.output_dir.display());

    let start = Instant::now();
    let sources = find_jpegs(&config.input_dir).await?;
    if sources.is_empty() {
        warn!("No JPEG files found in {}", config.input_dir.display());
    }

    let progress = progress_bar(config, sources.len() as u64)?;
    let mut report = OptimizeReport::default();

    for source in sources {
        let file_name = source
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        progress.set_message(file_name);

        let destination = config.output_dir.join(source.file_name().unwrap_or_default());
        let quality = config.quality;
        let job_source = source.clone();
        let job_destination = destination.clone();
        let optimized = tokio::task::spawn_blocking(move || {
            recompress(&job_source, &job_destination, quality)
        })
        .await??;

        info!(
            "{} -> {} ({} -> {} bytes)",
            optimized.source.display(),
            optimized.destination.display(),
            optimized.original_bytes,
            optimized.optimized_bytes
        );
        report.files.push(optimized);
        progress.inc(1);
    }

    progress.finish_and_clear();
    report.elapsed = start.elapsed();
    Ok(report)
}

/// Decode `source` and write it to `destination` as a JPEG at `quality`
pub fn recompress(source: &Path, destination: &Path, quality: u8) -> OptimizeResult<OptimizedFile> {
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source| OptimizeError::Io { path, source }
    };

    let original_bytes = std::fs::metadata(source)
        .map_err(io_error(source))?
        .len();

    let decoded = image::open(source).map_err(|e| OptimizeError::Image {
        path: source.to_path_buf(),
        source: e,
    })?;
    let rgb = decoded.to_rgb8();

    let temp_path = temp_path_for(destination);
    let write_result = (|| {
        let file = File::create(&temp_path).map_err(io_error(&temp_path))?;
        let mut writer = BufWriter::new(file);
        let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
        rgb.write_with_encoder(encoder)
            .map_err(|e| OptimizeError::Image {
                path: destination.to_path_buf(),
                source: e,
            })?;
        writer
            .into_inner()
            .map_err(|e| OptimizeError::Io {
                path: temp_path.clone(),
                source: e.into_error(),
            })?
            .sync_all()
            .map_err(io_error(&temp_path))
    })();

    if let Err(e) = write_result {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }

    std::fs::rename(&temp_path, destination).map_err(io_error(destination))?;

    let optimized_bytes = std::fs::metadata(destination)
        .map_err(io_error(destination))?
        .len();

    Ok(OptimizedFile {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        original_bytes,
        optimized_bytes,
    })
}

fn temp_path_for(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(images::TEMP_FILE_SUFFIX);
    destination.with_file_name(name)
}

fn progress_bar(config: &OptimizeConfig, len: u64) -> OptimizeResult<ProgressBar> {
    if !config.show_progress {
        return Ok(ProgressBar::hidden());
    }

    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .map_err(|e| OptimizeError::Progress {
                reason: e.to_string(),
            })?
            .progress_chars("=> "),
    );
    Ok(bar)
}
