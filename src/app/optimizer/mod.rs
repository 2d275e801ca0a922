//! Batch JPEG optimizer for portfolio image sets
//!
//! An image set lives at `<image root>/<set>`, with the original film scans in
//! its `film` subdirectory. Optimizing the set re-encodes every scan at the
//! configured quality and writes the result, under the same file name, into
//! the set directory itself.

pub mod config;
pub mod processor;

pub use config::{parse_quality, OptimizeConfig};
pub use processor::{find_jpegs, is_jpeg, optimize_images, recompress, OptimizeReport, OptimizedFile};
