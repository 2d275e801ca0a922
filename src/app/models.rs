//! Data models for portfolio resources
//!
//! This module defines the JSON document shapes served under `/data/` and the
//! [`FetchResult`] envelope every resource request settles into.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constants::site;

/// Settled outcome of a resource request
///
/// Exactly one of data or error is present. Loaded values are reference
/// counted so every caller served from the same cache entry shares one
/// allocation.
#[derive(Debug)]
pub enum FetchResult<T> {
    /// Resource fetched and parsed
    Loaded(Arc<T>),
    /// Human-readable failure message
    Failed(String),
}

impl<T> FetchResult<T> {
    /// Wrap a freshly parsed value
    pub fn loaded(value: T) -> Self {
        Self::Loaded(Arc::new(value))
    }

    /// Build a failed result from any displayable error
    pub fn failed(error: impl fmt::Display) -> Self {
        Self::Failed(error.to_string())
    }

    /// The parsed value, if the request succeeded
    pub fn data(&self) -> Option<&Arc<T>> {
        match self {
            FetchResult::Loaded(value) => Some(value),
            FetchResult::Failed(_) => None,
        }
    }

    /// The failure message, if the request failed
    pub fn error(&self) -> Option<&str> {
        match self {
            FetchResult::Loaded(_) => None,
            FetchResult::Failed(message) => Some(message),
        }
    }

    /// Check if the request succeeded
    pub fn is_loaded(&self) -> bool {
        matches!(self, FetchResult::Loaded(_))
    }

    /// Convert into a standard `Result`
    pub fn into_result(self) -> Result<Arc<T>, String> {
        match self {
            FetchResult::Loaded(value) => Ok(value),
            FetchResult::Failed(message) => Err(message),
        }
    }
}

impl<T> Clone for FetchResult<T> {
    fn clone(&self) -> Self {
        match self {
            FetchResult::Loaded(value) => FetchResult::Loaded(Arc::clone(value)),
            FetchResult::Failed(message) => FetchResult::Failed(message.clone()),
        }
    }
}

impl<T: PartialEq> PartialEq for FetchResult<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FetchResult::Loaded(a), FetchResult::Loaded(b)) => a == b,
            (FetchResult::Failed(a), FetchResult::Failed(b)) => a == b,
            _ => false,
        }
    }
}

/// Presentation role of a photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoType {
    Portrait,
    Landscape,
    Cover,
}

impl fmt::Display for PhotoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhotoType::Portrait => "portrait",
            PhotoType::Landscape => "landscape",
            PhotoType::Cover => "cover",
        };
        f.pad(name)
    }
}

/// A single photo inside a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Image path, relative to the site origin
    pub src: String,
    /// Alternate text
    pub alt: String,
    /// Presentation role
    #[serde(rename = "type")]
    pub photo_type: PhotoType,
}

/// Cover image of a collection summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverPhoto {
    pub src: String,
}

/// Lightweight entry of the directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub id: String,
    pub title: String,
    pub cover: CoverPhoto,
}

/// Directory of all collections (`/data/directory.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    pub collections: Vec<CollectionSummary>,
}

impl Directory {
    /// Look up a collection summary by identifier
    pub fn find(&self, id: &str) -> Option<&CollectionSummary> {
        self.collections.iter().find(|summary| summary.id == id)
    }

    /// Check if the directory lists no collections
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

/// Full detail of one photo set (`/data/collections/<id>.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub title: String,
    pub date: String,
    pub camera: String,
    pub film: String,
    pub photos: Vec<Photo>,
}

impl Collection {
    /// Page heading in the form `<date> // <title>`
    pub fn heading(&self) -> String {
        format!("{} // {}", or_unknown(&self.date), or_unknown(&self.title))
    }

    /// Page subheading in the form `<camera>, <film>`
    pub fn subheading(&self) -> String {
        format!("{}, {}", or_unknown(&self.camera), or_unknown(&self.film))
    }
}

fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() {
        site::UNKNOWN
    } else {
        value
    }
}
