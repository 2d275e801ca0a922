//! Plain-text rendering of page views

use std::fmt::Write;

use crate::app::cache::CacheStats;
use crate::app::pages::{AboutContent, CollectionView, PageContent, PageStatus, PageView};
use crate::app::Directory;
use crate::constants::site;

/// Render a page view as text
pub fn render_page(view: &PageView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.document_title);
    let _ = writeln!(out, "{}", "=".repeat(view.document_title.chars().count()));

    match &view.status {
        PageStatus::Loading => {
            let _ = writeln!(out, "{}", site::LOADING_TEXT);
        }
        PageStatus::Error(error) => {
            let _ = writeln!(out, "{}", error);
        }
        PageStatus::Empty => {
            let _ = writeln!(out, "No collections yet.");
        }
        PageStatus::Ready(PageContent::About(about)) => render_about(&mut out, about),
        PageStatus::Ready(PageContent::Directory(directory)) => {
            render_directory(&mut out, directory)
        }
        PageStatus::Ready(PageContent::Collection(collection)) => {
            render_collection(&mut out, collection)
        }
    }

    out
}

fn render_about(out: &mut String, about: &AboutContent) {
    for paragraph in about.bio {
        let _ = writeln!(out, "{}\n", paragraph);
    }
    let _ = writeln!(out, "[{}] {}", about.photo_src, about.photo_alt);
    let _ = writeln!(
        out,
        "Photo by {} ({})",
        about.photo_credit, about.photo_credit_url
    );
}

fn render_directory(out: &mut String, directory: &Directory) {
    for summary in &directory.collections {
        let _ = writeln!(
            out,
            "{:<24} {:<32} {}",
            format!("/collections/{}", summary.id),
            summary.title,
            summary.cover.src
        );
    }
}

fn render_collection(out: &mut String, view: &CollectionView) {
    let _ = writeln!(out, "{}", view.heading);
    let _ = writeln!(out, "{}\n", view.subheading);
    for photo in &view.collection.photos {
        let _ = writeln!(out, "{:<9} {}  {}", photo.photo_type, photo.src, photo.alt);
    }
}

/// Render cache statistics as a short report
pub fn render_stats(stats: &CacheStats) -> String {
    format!(
        "Cache: {} requests, {} fetches, {} hits, {} joins, {} failures ({:.0}% served without a fetch)",
        stats.requests(),
        stats.fetches,
        stats.hits,
        stats.joins,
        stats.failures,
        stats.network_savings() * 100.0
    )
}
