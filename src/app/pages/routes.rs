//! Route table for the portfolio site
//!
//! | Path                | Outcome                    |
//! |---------------------|----------------------------|
//! | `/`                 | redirect to `/collections` |
//! | `/about`            | About page                 |
//! | `/collections`      | Directory page             |
//! | `/collections/<id>` | Collection page            |
//! | anything else       | redirect to `/`            |

use std::fmt;

use tracing::{debug, warn};

use crate::constants::site;

/// A page the site can display
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    About,
    Collections,
    Collection { id: String },
}

/// Outcome of matching one path against the route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    Page(Route),
    Redirect(&'static str),
}

impl Route {
    /// Canonical path of the route
    pub fn path(&self) -> String {
        match self {
            Route::About => "/about".to_string(),
            Route::Collections => "/collections".to_string(),
            Route::Collection { id } => format!("/collections/{}", id),
        }
    }

    /// Route-level title shown before any data has loaded
    pub fn title(&self) -> &'static str {
        match self {
            Route::About => "About",
            Route::Collections => "Collections",
            Route::Collection { .. } => "Collection",
        }
    }

    /// Document title for the route under `site_title`
    pub fn document_title(&self, site_title: &str) -> String {
        document_title(Some(self.title()), site_title)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// `"<title> - <site title>"`, or the site title alone
pub fn document_title(title: Option<&str>, site_title: &str) -> String {
    match title {
        Some(title) if !title.is_empty() => format!("{} - {}", title, site_title),
        _ => site_title.to_string(),
    }
}

/// Match a single path without following redirects
pub fn match_path(path: &str) -> RouteMatch {
    let path = normalize(path);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => RouteMatch::Redirect("/collections"),
        ["about"] => RouteMatch::Page(Route::About),
        ["collections"] => RouteMatch::Page(Route::Collections),
        ["collections", id] => RouteMatch::Page(Route::Collection { id: id.to_string() }),
        _ => RouteMatch::Redirect("/"),
    }
}

/// Resolve a path to a page, following redirects
pub fn resolve(path: &str) -> Route {
    let mut current = path.to_string();
    for _ in 0..=site::MAX_REDIRECTS {
        match match_path(&current) {
            RouteMatch::Page(route) => {
                debug!("Resolved '{}' to {}", path, route);
                return route;
            }
            RouteMatch::Redirect(target) => {
                debug!("Redirecting '{}' to '{}'", current, target);
                current = target.to_string();
            }
        }
    }

    warn!("Too many redirects resolving '{}'", path);
    Route::Collections
}

/// Strip query, fragment and surrounding whitespace
fn normalize(path: &str) -> &str {
    let path = path.trim();
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}
