//! Icon resolution from themed icon URLs.
//!
//! Object metadata carries a path-like icon URL such as
//! `/assets/icons/standard/account_60.png`; the displayable identifier is
//! the namespace (`standard`) plus the short name (`account`).

use serde::{Deserialize, Serialize};

/// A displayable icon, e.g. `standard:account`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconIdentifier {
    pub namespace: String,
    pub name: String,
}

impl IconIdentifier {
    /// Render as the `namespace:name` form the view consumes.
    pub fn qualified(&self) -> String {
        format!("{}:{}", self.namespace, self.name)
    }
}

/// Derive an icon identifier from a themed icon URL.
///
/// The last path segment is the icon file name with a size suffix
/// (`account_60.png`); everything from the final `_` is stripped to get the
/// short name. The second-to-last segment is the namespace. Malformed input
/// never errors, it degrades to `None`:
/// absent, empty, or whitespace-only URLs, URLs with fewer than two
/// segments, and file names without an `_` suffix all resolve to no icon.
pub fn resolve_icon(theme_icon_url: Option<&str>) -> Option<IconIdentifier> {
    let url = theme_icon_url?.trim();
    if url.is_empty() {
        return None;
    }

    let segments: Vec<&str> = url.split('/').collect();
    if segments.len() < 2 {
        return None;
    }

    let file = segments[segments.len() - 1];
    let namespace = segments[segments.len() - 2];
    let name = &file[..file.rfind('_')?];

    Some(IconIdentifier {
        namespace: namespace.to_string(),
        name: name.to_string(),
    })
}
