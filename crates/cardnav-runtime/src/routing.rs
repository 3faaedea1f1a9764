//! Path to route resolution.
//!
//! | Path | Route |
//! |------|-------|
//! | `/` | card `home` |
//! | `/missing` | missing view |
//! | `/upload` | upload (privileged) |
//! | `/admin` | admin (privileged) |
//! | `/admin/graph` | admin graph (privileged) |
//! | `/:pageId` | card `pageId` |
//! | anything else | missing view |
//!
//! Query strings and fragments are ignored, as is a single trailing slash.
//! Each segment is percent-decoded before matching; malformed escapes are
//! kept literally and a segment that decodes to invalid UTF-8 is missing.

use crate::content::HOME_PAGE;
use cardnav_types::{PageId, TryNew};
use std::fmt;

/// A resolved navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Card(PageId),
    Missing,
    Upload,
    Admin,
    AdminGraph,
}

impl Route {
    /// Returns `true` for routes behind the access gate.
    #[must_use]
    pub fn is_privileged(&self) -> bool {
        matches!(self, Self::Upload | Self::Admin | Self::AdminGraph)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card(id) => write!(f, "/{id}"),
            Self::Missing => f.write_str("/missing"),
            Self::Upload => f.write_str("/upload"),
            Self::Admin => f.write_str("/admin"),
            Self::AdminGraph => f.write_str("/admin/graph"),
        }
    }
}

/// Maps URL paths to [`Route`]s.
#[derive(Debug, Clone)]
pub struct RouteTable {
    home: Option<PageId>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTable {
    /// A table whose root path shows the `home` card.
    #[must_use]
    pub fn new() -> Self {
        Self {
            home: PageId::try_new(HOME_PAGE.to_string()).ok(),
        }
    }

    /// Uses `page_id` for the root path instead of `home`.
    #[must_use]
    pub fn with_home(mut self, page_id: PageId) -> Self {
        self.home = Some(page_id);
        self
    }

    /// Resolves a path. Unknown shapes resolve to [`Route::Missing`].
    ///
    /// ```
    /// use cardnav_runtime::routing::{Route, RouteTable};
    ///
    /// let routes = RouteTable::new();
    /// assert!(matches!(routes.resolve("/intro?ref=x"), Route::Card(ref id) if id.as_str() == "intro"));
    /// assert_eq!(routes.resolve("/admin/graph/"), Route::AdminGraph);
    /// assert_eq!(routes.resolve("/a/b"), Route::Missing);
    /// ```
    #[must_use]
    pub fn resolve(&self, path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.strip_prefix('/').unwrap_or(path);
        let path = path.strip_suffix('/').unwrap_or(path);

        let decoded: Option<Vec<String>> = if path.is_empty() {
            Some(Vec::new())
        } else {
            path.split('/').map(percent_decode).collect()
        };
        let Some(decoded) = decoded else {
            return Route::Missing;
        };
        let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();

        match segments.as_slice() {
            [] => self.home.clone().map_or(Route::Missing, Route::Card),
            ["missing"] => Route::Missing,
            ["upload"] => Route::Upload,
            ["admin"] => Route::Admin,
            ["admin", "graph"] => Route::AdminGraph,
            [page] => PageId::try_new((*page).to_string()).map_or(Route::Missing, Route::Card),
            _ => Route::Missing,
        }
    }
}

/// Decodes `%XX` escapes in one path segment. Returns `None` when the
/// decoded bytes are not UTF-8.
fn percent_decode(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let escaped = match (bytes[i], bytes.get(i + 1..i + 3)) {
            (b'%', Some(&[hi, lo])) => hex_value(hi).zip(hex_value(lo)),
            _ => None,
        };
        match escaped {
            Some((hi, lo)) => {
                out.push((hi << 4) | lo);
                i += 3;
            }
            None => {
                out.push(bytes[i]);
                i += 1;
            }
        }
    }
    String::from_utf8(out).ok()
}

fn hex_value(b: u8) -> Option<u8> {
    char::from(b).to_digit(16).and_then(|d| u8::try_from(d).ok())
}
