//! Where layout markup comes from.
//!
//! Files are read directly. URLs are handed to a [`Fetch`] implementation the
//! application supplies, so this crate never opens a network connection.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::LayoutError;

// ── Source ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
    /// Markup given directly as text.
    Inline(String),
}

impl Source {
    /// Classify a user-supplied location: `http(s)://` is a URL, `file://` and
    /// anything else a path.
    pub fn parse(location: &str) -> Self {
        if has_scheme(location, "http://") || has_scheme(location, "https://") {
            Source::Url(location.to_string())
        } else if has_scheme(location, "file://") {
            Source::Path(PathBuf::from(&location["file://".len()..]))
        } else {
            Source::Path(PathBuf::from(location))
        }
    }

    /// Read the markup text.
    pub fn read(&self, fetcher: Option<&dyn Fetch>) -> Result<String, LayoutError> {
        match self {
            Source::Path(path) => std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
                path: path.clone(),
                source,
            }),
            Source::Url(url) => match fetcher {
                Some(fetcher) => fetcher.fetch(url).map_err(|e| LayoutError::Fetch {
                    url: url.clone(),
                    message: e.to_string(),
                }),
                None => Err(LayoutError::Fetch {
                    url: url.clone(),
                    message: "no fetcher configured for URL sources".to_string(),
                }),
            },
            Source::Inline(text) => Ok(text.clone()),
        }
    }
}

/// Case-insensitive scheme match; `scheme` is ASCII.
fn has_scheme(location: &str, scheme: &str) -> bool {
    location.get(..scheme.len()).is_some_and(|head| head.eq_ignore_ascii_case(scheme))
}

/// Short label used in error messages.
impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Url(url) => f.write_str(url),
            Source::Inline(_) => f.write_str("<inline>"),
        }
    }
}

impl From<&str> for Source {
    fn from(location: &str) -> Self {
        Source::parse(location)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

// ── Fetch ─────────────────────────────────────────────────────────────────

pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

/// Retrieves the markup behind a URL.
///
/// Any closure `Fn(&str) -> Result<String, FetchError>` qualifies.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

impl<F> Fetch for F
where
    F: Fn(&str) -> Result<String, FetchError> + Send + Sync,
{
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_locations() {
        assert_eq!(Source::parse("https://example.com/a.html"), Source::Url("https://example.com/a.html".into()));
        assert_eq!(Source::parse("HTTP://example.com"), Source::Url("HTTP://example.com".into()));
        assert_eq!(Source::parse("file:///tmp/a.html"), Source::Path("/tmp/a.html".into()));
        assert_eq!(Source::parse("FILE:///tmp/a.html"), Source::Path("/tmp/a.html".into()));
        assert_eq!(Source::parse("File://rel/a.html"), Source::Path("rel/a.html".into()));
        assert_eq!(Source::parse("fil"), Source::Path("fil".into()));
        assert_eq!(Source::parse("layouts/a.html"), Source::Path("layouts/a.html".into()));
    }

    #[test]
    fn url_without_fetcher_fails() {
        let err = Source::parse("https://example.com").read(None).unwrap_err();
        assert!(matches!(err, LayoutError::Fetch { .. }));
    }

    #[test]
    fn url_goes_through_fetcher() {
        let fetcher = |url: &str| -> Result<String, FetchError> { Ok(format!("<p>{url}</p>")) };
        let text = Source::parse("https://x.test/l").read(Some(&fetcher)).unwrap();
        assert_eq!(text, "<p>https://x.test/l</p>");
    }

    #[test]
    fn fetch_failure_is_reported() {
        let fetcher = |_: &str| -> Result<String, FetchError> { Err("404".into()) };
        let err = Source::parse("https://x.test/l").read(Some(&fetcher)).unwrap_err();
        assert_eq!(err.to_string(), "cannot fetch layout https://x.test/l: 404");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Source::parse("/definitely/not/here.html").read(None).unwrap_err();
        assert!(matches!(err, LayoutError::Io { .. }));
    }
}
