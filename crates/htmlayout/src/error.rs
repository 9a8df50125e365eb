use std::path::PathBuf;

use htmlayout_markup::{ParseError, Span};
use thiserror::Error;

/// Why a tag did not resolve to a component type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveFailure {
    #[error("not a plain HTML component and has no family prefix")]
    UnknownTag,
    #[error("no component family is registered for prefix `{prefix}`")]
    UnknownPrefix { prefix: String },
    #[error("family `{prefix}` has no component named `{name}`")]
    UnknownComponent { prefix: String, name: String },
}

/// Everything that can abort a layout build.
///
/// Build-time variants carry the tag and its `line:col` so a typo in a layout
/// file can be found without a debugger. No partial layout is ever returned.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("cannot read layout {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot fetch layout {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("{origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: ParseError,
    },

    #[error("{span}: cannot resolve <{tag}>: {reason}")]
    Resolution {
        tag: String,
        span: Span,
        reason: ResolveFailure,
    },

    #[error("{span}: bad attribute `{attr}` on <{tag}> (value {raw:?}): {message}")]
    Coercion {
        tag: String,
        attr: String,
        raw: String,
        span: Span,
        message: String,
    },

    #[error("{span}: <{tag}> does not accept {what}")]
    Content {
        tag: String,
        span: Span,
        what: &'static str,
    },

    #[error("{span}: duplicate id {id:?} on <{tag}> (first declared at {first})")]
    DuplicateId {
        id: String,
        tag: String,
        span: Span,
        first: Span,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<toml::de::Error> for LayoutError {
    fn from(err: toml::de::Error) -> Self {
        LayoutError::Config(err.to_string())
    }
}
