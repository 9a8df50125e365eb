use std::fmt;

// ── Span ──────────────────────────────────────────────────────────────────

/// A 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    pub line: usize,
    pub col: usize,
}

impl Span {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

// ── Attr ──────────────────────────────────────────────────────────────────

/// A single `name="value"` attribute, entities already decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub name: String,
    pub value: String,
    /// Position of the attribute name.
    pub span: Span,
}

// ── Content ───────────────────────────────────────────────────────────────

/// One item of an element's content, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Element(Node),
    /// A non-blank run of character data. Whitespace is kept verbatim.
    Text(String),
}

// ── Node ──────────────────────────────────────────────────────────────────

/// An element of the markup tree.
///
/// ```html
/// <dcc-dropdown id="color" data-options="['Red', 'Blue']"/>
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Tag name exactly as written: `"section"`, `"dcc-dropdown"`.
    pub tag: String,
    /// Attributes in source order.
    pub attrs: Vec<Attr>,
    /// Child elements and text runs in source order.
    pub content: Vec<Content>,
    /// Position of the opening `<`.
    pub span: Span,
}

impl Node {
    /// Look up an attribute value by exact name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|a| a.name == name).map(|a| a.value.as_str())
    }

    /// Child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &Node> {
        self.content.iter().filter_map(|c| match c {
            Content::Element(n) => Some(n),
            Content::Text(_) => None,
        })
    }

    pub fn has_elements(&self) -> bool {
        self.elements().next().is_some()
    }

    /// All direct text runs joined together, or `None` if there are none.
    pub fn text(&self) -> Option<String> {
        let mut out: Option<String> = None;
        for c in &self.content {
            if let Content::Text(t) = c {
                out.get_or_insert_with(String::new).push_str(t);
            }
        }
        out
    }
}

// ── Document ──────────────────────────────────────────────────────────────

/// The top-level parse result for a markup fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: Node,
}
