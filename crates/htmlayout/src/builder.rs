use std::collections::BTreeMap;
use std::sync::Arc;

use htmlayout_markup::{Content, Document, Node, Span, parse_str};
use log::{debug, trace, warn};
use serde_json::Value as Json;

use crate::attrs::coerce_attrs;
use crate::component::{Child, Component};
use crate::config::{DuplicateIds, LayoutConfig};
use crate::error::LayoutError;
use crate::registry::{ComponentSpec, Family, Registry};
use crate::resolve::TagResolver;
use crate::source::{Fetch, Source};

// ── Layout ────────────────────────────────────────────────────────────────

/// A built layout: the root component plus the identifier index.
///
/// The index stores child-index paths into the tree it was built with, so
/// the layout is immutable once returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    root: Component,
    ids: BTreeMap<String, Vec<usize>>,
}

impl Layout {
    pub fn root(&self) -> &Component {
        &self.root
    }

    pub fn into_root(self) -> Component {
        self.root
    }

    /// The component declared with `id`, if any.
    pub fn get(&self, id: &str) -> Option<&Component> {
        self.root.at_path(self.ids.get(id)?)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// All ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.keys().map(String::as_str)
    }

    /// `(id, component)` pairs, sorted by id.
    pub fn components(&self) -> impl Iterator<Item = (&str, &Component)> {
        self.ids
            .iter()
            .filter_map(|(id, path)| Some((id.as_str(), self.root.at_path(path)?)))
    }

    /// Number of indexed ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn to_json(&self) -> Json {
        self.root.to_json()
    }
}

// ── LayoutBuilder ─────────────────────────────────────────────────────────

/// Builds [`Layout`]s from markup.
///
/// Configure once, then build as many layouts as needed; every build starts
/// from a fresh identifier index.
///
/// ```rust
/// use htmlayout::LayoutBuilder;
///
/// let layout = LayoutBuilder::new()
///     .build_str(r#"<section><h1 id="t">Title</h1></section>"#)
///     .unwrap();
/// assert_eq!(layout.get("t").unwrap().text(), Some("Title"));
/// ```
pub struct LayoutBuilder {
    registry: Arc<Registry>,
    duplicate_ids: DuplicateIds,
    dotted_tags: bool,
    fetcher: Option<Box<dyn Fetch>>,
}

impl LayoutBuilder {
    /// A builder over the default Dash registry.
    pub fn new() -> Self {
        Self::with_registry(Registry::dash())
    }

    pub fn with_registry(registry: impl Into<Arc<Registry>>) -> Self {
        let config = LayoutConfig::default();
        Self {
            registry: registry.into(),
            duplicate_ids: config.duplicate_ids,
            dotted_tags: config.dotted_tags,
            fetcher: None,
        }
    }

    /// The Dash registry extended by `config.libraries`, with its options.
    pub fn from_config(config: &LayoutConfig) -> Result<Self, LayoutError> {
        let mut registry = Registry::dash();
        config.apply_to(&mut registry)?;
        Ok(Self::with_registry(registry)
            .duplicate_ids(config.duplicate_ids)
            .dotted_tags(config.dotted_tags))
    }

    /// Register an extra component family. See [`Registry::register_family`].
    pub fn register_family(
        mut self,
        family: Family,
        components: impl IntoIterator<Item = ComponentSpec>,
        replace: bool,
    ) -> Result<Self, LayoutError> {
        Arc::make_mut(&mut self.registry).register_family(family, components, replace)?;
        Ok(self)
    }

    pub fn duplicate_ids(mut self, policy: DuplicateIds) -> Self {
        self.duplicate_ids = policy;
        self
    }

    /// Accept the older `<prefix.name>` tag spelling.
    pub fn dotted_tags(mut self, enabled: bool) -> Self {
        self.dotted_tags = enabled;
        self
    }

    /// Set the fetcher used for URL sources.
    pub fn fetcher(mut self, fetcher: impl Fetch + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    // ── Entry points ──────────────────────────────────────────────────────

    /// Read, parse and build a layout from a file path, URL or inline text.
    pub fn load(&self, source: impl Into<Source>) -> Result<Layout, LayoutError> {
        let source = source.into();
        let text = source.read(self.fetcher.as_deref())?;
        let doc = parse_str(&text).map_err(|e| LayoutError::Parse {
            origin: source.to_string(),
            source: e,
        })?;
        let layout = self.build_document(&doc)?;
        debug!("built layout from {source}: {} ids", layout.len());
        Ok(layout)
    }

    /// Parse and build a layout from markup text.
    pub fn build_str(&self, src: &str) -> Result<Layout, LayoutError> {
        self.load(Source::Inline(src.to_string()))
    }

    /// Build a layout from an already parsed document.
    pub fn build_document(&self, doc: &Document) -> Result<Layout, LayoutError> {
        let mut build = TreeBuild {
            resolver: TagResolver::new(&self.registry, self.dotted_tags),
            duplicate_ids: self.duplicate_ids,
            ids: BTreeMap::new(),
            path: Vec::new(),
        };
        let root = build.build_node(&doc.root)?;
        let ids = build.ids.into_iter().map(|(id, entry)| (id, entry.path)).collect();
        Ok(Layout { root, ids })
    }
}

impl Default for LayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ── TreeBuild ─────────────────────────────────────────────────────────────

struct IdEntry {
    path: Vec<usize>,
    span: Span,
}

/// State of one build call.
struct TreeBuild<'r> {
    resolver: TagResolver<'r>,
    duplicate_ids: DuplicateIds,
    ids: BTreeMap<String, IdEntry>,
    /// Child indices from the root to the node being built.
    path: Vec<usize>,
}

impl TreeBuild<'_> {
    /// Depth-first, pre-order: resolve the node and its arguments, record its
    /// id, then build the content in document order.
    fn build_node(&mut self, node: &Node) -> Result<Component, LayoutError> {
        let ty = self.resolver.resolve(&node.tag).map_err(|reason| LayoutError::Resolution {
            tag: node.tag.clone(),
            span: node.span,
            reason,
        })?;
        let props = coerce_attrs(node, ty)?;

        if let Some(id) = node.attr("id") {
            self.record_id(id, node)?;
        }

        let children = if ty.content.has_children() {
            let mut children = Vec::new();
            let last = node.content.len().saturating_sub(1);
            for (i, item) in node.content.iter().enumerate() {
                match item {
                    Content::Text(text) => {
                        if !ty.content.text {
                            return Err(content_error(node, "text content"));
                        }
                        if let Some(text) = shape_text(text, i == 0, i == last) {
                            children.push(Child::Text(text));
                        }
                    }
                    Content::Element(child) => {
                        if !ty.content.elements {
                            return Err(content_error(node, "child elements"));
                        }
                        self.path.push(children.len());
                        let built = self.build_node(child);
                        self.path.pop();
                        children.push(Child::Component(built?));
                    }
                }
            }
            Some(children)
        } else {
            if let Some(item) = node.content.first() {
                let what = match item {
                    Content::Text(_) => "text content",
                    Content::Element(_) => "child elements",
                };
                return Err(content_error(node, what));
            }
            None
        };

        trace!("built {} at {}", ty, node.span);
        Ok(Component { ty: Arc::clone(ty), props, children, span: node.span })
    }

    fn record_id(&mut self, id: &str, node: &Node) -> Result<(), LayoutError> {
        if let Some(first) = self.ids.get(id) {
            match self.duplicate_ids {
                DuplicateIds::Reject => {
                    return Err(LayoutError::DuplicateId {
                        id: id.to_string(),
                        tag: node.tag.clone(),
                        span: node.span,
                        first: first.span,
                    });
                }
                DuplicateIds::LastWins => {
                    warn!("id {id:?} at {} replaces the one declared at {}", node.span, first.span);
                }
            }
        }
        self.ids.insert(id.to_string(), IdEntry { path: self.path.clone(), span: node.span });
        Ok(())
    }
}

/// Trim a text run at the element's edges. Whitespace next to a sibling
/// element collapses to one space, so `Hello <b>bold</b> world` keeps its
/// word breaks.
fn shape_text(text: &str, first: bool, last: bool) -> Option<String> {
    let core = text.trim();
    if core.is_empty() {
        return None;
    }
    let mut out = String::with_capacity(core.len() + 2);
    if !first && text.starts_with(char::is_whitespace) {
        out.push(' ');
    }
    out.push_str(core);
    if !last && text.ends_with(char::is_whitespace) {
        out.push(' ');
    }
    Some(out)
}

fn content_error(node: &Node, what: &'static str) -> LayoutError {
    LayoutError::Content { tag: node.tag.clone(), span: node.span, what }
}
