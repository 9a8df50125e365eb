use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use htmlayout_markup::Span;
use serde_json::{Map, Value as Json};

use crate::registry::ComponentType;
use crate::value::{Value, write_quoted};

// ── Child ─────────────────────────────────────────────────────────────────

/// One entry of a component's `children` argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Text(String),
    Component(Component),
}

impl Child {
    pub fn as_component(&self) -> Option<&Component> {
        match self {
            Child::Component(c) => Some(c),
            Child::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Child::Text(t) => Some(t),
            Child::Component(_) => None,
        }
    }

    fn to_json(&self) -> Json {
        match self {
            Child::Text(t) => Json::String(t.clone()),
            Child::Component(c) => c.to_json(),
        }
    }
}

// ── Component ─────────────────────────────────────────────────────────────

/// A built component: its type plus the keyword arguments it is constructed
/// with.
///
/// `children` is `Some` exactly when the type accepts content, even if the
/// markup left it empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub ty: Arc<ComponentType>,
    pub props: BTreeMap<String, Value>,
    pub children: Option<Vec<Child>>,
    /// Where the element started in the markup.
    pub span: Span,
}

impl Component {
    /// Class name: `"Dropdown"`.
    pub fn name(&self) -> &str {
        &self.ty.name
    }

    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    pub fn id(&self) -> Option<&str> {
        self.prop("id").and_then(Value::as_str)
    }

    pub fn children(&self) -> &[Child] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// The text of a component whose only child is text: `<h1>Title</h1>`.
    pub fn text(&self) -> Option<&str> {
        match self.children() {
            [Child::Text(t)] => Some(t),
            _ => None,
        }
    }

    /// Child components, skipping text.
    pub fn child_components(&self) -> impl Iterator<Item = &Component> {
        self.children().iter().filter_map(Child::as_component)
    }

    /// Follow a path of child indices down from this component.
    pub fn at_path(&self, path: &[usize]) -> Option<&Component> {
        let mut node = self;
        for &i in path {
            node = node.children().get(i)?.as_component()?;
        }
        Some(node)
    }

    /// Depth-first, pre-order walk over this component and its descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Dash wire format: `{"type", "namespace", "props"}`.
    ///
    /// A lone text child becomes a plain string, as Dash writes `H1("Title")`.
    pub fn to_json(&self) -> Json {
        let mut props: Map<String, Json> =
            self.props.iter().map(|(k, v)| (k.clone(), v.to_json())).collect();
        match self.children() {
            [] => {}
            [Child::Text(t)] => {
                props.insert("children".to_string(), Json::String(t.clone()));
            }
            children => {
                props.insert(
                    "children".to_string(),
                    Json::Array(children.iter().map(Child::to_json).collect()),
                );
            }
        }
        let mut out = Map::new();
        out.insert("type".to_string(), Json::String(self.ty.name.clone()));
        out.insert("namespace".to_string(), Json::String(self.ty.family.namespace.clone()));
        out.insert("props".to_string(), Json::Object(props));
        Json::Object(out)
    }
}

/// Iterator returned by [`Component::walk`].
pub struct Walk<'c> {
    stack: Vec<&'c Component>,
}

impl<'c> Iterator for Walk<'c> {
    type Item = &'c Component;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.child_components().collect::<Vec<_>>().into_iter().rev());
        Some(node)
    }
}

// ── Display ───────────────────────────────────────────────────────────────

/// Constructor-call spelling:
/// `Section(children=[H1('Title', id='t'), Dropdown(id='d', options=['A', 'B'])])`.
impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.ty.name)?;
        let mut first = true;
        let mut sep = |f: &mut fmt::Formatter<'_>| {
            let out = if first { Ok(()) } else { f.write_str(", ") };
            first = false;
            out
        };
        match self.children() {
            [] => {}
            [Child::Text(t)] => {
                sep(f)?;
                write_quoted(f, t)?;
            }
            children => {
                sep(f)?;
                f.write_str("children=[")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match child {
                        Child::Text(t) => write_quoted(f, t)?,
                        Child::Component(c) => write!(f, "{c}")?,
                    }
                }
                f.write_str("]")?;
            }
        }
        for (key, value) in &self.props {
            sep(f)?;
            write!(f, "{key}={value}")?;
        }
        f.write_str(")")
    }
}
