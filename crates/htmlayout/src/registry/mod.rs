//! Component registry: which tags exist and what they construct.
//!
//! The registry is assembled once, from static tables and optional
//! configuration, and is read-only while layouts are built. Share it between
//! threads behind an `Arc`.

pub mod families;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

use crate::error::LayoutError;
use families::DASH_FAMILIES;

// ── ContentModel ──────────────────────────────────────────────────────────

/// What may appear between a component's opening and closing tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentModel {
    /// Text runs are accepted (e.g. `<h1>Title</h1>`).
    pub text: bool,
    /// Child elements are accepted.
    pub elements: bool,
}

impl ContentModel {
    pub const MIXED: Self = Self { text: true, elements: true };
    pub const TEXT: Self = Self { text: true, elements: false };
    pub const ELEMENTS: Self = Self { text: false, elements: true };
    pub const EMPTY: Self = Self { text: false, elements: false };

    /// Whether the component takes a `children` argument at all.
    pub fn has_children(&self) -> bool {
        self.text || self.elements
    }
}

// ── Family ────────────────────────────────────────────────────────────────

/// A group of component types supplied by one host-framework module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Family {
    /// Tag prefix (`dcc` in `<dcc-dropdown>`); `None` for plain HTML.
    pub prefix: Option<String>,
    /// Module namespace the host uses to locate the classes.
    pub namespace: String,
    /// Constructor argument that receives the `class` attribute.
    pub class_prop: String,
}

impl Family {
    pub fn new(prefix: Option<&str>, namespace: impl Into<String>) -> Self {
        Self {
            prefix: prefix.map(str::to_string),
            namespace: namespace.into(),
            class_prop: "className".to_string(),
        }
    }

    pub fn class_prop(mut self, prop: impl Into<String>) -> Self {
        self.class_prop = prop.into();
        self
    }
}

// ── ComponentType ─────────────────────────────────────────────────────────

/// A constructible component class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentType {
    pub family: Arc<Family>,
    /// Class name: `"Dropdown"`, `"H1"`.
    pub name: String,
    /// Canonical tag: `"dcc-dropdown"`, `"h1"`.
    pub tag: String,
    pub content: ContentModel,
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.family.namespace, self.name)
    }
}

/// A component declaration passed to [`Registry::register_family`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSpec {
    pub name: String,
    pub content: ContentModel,
}

impl ComponentSpec {
    pub fn new(name: impl Into<String>, content: ContentModel) -> Self {
        Self { name: name.into(), content }
    }
}

// ── Registry ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Registry {
    families: Vec<Arc<Family>>,
    /// prefix → normalized class name → type
    components: HashMap<Option<String>, HashMap<String, Arc<ComponentType>>>,
}

/// Lowercase and drop `-`/`_`, so `LEDDisplay`, `leddisplay` and
/// `led-display` all meet on the same key.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl Registry {
    /// A registry with no families at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The default families: plain HTML plus the Dash extension libraries.
    pub fn dash() -> Self {
        let mut registry = Self::empty();
        for info in DASH_FAMILIES {
            let mut family = Family::new(info.prefix, info.namespace);
            family.class_prop = info.class_prop.to_string();
            let specs = info.components.iter().map(|c| ComponentSpec::new(c.name, c.content));
            // Prefixes in the static table are distinct and valid.
            if let Err(e) = registry.register_family(family, specs, false) {
                warn!("skipping built-in family {:?}: {e}", info.prefix);
            }
        }
        debug!(
            "dash registry ready: {} families, {} components",
            registry.families.len(),
            registry.len()
        );
        registry
    }

    /// Register a family of components.
    ///
    /// If a family with the same prefix is already registered it is left
    /// untouched and `false` is returned, unless `replace` is set, in which
    /// case the old family and all its components are dropped first.
    pub fn register_family(
        &mut self,
        family: Family,
        components: impl IntoIterator<Item = ComponentSpec>,
        replace: bool,
    ) -> Result<bool, LayoutError> {
        if let Some(prefix) = &family.prefix {
            validate_prefix(prefix)?;
        }
        if self.components.contains_key(&family.prefix) {
            if !replace {
                return Ok(false);
            }
            self.components.remove(&family.prefix);
            self.families.retain(|f| f.prefix != family.prefix);
        }

        let family = Arc::new(family);
        let mut by_name: HashMap<String, Arc<ComponentType>> = HashMap::new();
        for spec in components {
            let key = normalize_name(&spec.name);
            if key.is_empty() {
                return Err(LayoutError::Config(format!(
                    "empty component name in family {:?}",
                    family.namespace
                )));
            }
            let tag = match &family.prefix {
                Some(prefix) => format!("{prefix}-{key}"),
                None => key.clone(),
            };
            let ty = Arc::new(ComponentType {
                family: Arc::clone(&family),
                name: spec.name,
                tag,
                content: spec.content,
            });
            if let Some(prev) = by_name.insert(key, Arc::clone(&ty)) {
                warn!("{} shadows {} (same tag <{}>)", ty, prev, ty.tag);
            }
        }

        debug!(
            "registered family {} (prefix {:?}, {} components)",
            family.namespace,
            family.prefix,
            by_name.len()
        );
        self.components.insert(family.prefix.clone(), by_name);
        self.families.push(family);
        Ok(true)
    }

    /// Look up a family by prefix (`None` for plain HTML).
    pub fn family(&self, prefix: Option<&str>) -> Option<&Family> {
        self.families
            .iter()
            .find(|f| f.prefix.as_deref() == prefix)
            .map(|f| f.as_ref())
    }

    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.components.contains_key(&Some(prefix.to_string()))
    }

    /// Look up a component by family prefix and class name (any case,
    /// hyphens and underscores ignored).
    pub fn lookup(&self, prefix: Option<&str>, name: &str) -> Option<&Arc<ComponentType>> {
        self.components
            .get(&prefix.map(str::to_string))?
            .get(&normalize_name(name))
    }

    pub fn families(&self) -> impl Iterator<Item = &Family> {
        self.families.iter().map(|f| f.as_ref())
    }

    /// All registered types, in no particular order.
    pub fn types(&self) -> impl Iterator<Item = &Arc<ComponentType>> {
        self.components.values().flat_map(|m| m.values())
    }

    /// Total number of registered component types.
    pub fn len(&self) -> usize {
        self.components.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate_prefix(prefix: &str) -> Result<(), LayoutError> {
    let valid = !prefix.is_empty()
        && prefix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(LayoutError::Config(format!(
            "invalid family prefix {prefix:?}: use lowercase letters and digits only"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_case_and_separators() {
        assert_eq!(normalize_name("LEDDisplay"), "leddisplay");
        assert_eq!(normalize_name("led-display"), "leddisplay");
        assert_eq!(normalize_name("Data_Table"), "datatable");
    }

    #[test]
    fn dash_registry_has_all_families() {
        let r = Registry::dash();
        for prefix in ["dcc", "table", "daq", "bio", "player", "bootstrap"] {
            assert!(r.has_prefix(prefix), "missing {prefix}");
        }
        assert!(r.family(None).is_some());
        assert!(r.len() > 200);
    }

    #[test]
    fn types_lists_every_registered_component() {
        let r = Registry::dash();
        assert_eq!(r.types().count(), r.len());
        assert!(r.types().any(|t| t.tag == "dcc-dropdown"));
        assert!(r.types().any(|t| t.tag == "h1" && t.family.prefix.is_none()));
        for ty in r.types() {
            let prefix = ty.family.prefix.as_deref();
            assert!(std::sync::Arc::ptr_eq(ty, r.lookup(prefix, &ty.name).unwrap()), "{ty}");
        }
        assert_eq!(Registry::empty().types().count(), 0);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let r = Registry::dash();
        let dd = r.lookup(Some("dcc"), "DROPDOWN").unwrap();
        assert_eq!(dd.name, "Dropdown");
        assert_eq!(dd.tag, "dcc-dropdown");
        assert_eq!(dd.family.namespace, "dash_core_components");
        assert_eq!(r.lookup(None, "h1").unwrap().name, "H1");
    }

    #[test]
    fn same_class_name_in_two_families_stays_distinct() {
        let r = Registry::dash();
        let dcc = r.lookup(Some("dcc"), "slider").unwrap();
        let daq = r.lookup(Some("daq"), "slider").unwrap();
        assert_ne!(dcc, daq);
        assert_eq!(daq.to_string(), "dash_daq.Slider");
    }

    #[test]
    fn content_models_are_declared() {
        let r = Registry::dash();
        assert_eq!(r.lookup(None, "h1").unwrap().content, ContentModel::MIXED);
        assert_eq!(r.lookup(None, "br").unwrap().content, ContentModel::EMPTY);
        assert_eq!(r.lookup(Some("dcc"), "markdown").unwrap().content, ContentModel::TEXT);
        assert_eq!(r.lookup(Some("dcc"), "tabs").unwrap().content, ContentModel::ELEMENTS);
        assert!(!r.lookup(Some("dcc"), "dropdown").unwrap().content.has_children());
    }

    #[test]
    fn existing_prefix_is_kept_without_replace() {
        let mut r = Registry::dash();
        let added = r
            .register_family(
                Family::new(Some("dcc"), "fake_dcc"),
                [ComponentSpec::new("Widget", ContentModel::EMPTY)],
                false,
            )
            .unwrap();
        assert!(!added);
        assert!(r.lookup(Some("dcc"), "dropdown").is_some());
        assert!(r.lookup(Some("dcc"), "widget").is_none());
    }

    #[test]
    fn replace_drops_the_old_family() {
        let mut r = Registry::dash();
        let added = r
            .register_family(
                Family::new(Some("dcc"), "fake_dcc"),
                [ComponentSpec::new("Widget", ContentModel::EMPTY)],
                true,
            )
            .unwrap();
        assert!(added);
        assert!(r.lookup(Some("dcc"), "dropdown").is_none());
        assert_eq!(r.family(Some("dcc")).unwrap().namespace, "fake_dcc");
        assert_eq!(r.families().filter(|f| f.prefix.as_deref() == Some("dcc")).count(), 1);
    }

    #[test]
    fn invalid_prefixes_are_rejected() {
        let mut r = Registry::empty();
        for bad in ["", "my-lib", "My", "a.b"] {
            let res = r.register_family(Family::new(Some(bad), "x"), [], false);
            assert!(matches!(res, Err(LayoutError::Config(_))), "{bad:?} accepted");
        }
    }

    #[test]
    fn custom_class_prop() {
        let mut r = Registry::empty();
        r.register_family(
            Family::new(Some("mine"), "my_lib").class_prop("class_name"),
            [ComponentSpec::new("Box", ContentModel::MIXED)],
            false,
        )
        .unwrap();
        assert_eq!(r.lookup(Some("mine"), "box").unwrap().family.class_prop, "class_name");
        assert_eq!(r.len(), 1);
    }
}
