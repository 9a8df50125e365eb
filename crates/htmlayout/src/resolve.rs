//! Tag name → component type.
//!
//! `<section>` resolves in the plain HTML family. `<dcc-dropdown>` splits on
//! the first separator: `dcc` picks the family, `dropdown` the class in it.
//! The dotted spelling `<dcc.dropdown>` of older documents is accepted too
//! unless disabled.

use std::sync::Arc;

use crate::error::ResolveFailure;
use crate::registry::{ComponentType, Registry};

pub struct TagResolver<'r> {
    registry: &'r Registry,
    dotted: bool,
}

impl<'r> TagResolver<'r> {
    pub fn new(registry: &'r Registry, dotted: bool) -> Self {
        Self { registry, dotted }
    }

    /// Resolve a tag. Pure: depends only on the tag and the registry.
    pub fn resolve(&self, tag: &str) -> Result<&'r Arc<ComponentType>, ResolveFailure> {
        let Some(at) = self.separator(tag) else {
            return self.registry.lookup(None, tag).ok_or(ResolveFailure::UnknownTag);
        };

        let prefix = tag[..at].to_ascii_lowercase();
        let name = &tag[at + 1..];
        if !self.registry.has_prefix(&prefix) {
            return Err(ResolveFailure::UnknownPrefix { prefix });
        }
        self.registry
            .lookup(Some(&prefix), name)
            .ok_or_else(|| ResolveFailure::UnknownComponent { prefix, name: name.to_string() })
    }

    fn separator(&self, tag: &str) -> Option<usize> {
        tag.find(|c: char| c == '-' || (self.dotted && c == '.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ComponentSpec, ContentModel, Family};

    fn resolve(tag: &str) -> Result<String, ResolveFailure> {
        let registry = Registry::dash();
        TagResolver::new(&registry, true)
            .resolve(tag)
            .map(|ty| ty.to_string())
    }

    #[test]
    fn plain_html() {
        assert_eq!(resolve("section").unwrap(), "dash_html_components.Section");
        assert_eq!(resolve("H1").unwrap(), "dash_html_components.H1");
    }

    #[test]
    fn prefixed_families() {
        assert_eq!(resolve("dcc-dropdown").unwrap(), "dash_core_components.Dropdown");
        assert_eq!(resolve("table-datatable").unwrap(), "dash_table.DataTable");
        assert_eq!(resolve("daq-booleanswitch").unwrap(), "dash_daq.BooleanSwitch");
        assert_eq!(resolve("DCC-Graph").unwrap(), "dash_core_components.Graph");
    }

    #[test]
    fn hyphenated_class_names() {
        assert_eq!(resolve("dcc-date-picker-range").unwrap(), "dash_core_components.DatePickerRange");
        assert_eq!(resolve("daq-led-display").unwrap(), "dash_daq.LEDDisplay");
    }

    #[test]
    fn dotted_tags() {
        assert_eq!(resolve("dcc.dropdown").unwrap(), "dash_core_components.Dropdown");
        let registry = Registry::dash();
        let strict = TagResolver::new(&registry, false);
        assert_eq!(strict.resolve("dcc.dropdown"), Err(ResolveFailure::UnknownTag));
    }

    #[test]
    fn unknown_tag() {
        assert_eq!(resolve("blink2"), Err(ResolveFailure::UnknownTag));
    }

    #[test]
    fn unknown_prefix() {
        assert_eq!(
            resolve("foo-dropdown"),
            Err(ResolveFailure::UnknownPrefix { prefix: "foo".to_string() })
        );
    }

    #[test]
    fn unknown_component_in_known_family() {
        assert_eq!(
            resolve("dcc-dropdwn"),
            Err(ResolveFailure::UnknownComponent {
                prefix: "dcc".to_string(),
                name: "dropdwn".to_string(),
            })
        );
    }

    #[test]
    fn resolves_the_registered_type_exactly() {
        let mut registry = Registry::empty();
        registry
            .register_family(
                Family::new(Some("fake"), "fake_lib"),
                [ComponentSpec::new("Widget", ContentModel::EMPTY)],
                false,
            )
            .unwrap();
        let expected = registry.lookup(Some("fake"), "Widget").unwrap();
        let got = TagResolver::new(&registry, true).resolve("fake-widget").unwrap();
        assert!(Arc::ptr_eq(expected, got));
    }
}
