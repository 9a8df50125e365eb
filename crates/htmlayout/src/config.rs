//! Builder configuration, loadable from TOML.
//!
//! ```toml
//! duplicate_ids = "reject"   # or "last-wins"
//! dotted_tags = true
//!
//! [[library]]
//! prefix = "colorful"
//! namespace = "dash_colorful_lib"
//! components = [
//!   { name = "ColorBox" },
//!   { name = "Swatch", text = false, children = false },
//! ]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::registry::{ComponentSpec, ContentModel, Family, Registry};

/// What to do when two elements declare the same `id`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateIds {
    /// Abort the build with [`LayoutError::DuplicateId`].
    #[default]
    Reject,
    /// Keep the element seen last in document order.
    LastWins,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    #[serde(default)]
    pub duplicate_ids: DuplicateIds,

    /// Accept `<dcc.dropdown>` as well as `<dcc-dropdown>`.
    #[serde(default = "default_true")]
    pub dotted_tags: bool,

    /// Extra component families, registered on top of the Dash defaults.
    #[serde(default, rename = "library")]
    pub libraries: Vec<LibraryConfig>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            duplicate_ids: DuplicateIds::default(),
            dotted_tags: true,
            libraries: Vec::new(),
        }
    }
}

/// One `[[library]]` table.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    /// Omit to (re)define the plain HTML family.
    #[serde(default)]
    pub prefix: Option<String>,
    pub namespace: String,
    #[serde(default = "default_class_prop")]
    pub class_prop: String,
    /// Replace a family already registered under the same prefix.
    #[serde(default)]
    pub replace: bool,
    #[serde(default)]
    pub components: Vec<ComponentConfig>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentConfig {
    pub name: String,
    #[serde(default = "default_true")]
    pub text: bool,
    #[serde(default = "default_true")]
    pub children: bool,
}

fn default_true() -> bool {
    true
}

fn default_class_prop() -> String {
    "className".to_string()
}

impl LayoutConfig {
    pub fn from_toml_str(src: &str) -> Result<Self, LayoutError> {
        Ok(toml::from_str(src)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Register every configured library into `registry`.
    ///
    /// A library whose prefix is taken is skipped unless it sets `replace`.
    pub fn apply_to(&self, registry: &mut Registry) -> Result<(), LayoutError> {
        for lib in &self.libraries {
            let family = Family::new(lib.prefix.as_deref(), lib.namespace.clone())
                .class_prop(lib.class_prop.clone());
            let specs = lib.components.iter().map(|c| {
                ComponentSpec::new(c.name.clone(), ContentModel { text: c.text, elements: c.children })
            });
            if !registry.register_family(family, specs, lib.replace)? {
                log::warn!(
                    "library {} not registered: prefix {:?} is taken (set `replace = true` to override)",
                    lib.namespace,
                    lib.prefix
                );
            }
        }
        Ok(())
    }
}
