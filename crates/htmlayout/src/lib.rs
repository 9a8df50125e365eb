//! Build Dash component layouts from HTML/XML fragments.
//!
//! Author the layout as markup:
//!
//! ```html
//! <div>
//!     <h1>Simple Dashboard</h1>
//!     <div class="content">
//!         <dcc-dropdown id="color-dropdown" data-options="['Red', 'Blue']"/>
//!     </div>
//! </div>
//! ```
//!
//! and get back a tree of components plus an index of every element that
//! carries an `id`:
//!
//! ```rust
//! let layout = htmlayout::LayoutBuilder::new()
//!     .build_str(r#"
//!         <div>
//!             <h1>Simple Dashboard</h1>
//!             <div class="content">
//!                 <dcc-dropdown id="color-dropdown" data-options="['Red', 'Blue']"/>
//!             </div>
//!         </div>
//!     "#)
//!     .unwrap();
//!
//! let dropdown = layout.get("color-dropdown").unwrap();
//! assert_eq!(dropdown.name(), "Dropdown");
//! assert_eq!(dropdown.prop("options").unwrap().to_string(), "['Red', 'Blue']");
//! ```
//!
//! # Markup conventions
//!
//! | Markup | Meaning |
//! |--------|---------|
//! | `<section>` | plain HTML component, matched case-insensitively |
//! | `<dcc-dropdown>` | component `Dropdown` of the family registered as `dcc` |
//! | `<dcc.dropdown>` | older spelling of the above, accepted unless disabled |
//! | `title="x"` | string argument `title` |
//! | `data-options="[1, 2]"` | argument `options` parsed as a literal |
//! | `class="x"` | the family's class argument (`className` for Dash) |
//! | `id="x"` | argument `id`, and an entry in the identifier index |
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`registry`] | `Registry`, `Family`, `ComponentType`, `ContentModel` |
//! | [`resolve`] | `TagResolver` |
//! | [`attrs`] | attribute coercion |
//! | [`literal`] | `parse_literal` |
//! | [`builder`] | `LayoutBuilder`, `Layout` |
//! | [`component`] | `Component`, `Child` |
//! | [`config`] | `LayoutConfig` (TOML) |
//! | [`source`] | `Source`, `Fetch` |

pub mod attrs;
pub mod builder;
pub mod component;
pub mod config;
pub mod error;
pub mod literal;
pub mod registry;
pub mod resolve;
pub mod source;
pub mod value;

pub use builder::{Layout, LayoutBuilder};
pub use component::{Child, Component};
pub use config::{DuplicateIds, LayoutConfig};
pub use error::{LayoutError, ResolveFailure};
pub use htmlayout_markup::{Document, Node, ParseError, Span};
pub use registry::{ComponentSpec, ComponentType, ContentModel, Family, Registry};
pub use source::{Fetch, FetchError, Source};
pub use value::Value;

/// Load a layout from a file path or `file://` location with the default
/// Dash registry and options.
pub fn load(source: impl Into<Source>) -> Result<Layout, LayoutError> {
    LayoutBuilder::new().load(source)
}
