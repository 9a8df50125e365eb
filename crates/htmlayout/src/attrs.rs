//! Attributes → constructor keyword arguments.
//!
//! | Attribute | Argument |
//! |-----------|----------|
//! | `title="x"` | `title='x'` (always a string) |
//! | `data-options="[1, 2]"` | `options=[1, 2]` (literal text, see [`crate::literal`]) |
//! | `class="wide"` / `className="wide"` | the family's class argument |
//! | `id="x"` | `id='x'`, also recorded in the identifier index by the builder |

use std::collections::BTreeMap;

use htmlayout_markup::{Attr, Node};

use crate::error::LayoutError;
use crate::literal::parse_literal;
use crate::registry::ComponentType;
use crate::value::Value;

const DATA_PREFIX: &str = "data-";

/// Turn a node's attributes into keyword arguments for `ty`.
pub fn coerce_attrs(node: &Node, ty: &ComponentType) -> Result<BTreeMap<String, Value>, LayoutError> {
    let mut props = BTreeMap::new();
    // argument name → attribute that produced it
    let mut origin: BTreeMap<String, &str> = BTreeMap::new();

    for attr in &node.attrs {
        let (key, value) = coerce_attr(node, attr, ty)?;
        if let Some(prev) = origin.insert(key.clone(), &attr.name) {
            return Err(coercion_error(
                node,
                attr,
                format!("argument `{key}` is already set by attribute `{prev}`"),
            ));
        }
        props.insert(key, value);
    }
    Ok(props)
}

fn coerce_attr(node: &Node, attr: &Attr, ty: &ComponentType) -> Result<(String, Value), LayoutError> {
    let name = attr.name.as_str();

    let has_data_prefix = name.len() > DATA_PREFIX.len()
        && name.get(..DATA_PREFIX.len()).is_some_and(|p| p.eq_ignore_ascii_case(DATA_PREFIX));
    if has_data_prefix {
        let key = &name[DATA_PREFIX.len()..];
        if !is_identifier(key) {
            return Err(coercion_error(
                node,
                attr,
                format!("`{key}` is not a valid argument name"),
            ));
        }
        if key == "children" {
            return Err(coercion_error(
                node,
                attr,
                "`children` is built from the element content and cannot be set".to_string(),
            ));
        }
        let value = parse_literal(&attr.value)
            .map_err(|e| coercion_error(node, attr, format!("malformed literal: {e}")))?;
        return Ok((key.to_string(), value));
    }

    if name == "class" || name == "className" {
        return Ok((ty.family.class_prop.clone(), Value::Str(attr.value.clone())));
    }

    Ok((name.to_string(), Value::Str(attr.value.clone())))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn coercion_error(node: &Node, attr: &Attr, message: String) -> LayoutError {
    LayoutError::Coercion {
        tag: node.tag.clone(),
        attr: attr.name.clone(),
        raw: attr.value.clone(),
        span: attr.span,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use htmlayout_markup::parse_str;

    fn coerce(src: &str) -> Result<BTreeMap<String, Value>, LayoutError> {
        let doc = parse_str(src).unwrap();
        let registry = Registry::dash();
        let ty = crate::resolve::TagResolver::new(&registry, true)
            .resolve(&doc.root.tag)
            .unwrap()
            .clone();
        coerce_attrs(&doc.root, &ty)
    }

    #[test]
    fn plain_attributes_stay_strings() {
        let props = coerce(r#"<dcc-input type="number" value="3"/>"#).unwrap();
        assert_eq!(props["type"], Value::from("number"));
        assert_eq!(props["value"], Value::from("3"));
    }

    #[test]
    fn data_attribute_is_a_literal() {
        let props = coerce(r#"<dcc-dropdown data-options="[1, 2, 3]"/>"#).unwrap();
        assert_eq!(props["options"], Value::from(vec![1i64, 2, 3]));
        assert!(!props.contains_key("data-options"));
    }

    #[test]
    fn data_prefix_is_case_insensitive_but_name_keeps_case() {
        let props = coerce(r#"<dcc-graph DATA-animate="True" data-responsiveMode="False"/>"#).unwrap();
        assert_eq!(props["animate"], Value::Bool(true));
        assert_eq!(props["responsiveMode"], Value::Bool(false));
    }

    #[test]
    fn class_maps_to_class_prop() {
        let props = coerce(r#"<div class="content wide"/>"#).unwrap();
        assert_eq!(props["className"], Value::from("content wide"));
        assert!(!props.contains_key("class"));
    }

    #[test]
    fn id_is_passed_through() {
        let props = coerce(r#"<div id="main"/>"#).unwrap();
        assert_eq!(props["id"], Value::from("main"));
    }

    #[test]
    fn non_literal_boolean_token_is_rejected() {
        let err = coerce(r#"<dcc-dropdown data-clearable="yes"/>"#).unwrap_err();
        match err {
            LayoutError::Coercion { tag, attr, raw, .. } => {
                assert_eq!(tag, "dcc-dropdown");
                assert_eq!(attr, "data-clearable");
                assert_eq!(raw, "yes");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn malformed_literal_reports_position() {
        let err = coerce("<dcc-dropdown\n   data-options=\"['A', 'B'\"/>").unwrap_err();
        match err {
            LayoutError::Coercion { span, .. } => assert_eq!((span.line, span.col), (2, 4)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn conflicting_attributes_are_rejected() {
        assert!(matches!(
            coerce(r#"<div class="a" className="b"/>"#),
            Err(LayoutError::Coercion { .. })
        ));
        assert!(matches!(
            coerce(r#"<dcc-input value="1" data-value="1"/>"#),
            Err(LayoutError::Coercion { .. })
        ));
    }

    #[test]
    fn invalid_argument_names_are_rejected() {
        assert!(coerce(r#"<div data-foo-bar="1"/>"#).is_err());
        assert!(coerce(r#"<div data-1st="1"/>"#).is_err());
        assert!(coerce(r#"<div data-children="[]"/>"#).is_err());
    }

    #[test]
    fn bare_data_attribute_is_plain() {
        // `data-` alone has no argument name; it is an ordinary attribute.
        let props = coerce(r#"<div data-="x"/>"#).unwrap();
        assert_eq!(props["data-"], Value::from("x"));
    }
}
