//! Lexer, parser, and tree for the HTML/XML fragments `htmlayout` builds
//! layouts from.
//!
//! This crate is intentionally dependency-free. It follows XML rules: one
//! root element, quoted attribute values, explicitly closed tags. Comments,
//! processing instructions and `<!DOCTYPE>` declarations are skipped.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ast`] | `Document`, `Node`, `Attr`, `Content`, `Span` |
//! | [`error`] | `ParseError` |
//! | [`lexer`] | `Lexer`, `Token` |
//! | [`parser`] | `parse_str` entry point, `MAX_DEPTH` |
//!
//! # Quick start
//!
//! ```rust
//! use htmlayout_markup::parse_str;
//!
//! let src = r#"
//!     <section>
//!         <h1 id="title">Hello</h1>
//!         <dcc-dropdown id="color" data-options="['Red', 'Blue']"/>
//!     </section>
//! "#;
//!
//! let doc = parse_str(src).unwrap();
//! assert_eq!(doc.root.tag, "section");
//! assert_eq!(doc.root.elements().count(), 2);
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{Attr, Content, Document, Node, Span};
pub use error::ParseError;
pub use parser::{MAX_DEPTH, parse_str};

#[cfg(test)]
mod parse_tests {
    use super::*;

    fn ok(src: &str) -> Document { parse_str(src).unwrap() }
    fn err(src: &str) -> ParseError { parse_str(src).unwrap_err() }

    #[test] fn empty_element() { ok("<div></div>"); }
    #[test] fn self_closing() { ok("<br/>"); }
    #[test] fn self_closing_with_space() { ok("<dcc-dropdown id='d' />"); }
    #[test] fn nested_elements() {
        ok("<div><section><p>text</p></section><hr/></div>");
    }
    #[test] fn comments_everywhere() {
        ok("<!-- head --><div><!-- body --><p>a</p><!-- tail --></div><!-- end -->");
    }
    #[test] fn xml_declaration_and_doctype() {
        ok("<?xml version=\"1.0\"?>\n<!DOCTYPE html>\n<div/>");
    }
    #[test] fn single_quoted_attribute() { ok("<p title='a \"quoted\" word'/>"); }
    #[test] fn dotted_and_hyphenated_tags() { ok("<div><dcc.dropdown/><table-datatable/></div>"); }
    #[test] fn leading_bom() { ok("\u{feff}<div/>"); }

    #[test] fn err_empty_document() { assert_eq!(err("").message, "document is empty"); }
    #[test] fn err_blank_document() { err("  \n\t "); }
    #[test] fn err_comment_only() { err("<!-- nothing -->"); }
    #[test] fn err_unclosed_tag() { err("<div><p>text</div>"); }
    #[test] fn err_missing_end_tag() { err("<div>"); }
    #[test] fn err_unquoted_attribute() { err("<div id=main></div>"); }
    #[test] fn err_attribute_without_value() { err("<input disabled/>"); }
    #[test] fn err_duplicate_attribute() { err(r#"<div id="a" id="b"/>"#); }
    #[test] fn err_two_roots() { err("<div/><div/>"); }
    #[test] fn err_text_outside_root() { err("hello <div/>"); }
    #[test] fn err_unknown_entity() { err("<p>&nbsp;</p>"); }
    #[test] fn err_unterminated_comment() { err("<div><!-- oops </div>"); }
    #[test] fn err_attributes_without_space() { err(r#"<div id="a"class="b"/>"#); }

    #[test]
    fn attributes_in_source_order() {
        let doc = ok(r#"<dcc-dropdown id="d" data-options="['A','B']" class="wide"/>"#);
        let names: Vec<&str> = doc.root.attrs.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["id", "data-options", "class"]);
        assert_eq!(doc.root.attr("data-options"), Some("['A','B']"));
        assert_eq!(doc.root.attr("missing"), None);
    }

    #[test]
    fn entities_are_decoded() {
        let doc = ok(r#"<p title="a &lt; b &amp;&amp; c">&#65;&#x42;&quot;&apos;&gt;</p>"#);
        assert_eq!(doc.root.attr("title"), Some("a < b && c"));
        assert_eq!(doc.root.text().as_deref(), Some("AB\"'>"));
    }

    #[test]
    fn cdata_is_literal_text() {
        let doc = ok("<p><![CDATA[<b>&amp;</b>]]></p>");
        assert_eq!(doc.root.text().as_deref(), Some("<b>&amp;</b>"));
        assert!(!doc.root.has_elements());
    }

    #[test]
    fn blank_text_is_dropped() {
        let doc = ok("<div>\n    <p>a</p>\n    <p>b</p>\n</div>");
        assert_eq!(doc.root.content.len(), 2);
        assert!(doc.root.text().is_none());
    }

    #[test]
    fn text_split_by_comment_is_merged() {
        let doc = ok("<p>Hello, <!-- name -->world</p>");
        assert_eq!(doc.root.content, vec![Content::Text("Hello, world".to_string())]);
    }

    #[test]
    fn mixed_content_keeps_order() {
        let doc = ok("<p>one<b>two</b>three</p>");
        let kinds: Vec<&str> = doc.root.content.iter().map(|c| match c {
            Content::Text(_) => "text",
            Content::Element(_) => "element",
        }).collect();
        assert_eq!(kinds, ["text", "element", "text"]);
    }

    #[test]
    fn positions_are_one_based() {
        let doc = ok("<div>\n  <p id=\"x\">a</p>\n</div>");
        assert_eq!(doc.root.span, Span::new(1, 1));
        let p = doc.root.elements().next().unwrap();
        assert_eq!(p.span, Span::new(2, 3));
        assert_eq!(p.attrs[0].span, Span::new(2, 6));
    }

    #[test]
    fn mismatched_end_tag_reports_position() {
        let e = err("<div>\n  <p>text</span>\n</div>");
        assert_eq!(e.line, 2);
        assert!(e.message.contains("</p>"), "{}", e.message);
        assert!(e.message.contains("</span>"), "{}", e.message);
    }

    fn nested(depth: usize) -> String {
        format!("{}{}", "<div>".repeat(depth), "</div>".repeat(depth))
    }

    #[test]
    fn nesting_up_to_the_limit() {
        let doc = ok(&nested(MAX_DEPTH));
        let mut depth = 1;
        let mut node = &doc.root;
        while let Some(child) = node.elements().next() {
            node = child;
            depth += 1;
        }
        assert_eq!(depth, MAX_DEPTH);
    }

    #[test]
    fn err_excessive_depth() {
        let e = err(&nested(MAX_DEPTH + 1));
        assert!(e.message.contains("nested deeper"), "{}", e.message);
        assert_eq!((e.line, e.col), (1, 5 * MAX_DEPTH + 1));

        // Far past the limit still fails cleanly.
        assert!(err(&nested(50_000)).message.contains("nested deeper"));
        assert!(err(&format!("{}<br/>{}", "<div>".repeat(MAX_DEPTH), "</div>".repeat(MAX_DEPTH)))
            .message
            .contains("nested deeper"));
    }
}
