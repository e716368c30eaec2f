//! Small helpers over the `markup5ever_rcdom` tree used by both the TOC
//! parser and the structural page rewrite.

use crate::types::NextLink;
use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{Attribute, LocalName, Namespace, QualName, parse_document};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

pub fn parse_html(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

pub fn element_name(node: &Handle) -> Option<&str> {
    match node.data {
        NodeData::Element { ref name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

fn is_element(node: &Handle, tag: &str) -> bool {
    element_name(node) == Some(tag)
}

pub fn find_child(node: &Handle, tag: &str) -> Option<Handle> {
    node.children
        .borrow()
        .iter()
        .find(|child| is_element(child, tag))
        .cloned()
}

/// First element named `tag` below `node`, in document order.
pub fn find_descendant(node: &Handle, tag: &str) -> Option<Handle> {
    for child in node.children.borrow().iter() {
        if is_element(child, tag) {
            return Some(child.clone());
        }
        if let Some(found) = find_descendant(child, tag) {
            return Some(found);
        }
    }
    None
}

pub fn find_all_descendants(node: &Handle, tag: &str) -> Vec<Handle> {
    fn collect(node: &Handle, tag: &str, found: &mut Vec<Handle>) {
        for child in node.children.borrow().iter() {
            if is_element(child, tag) {
                found.push(child.clone());
            }
            collect(child, tag, found);
        }
    }

    let mut found = Vec::new();
    collect(node, tag, &mut found);
    found
}

pub fn get_attr_value(node: &Handle, name: &str) -> Option<String> {
    match node.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| attr.name.local.as_ref() == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

pub fn text_content(node: &Handle) -> String {
    fn collect(node: &Handle, text: &mut String) {
        match node.data {
            NodeData::Text { ref contents } => text.push_str(&contents.borrow()),
            _ => {
                for child in node.children.borrow().iter() {
                    collect(child, text);
                }
            }
        }
    }

    let mut text = String::new();
    collect(node, &mut text);
    text
}

pub fn is_whitespace_text(node: &Handle) -> bool {
    match node.data {
        NodeData::Text { ref contents } => contents
            .borrow()
            .chars()
            .all(|c| c.is_ascii_whitespace()),
        _ => false,
    }
}

/// Last child of `node` that is not whitespace-only text.
pub fn last_significant_child(node: &Handle) -> Option<Handle> {
    node.children
        .borrow()
        .iter()
        .rev()
        .find(|child| !is_whitespace_text(child))
        .cloned()
}

pub fn is_same_link(node: &Handle, link: &NextLink) -> bool {
    is_element(node, "a")
        && get_attr_value(node, "href").as_deref() == Some(link.href.as_str())
        && text_content(node) == link.label
}

pub fn new_link_element(link: &NextLink) -> Handle {
    let href = Attribute {
        name: QualName::new(None, Namespace::from(""), LocalName::from("href")),
        value: StrTendril::from(link.href.as_str()),
    };
    let anchor = Node::new(NodeData::Element {
        name: QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from("a")),
        attrs: RefCell::new(vec![href]),
        template_contents: RefCell::new(None),
        mathml_annotation_xml_integration_point: false,
    });
    let label = Node::new(NodeData::Text {
        contents: RefCell::new(StrTendril::from(link.label.as_str())),
    });
    append_child(&anchor, label);
    anchor
}

pub fn append_child(parent: &Handle, child: Handle) {
    let previous = child.parent.replace(Some(Rc::downgrade(parent)));
    debug_assert!(previous.is_none(), "child already had a parent");
    parent.children.borrow_mut().push(child);
}

/// Serializes the whole document, doctype included.
pub fn serialize_document(dom: &RcDom) -> io::Result<String> {
    let document: SerializableHandle = dom.document.clone().into();
    let mut bytes = Vec::new();
    serialize(
        &mut bytes,
        &document,
        SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..Default::default()
        },
    )?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_of(dom: &RcDom) -> Handle {
        let html = find_child(&dom.document, "html").unwrap();
        find_child(&html, "body").unwrap()
    }

    #[test]
    fn test_find_descendant_is_depth_first() {
        let dom = parse_html(
            r#"<body><div><nav id="inner"></nav></div><nav id="outer"></nav></body>"#,
        );
        let nav = find_descendant(&body_of(&dom), "nav").unwrap();
        assert_eq!(get_attr_value(&nav, "id"), Some("inner".to_string()));
    }

    #[test]
    fn test_text_content_joins_nested_text() {
        let dom = parse_html(r#"<body><a href="x.html">Part <em>One</em></a></body>"#);
        let link = find_descendant(&body_of(&dom), "a").unwrap();
        assert_eq!(text_content(&link), "Part One");
    }

    #[test]
    fn test_new_link_element_serializes_like_next_link() {
        let dom = parse_html("<!DOCTYPE html><html><body><p>Text</p></body></html>");
        let link = NextLink {
            href: "ch2.html".to_string(),
            label: "Next: Chapter 2".to_string(),
        };
        let body = body_of(&dom);
        append_child(&body, new_link_element(&link));

        let html = serialize_document(&dom).unwrap();
        assert_eq!(
            html,
            r#"<!DOCTYPE html><html><head></head><body><p>Text</p><a href="ch2.html">Next: Chapter 2</a></body></html>"#
        );
        assert!(is_same_link(&last_significant_child(&body).unwrap(), &link));
    }

    #[test]
    fn test_last_significant_child_skips_whitespace() {
        let dom = parse_html("<body><p>One</p>\n  <a href=\"x\">X</a>\n  \n</body>");
        let last = last_significant_child(&body_of(&dom)).unwrap();
        assert_eq!(element_name(&last), Some("a"));
    }
}
