//! Author HTML → owned tree, via `tl`.

use super::scan::{Scan, Shape, scan};
use super::{Element, Fragment, Node};
use crate::debug;

impl Fragment {
    /// Parse a chunk of author HTML without losing any of it.
    ///
    /// Balanced chunks that `tl` reads back exactly become elements, with
    /// attributes sorted by name since `tl` does not keep source order. Any
    /// other chunk is kept as a single [`Node::Raw`].
    pub fn parse(html: &str) -> Self {
        let nodes = match scan(html) {
            Some(scanned) if scanned.shape == Shape::Balanced => parse_checked(html, &scanned),
            _ => vec![Node::Raw(html.to_string())],
        };
        Self::new(nodes)
    }
}

impl Element {
    /// Element for a lone start tag such as inline `<a href="..">`.
    ///
    /// Children are added by the caller until the matching end tag.
    pub fn parse_start_tag(scan: &Scan) -> Option<Self> {
        let Shape::LoneStart(name) = &scan.shape else {
            return None;
        };
        parse_tree(&scan.normalized)?
            .into_iter()
            .find_map(|node| match node {
                Node::Element(elem) if elem.tag == *name => Some(*elem),
                _ => None,
            })
            .map(|mut elem| {
                elem.children.clear();
                elem
            })
    }
}

/// Parse with `tl`, falling back to the raw chunk when text or elements were
/// lost along the way.
fn parse_checked(html: &str, scan: &Scan) -> Vec<Node> {
    match parse_tree(&scan.normalized) {
        Some(nodes) if text_of(&nodes) == scan.text && count_elements(&nodes) == scan.elements => {
            nodes
        }
        _ => {
            debug!("html"; "kept {} bytes of raw html verbatim", html.len());
            vec![Node::Raw(html.to_string())]
        }
    }
}

fn parse_tree(html: &str) -> Option<Vec<Node>> {
    let dom = tl::parse(html, tl::ParserOptions::default()).ok()?;
    let parser = dom.parser();
    Some(
        dom.children()
            .iter()
            .filter_map(|handle| tl_node_to_vdom(*handle, parser))
            .collect(),
    )
}

fn tl_node_to_vdom(handle: tl::NodeHandle, parser: &tl::Parser) -> Option<Node> {
    let node = handle.get(parser)?;

    match node {
        tl::Node::Tag(tag) => {
            let mut elem = Element::new(tag.name().as_utf8_str().to_lowercase());

            for (key, value) in tag.attributes().iter() {
                let value = value.map(|v| v.to_string()).unwrap_or_default();
                elem.attrs.push((key.to_lowercase(), value));
            }
            elem.attrs.sort_by(|a, b| a.0.cmp(&b.0));
            elem.attrs.dedup_by(|a, b| a.0 == b.0);

            elem.children = tag
                .children()
                .top()
                .iter()
                .filter_map(|child| tl_node_to_vdom(*child, parser))
                .collect();

            Some(Node::Element(Box::new(elem)))
        }
        tl::Node::Raw(bytes) => Some(Node::Text(bytes.as_utf8_str().to_string())),
        tl::Node::Comment(bytes) => {
            // Conditional comments matter to email clients; keep them as written.
            let comment = bytes.as_utf8_str();
            if comment.starts_with("<!--") {
                Some(Node::Raw(comment.to_string()))
            } else {
                Some(Node::Raw(format!("<!--{comment}-->")))
            }
        }
    }
}

fn text_of(nodes: &[Node]) -> String {
    fn walk(nodes: &[Node], out: &mut String) {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(elem) => walk(&elem.children, out),
                Node::Raw(_) => {}
            }
        }
    }
    let mut out = String::new();
    walk(nodes, &mut out);
    out
}

fn count_elements(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            Node::Element(elem) => 1 + count_elements(&elem.children),
            _ => 0,
        })
        .sum()
}
