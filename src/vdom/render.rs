//! Owned tree → HTML string.

use super::{Element, Fragment, Node};
use crate::utils::html::is_void_element;

impl Fragment {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            write_node(&mut out, node);
        }
        out
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) | Node::Raw(text) => out.push_str(text),
        Node::Element(elem) => write_element(out, elem),
    }
}

fn write_element(out: &mut String, elem: &Element) {
    out.push('<');
    out.push_str(&elem.tag);
    for (key, value) in &elem.attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        // Values are stored escaped already; only the delimiter needs care.
        out.push_str(&value.replace('"', "&quot;"));
        out.push('"');
    }

    if is_void_element(&elem.tag) {
        out.push_str(" />");
        return;
    }

    out.push('>');
    for child in &elem.children {
        write_node(out, child);
    }
    if !elem.closed {
        return;
    }
    out.push_str("</");
    out.push_str(&elem.tag);
    out.push('>');
}
