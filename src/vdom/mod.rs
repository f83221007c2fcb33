//! Locally owned HTML element tree.
//!
//! A post body is built into a [`Fragment`] once, styled by a chain of
//! [`Transform`]s and serialized back to HTML. Nothing is shared between
//! renders: every fragment owns its nodes.
//!
//! ```text
//! markdown events ─┐
//! raw HTML ─parse──┴─▶ Fragment ──Pipeline::pipe(..)──▶ Fragment ──render──▶ HTML
//! ```
//!
//! Text and attribute values are kept in their escaped form. Author HTML that
//! cannot be read back exactly is kept as a [`Node::Raw`] chunk and written out
//! unchanged.

mod parse;
mod render;
pub(crate) mod scan;

/// A node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Box<Element>),
    /// Escaped text.
    Text(String),
    /// Markup written verbatim and never visited by transforms.
    Raw(String),
}

/// An HTML element with ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
    /// Whether the end tag is written. False for author tags left open.
    pub closed: bool,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
            closed: true,
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing the previous value if present.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, slot)) => *slot = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    #[cfg(test)]
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    #[cfg(test)]
    pub fn with_child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }
}

/// A parsed HTML fragment: a sequence of top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub nodes: Vec<Node>,
}

impl Fragment {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Apply `f` to every element named `tag`, in document order.
    pub fn modify_by_tag<F>(&mut self, tag: &str, mut f: F)
    where
        F: FnMut(&mut Element),
    {
        fn walk<F: FnMut(&mut Element)>(nodes: &mut [Node], tag: &str, f: &mut F) {
            for node in nodes {
                if let Node::Element(elem) = node {
                    if elem.tag == tag {
                        f(&mut **elem);
                    }
                    walk(&mut elem.children, tag, f);
                }
            }
        }
        walk(&mut self.nodes, tag, &mut f);
    }

    /// Collect references to every element named `tag`.
    #[cfg(test)]
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        fn walk<'a>(nodes: &'a [Node], tag: &str, out: &mut Vec<&'a Element>) {
            for node in nodes {
                if let Node::Element(elem) = node {
                    if elem.tag == tag {
                        out.push(&**elem);
                    }
                    walk(&elem.children, tag, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.nodes, tag, &mut out);
        out
    }
}

// =============================================================================
// Transform pipeline
// =============================================================================

/// A fragment-in, fragment-out rewrite.
pub trait Transform {
    fn transform(self, fragment: Fragment) -> Fragment;
}

/// Chains transforms over an owned fragment.
///
/// ```ignore
/// let styled = Pipeline::new(fragment)
///     .pipe(MediaTransform::new(&config))
///     .pipe(LinkTransform::new(&config))
///     .into_inner();
/// ```
pub struct Pipeline {
    fragment: Fragment,
}

impl Pipeline {
    pub fn new(fragment: Fragment) -> Self {
        Self { fragment }
    }

    pub fn pipe<T: Transform>(self, transform: T) -> Self {
        Self {
            fragment: transform.transform(self.fragment),
        }
    }

    pub fn into_inner(self) -> Fragment {
        self.fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Fragment {
        let inner = Element::new("a").with_attr("href", "/x");
        let outer = Element::new("p")
            .with_child(Node::Text("see ".into()))
            .with_child(Node::Element(Box::new(inner)));
        Fragment::new(vec![
            Node::Element(Box::new(outer)),
            Node::Element(Box::new(Element::new("a"))),
        ])
    }

    #[test]
    fn test_set_attr_replaces_existing() {
        let mut elem = Element::new("a").with_attr("style", "color: red;");
        elem.set_attr("style", "color: blue;");
        assert_eq!(elem.attrs.len(), 1);
        assert_eq!(elem.get_attr("style"), Some("color: blue;"));
    }

    #[test]
    fn test_modify_by_tag_reaches_nested() {
        let mut fragment = sample();
        let mut seen = 0;
        fragment.modify_by_tag("a", |elem| {
            seen += 1;
            elem.set_attr("data-n", seen.to_string());
        });
        assert_eq!(seen, 2);
        let links = fragment.find_all("a");
        assert_eq!(links[0].get_attr("data-n"), Some("1"));
        assert_eq!(links[1].get_attr("data-n"), Some("2"));
    }

    #[test]
    fn test_pipeline_applies_in_order() {
        struct Tag(&'static str);
        impl Transform for Tag {
            fn transform(self, mut fragment: Fragment) -> Fragment {
                fragment.modify_by_tag("a", |elem| {
                    let prev = elem.get_attr("class").unwrap_or_default().to_string();
                    elem.set_attr("class", format!("{prev}{}", self.0));
                });
                fragment
            }
        }

        let fragment = Pipeline::new(sample()).pipe(Tag("x")).pipe(Tag("y")).into_inner();
        assert!(fragment.find_all("a").iter().all(|a| a.get_attr("class") == Some("xy")));
    }
}
