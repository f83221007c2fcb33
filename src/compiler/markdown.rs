//! Markdown → element tree using pulldown-cmark.
//!
//! The tree is built from parser events, so Markdown images, links, rules and
//! quotes never go through an HTML parser. Only author HTML chunks are parsed,
//! see [`Fragment::parse`].

use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd};

use crate::utils::html::{escape, escape_attr};
use crate::vdom::scan::{Shape, scan};
use crate::vdom::{Element, Fragment, Node};

/// Options for markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
}

impl MarkdownOptions {
    /// Create options with all extensions enabled
    pub fn all() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
        }
    }

    /// Convert to pulldown-cmark Options
    fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        opts
    }
}

/// What opened a stack frame, and so what closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    /// A Markdown start event.
    Markdown,
    /// Opened together with a Markdown frame (`code` in `pre`, `tr` in `thead`).
    Wrapper,
    /// An author start tag. Closed by its end tag, or left open.
    Html,
    /// Content that is not rendered (metadata blocks).
    Discard,
}

/// Stack frame for tracking nested elements
struct Frame {
    element: Element,
    kind: FrameKind,
}

/// Markdown to element tree converter
struct MarkdownConverter {
    /// Stack of open elements
    stack: Vec<Frame>,
    /// Root children (collected when stack is empty)
    root: Vec<Node>,
    /// Lines of the HTML block being read
    html_block: Option<String>,
    /// Column alignments of the current table
    alignments: Vec<Alignment>,
    cell: usize,
    in_table_head: bool,
}

impl MarkdownConverter {
    fn new() -> Self {
        Self {
            stack: Vec::new(),
            root: Vec::new(),
            html_block: None,
            alignments: Vec::new(),
            cell: 0,
            in_table_head: false,
        }
    }

    fn convert(mut self, markdown: &str, options: &MarkdownOptions) -> Fragment {
        for event in Parser::new_ext(markdown, options.to_pulldown_options()) {
            self.handle_event(event);
        }

        if let Some(html) = self.html_block.take() {
            self.add_author_html(&html);
        }
        // Author tags never closed in the source stay open in the output.
        while let Some(frame) = self.stack.pop() {
            let closed = frame.kind != FrameKind::Html;
            self.finish(frame, closed);
        }
        Fragment::new(self.root)
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.add_text(&text),
            Event::Code(code) => {
                let mut elem = Element::new("code");
                elem.children.push(Node::Text(escape(&code).into_owned()));
                self.add_node(Node::Element(Box::new(elem)));
            }
            Event::Html(html) => {
                if let Some(block) = self.html_block.as_mut() {
                    block.push_str(&html);
                } else {
                    self.add_author_html(&html);
                }
            }
            Event::InlineHtml(html) => self.add_author_html(&html),
            Event::SoftBreak => self.add_text("\n"),
            Event::HardBreak => {
                self.add_node(Node::Element(Box::new(Element::new("br"))));
                self.add_newline();
            }
            Event::Rule => {
                self.add_node(Node::Element(Box::new(Element::new("hr"))));
                self.add_newline();
            }
            Event::FootnoteReference(name) => self.add_footnote_ref(&name),
            Event::TaskListMarker(checked) => self.add_task_marker(checked),
            Event::InlineMath(math) => self.add_math(&math, false),
            Event::DisplayMath(math) => self.add_math(&math, true),
        }
    }

    fn start_tag(&mut self, tag: Tag) {
        let elem = match tag {
            Tag::HtmlBlock => {
                self.html_block = Some(String::new());
                return;
            }
            Tag::MetadataBlock(_) => {
                self.push(Element::new("div"), FrameKind::Discard);
                return;
            }
            Tag::CodeBlock(kind) => {
                self.push(Element::new("pre"), FrameKind::Markdown);
                let mut code = Element::new("code");
                if let CodeBlockKind::Fenced(info) = kind {
                    let lang = info.split_whitespace().next().unwrap_or_default();
                    if !lang.is_empty() {
                        code.set_attr("class", format!("language-{}", escape_attr(lang)));
                    }
                }
                self.push(code, FrameKind::Wrapper);
                return;
            }
            Tag::Table(alignments) => {
                self.alignments = alignments;
                Element::new("table")
            }
            Tag::TableHead => {
                self.in_table_head = true;
                self.cell = 0;
                self.push(Element::new("thead"), FrameKind::Markdown);
                self.push(Element::new("tr"), FrameKind::Wrapper);
                return;
            }
            Tag::TableRow => {
                self.cell = 0;
                Element::new("tr")
            }
            Tag::TableCell => {
                let mut cell = Element::new(if self.in_table_head { "th" } else { "td" });
                if let Some(align) = self.alignments.get(self.cell).and_then(|a| align_style(*a)) {
                    cell.set_attr("style", align);
                }
                self.cell += 1;
                cell
            }
            Tag::Paragraph => Element::new("p"),
            Tag::Heading { level, id, .. } => {
                let mut heading = Element::new(heading_level_to_tag(level));
                if let Some(id) = id {
                    heading.set_attr("id", escape_attr(&id));
                }
                heading
            }
            Tag::BlockQuote(_) => Element::new("blockquote"),
            Tag::List(Some(start)) => {
                let mut list = Element::new("ol");
                if start != 1 {
                    list.set_attr("start", start.to_string());
                }
                list
            }
            Tag::List(None) => Element::new("ul"),
            Tag::Item => Element::new("li"),
            Tag::FootnoteDefinition(name) => Element::new("div")
                .with_class("footnote")
                .with_id(&format!("fn-{name}")),
            Tag::DefinitionList => Element::new("dl"),
            Tag::DefinitionListTitle => Element::new("dt"),
            Tag::DefinitionListDefinition => Element::new("dd"),
            Tag::Emphasis => Element::new("em"),
            Tag::Strong => Element::new("strong"),
            Tag::Strikethrough => Element::new("del"),
            Tag::Superscript => Element::new("sup"),
            Tag::Subscript => Element::new("sub"),
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => {
                let href = match link_type {
                    LinkType::Email => format!("mailto:{dest_url}"),
                    _ => dest_url.to_string(),
                };
                let mut link = Element::new("a");
                link.set_attr("href", escape_attr(&href));
                if !title.is_empty() {
                    link.set_attr("title", escape_attr(&title));
                }
                link
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text arrives as children and is folded in on close.
                let mut img = Element::new("img");
                img.set_attr("src", escape_attr(&dest_url));
                if !title.is_empty() {
                    img.set_attr("title", escape_attr(&title));
                }
                img
            }
        };

        let opens_block = matches!(elem.tag.as_str(), "blockquote" | "ul" | "ol" | "table" | "dl");
        self.push(elem, FrameKind::Markdown);
        if opens_block {
            self.add_newline();
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::HtmlBlock => {
                if let Some(html) = self.html_block.take() {
                    self.add_author_html(&html);
                }
            }
            TagEnd::TableHead => {
                self.close_markdown_frame();
                self.in_table_head = false;
                self.push(Element::new("tbody"), FrameKind::Wrapper);
            }
            _ => self.close_markdown_frame(),
        }
    }

    /// Pop up to and including the innermost Markdown frame.
    ///
    /// Author tags still open inside it are ended without an end tag.
    fn close_markdown_frame(&mut self) {
        while let Some(frame) = self.stack.pop() {
            let kind = frame.kind;
            self.finish(frame, kind != FrameKind::Html);
            if matches!(kind, FrameKind::Markdown | FrameKind::Discard) {
                break;
            }
        }
    }

    fn finish(&mut self, frame: Frame, closed: bool) {
        let Frame { mut element, kind } = frame;
        if kind == FrameKind::Discard {
            return;
        }
        if kind != FrameKind::Html && element.tag == "img" {
            fold_alt_text(&mut element);
        }

        element.closed = closed;
        let newline = kind != FrameKind::Html && is_block(&element.tag);
        self.add_node(Node::Element(Box::new(element)));
        if newline {
            self.add_newline();
        }
    }

    fn push(&mut self, element: Element, kind: FrameKind) {
        self.stack.push(Frame { element, kind });
    }

    /// Add an author HTML chunk (a whole HTML block or one inline tag).
    fn add_author_html(&mut self, html: &str) {
        let Some(scanned) = scan(html) else {
            self.add_node(Node::Raw(html.to_string()));
            return;
        };

        match &scanned.shape {
            Shape::LoneStart(_) => match Element::parse_start_tag(&scanned) {
                Some(elem) => {
                    self.push(elem, FrameKind::Html);
                    self.add_whitespace(&scanned.text);
                }
                None => self.add_node(Node::Raw(html.to_string())),
            },
            Shape::LoneEnd(name) if self.open_html_frame_is(name) => {
                if let Some(frame) = self.stack.pop() {
                    self.finish(frame, true);
                }
                self.add_whitespace(&scanned.text);
            }
            _ => {
                for node in Fragment::parse(html).nodes {
                    self.add_node(node);
                }
            }
        }
    }

    fn open_html_frame_is(&self, name: &str) -> bool {
        self.stack
            .last()
            .is_some_and(|frame| frame.kind == FrameKind::Html && frame.element.tag == name)
    }

    fn add_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.add_node(Node::Text(escape(text).into_owned()));
    }

    fn add_whitespace(&mut self, text: &str) {
        if !text.is_empty() {
            self.add_node(Node::Text(text.to_string()));
        }
    }

    fn add_newline(&mut self) {
        self.add_node(Node::Text("\n".to_string()));
    }

    fn add_footnote_ref(&mut self, name: &str) {
        let mut link = Element::new("a");
        link.set_attr("href", format!("#fn-{}", escape_attr(name)));
        link.set_attr("id", format!("fnref-{}", escape_attr(name)));
        link.children.push(Node::Text(format!("[{}]", escape(name))));

        let mut sup = Element::new("sup").with_class("footnote-ref");
        sup.children.push(Node::Element(Box::new(link)));
        self.add_node(Node::Element(Box::new(sup)));
    }

    fn add_task_marker(&mut self, checked: bool) {
        let mut input = Element::new("input");
        input.set_attr("disabled", "");
        input.set_attr("type", "checkbox");
        if checked {
            input.set_attr("checked", "");
        }
        self.add_node(Node::Element(Box::new(input)));
    }

    fn add_math(&mut self, formula: &str, display: bool) {
        let (tag, class) = if display {
            ("div", "math math-display")
        } else {
            ("span", "math math-inline")
        };
        let mut elem = Element::new(tag).with_class(class);
        elem.children.push(Node::Text(escape(formula).into_owned()));
        self.add_node(Node::Element(Box::new(elem)));
    }

    /// Add a node to current context (top of stack or root)
    fn add_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(frame) => frame.element.children.push(node),
            None => self.root.push(node),
        }
    }
}

impl Element {
    fn with_class(mut self, class: &str) -> Self {
        self.set_attr("class", class);
        self
    }

    fn with_id(mut self, id: &str) -> Self {
        self.set_attr("id", escape_attr(id));
        self
    }
}

/// Move an image's alt text from its children into `alt`, after `src`.
fn fold_alt_text(img: &mut Element) {
    fn collect(nodes: &[Node], out: &mut String) {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(elem) => collect(&elem.children, out),
                Node::Raw(_) => {}
            }
        }
    }

    let mut alt = String::new();
    collect(&img.children, &mut alt);
    img.children.clear();

    let title = img
        .attrs
        .iter()
        .position(|(key, _)| key == "title")
        .map(|i| img.attrs.remove(i));
    img.set_attr("alt", alt);
    img.attrs.extend(title);
}

fn is_block(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "blockquote"
            | "pre"
            | "ul"
            | "ol"
            | "li"
            | "dl"
            | "dt"
            | "dd"
            | "table"
            | "thead"
            | "tbody"
            | "tr"
            | "div"
    )
}

fn align_style(align: Alignment) -> Option<&'static str> {
    match align {
        Alignment::None => None,
        Alignment::Left => Some("text-align: left"),
        Alignment::Center => Some("text-align: center"),
        Alignment::Right => Some("text-align: right"),
    }
}

/// Convert heading level to tag name
fn heading_level_to_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

/// Convert markdown text to an element tree.
pub fn to_fragment(markdown: &str, options: &MarkdownOptions) -> Fragment {
    MarkdownConverter::new().convert(markdown, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html(markdown: &str) -> String {
        to_fragment(markdown, &MarkdownOptions::all()).to_html()
    }

    #[test]
    fn test_basic_blocks() {
        let out = html("# Title\n\nSome *text* & more.\n\n---\n\n> quoted");
        assert_eq!(
            out,
            "<h1>Title</h1>\n<p>Some <em>text</em> &amp; more.</p>\n<hr />\n\
             <blockquote>\n<p>quoted</p>\n</blockquote>\n"
        );
    }

    #[test]
    fn test_image_and_link() {
        let out = html(r#"![alt *text*](../assets/images/x.png "T") [site](https://ben-mini.com?a=1&b=2)"#);
        assert!(out.contains(r#"<img src="../assets/images/x.png" alt="alt text" title="T" />"#));
        assert!(out.contains(r#"<a href="https://ben-mini.com?a=1&amp;b=2">site</a>"#));
    }

    #[test]
    fn test_code_is_escaped() {
        let out = html("`<b>`\n\n```rust\nif a < b {}\n```");
        assert!(out.contains("<code>&lt;b&gt;</code>"));
        assert!(out.contains("<pre><code class=\"language-rust\">if a &lt; b {}\n</code></pre>\n"));
    }

    #[test]
    fn test_extensions_toggle() {
        let md = "~~gone~~";
        assert!(html(md).contains("<del>gone</del>"));
        let plain = to_fragment(md, &MarkdownOptions::default()).to_html();
        assert!(!plain.contains("<del>"));
    }

    #[test]
    fn test_table_and_tasks() {
        let out = html("| a | b |\n|:--|--:|\n| 1 | 2 |\n\n- [x] done\n- [ ] todo");
        assert!(out.contains("<thead><tr><th style=\"text-align: left\">a</th>"));
        assert!(out.contains("<tbody><tr><td style=\"text-align: left\">1</td>"));
        assert!(out.contains("<input disabled=\"\" type=\"checkbox\" checked=\"\" />done"));
    }

    #[test]
    fn test_inline_author_link_becomes_element() {
        let fragment = to_fragment(
            r#"Read <a href="https://x.test" style="color: red">this</a> now."#,
            &MarkdownOptions::all(),
        );
        let links = fragment.find_all("a");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].get_attr("href"), Some("https://x.test"));
        assert_eq!(links[0].children, vec![Node::Text("this".into())]);
        assert_eq!(
            fragment.to_html(),
            "<p>Read <a href=\"https://x.test\" style=\"color: red\">this</a> now.</p>\n"
        );
    }

    #[test]
    fn test_unclosed_inline_tag_left_open() {
        assert_eq!(html("a <span>b\n\nc"), "<p>a <span>b</p>\n<p>c</p>\n");
    }

    #[test]
    fn test_html_block_wrapping_markdown() {
        let fragment = to_fragment(
            "<div align=\"center\">\n\n![x](../assets/images/x.png)\n\n</div>\n",
            &MarkdownOptions::all(),
        );
        assert_eq!(fragment.find_all("img").len(), 1);
        assert_eq!(
            fragment.to_html(),
            "<div align=\"center\">\n<p><img src=\"../assets/images/x.png\" alt=\"x\" /></p>\n</div>\n"
        );
    }

    #[test]
    fn test_raw_html_block_kept_verbatim() {
        let out = html("<div>1 < 2 and 3 > 2</div>\n\nafter");
        assert!(out.starts_with("<div>1 < 2 and 3 > 2</div>"));
        assert!(out.ends_with("<p>after</p>\n"));
    }
}
