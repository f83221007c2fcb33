//! Tag-level scan of author HTML.
//!
//! `tl` is lenient and silently rewrites markup it does not understand, so a
//! chunk is only handed to it after this scan has checked it is in the subset
//! `tl` reads back exactly:
//!
//! - every `<` opens a tag, an end tag, a comment or a declaration
//! - attribute values are quoted (unquoted ones are quoted here)
//! - no raw text elements (`script`, `style`, `textarea`, `title`)
//!
//! Anything else is rejected and the caller keeps the chunk verbatim.

use crate::utils::html::{is_escapable_raw_text_element, is_raw_text_element, is_void_element};

/// How the tags of a chunk nest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Every non-void start tag has its end tag.
    Balanced,
    /// A single start tag and nothing else, e.g. inline `<a href="..">`.
    LoneStart(String),
    /// A single end tag and nothing else, e.g. inline `</a>`.
    LoneEnd(String),
    Unbalanced,
}

/// Result of scanning one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    /// The chunk with attribute values quoted and void tags self-closed.
    pub normalized: String,
    pub shape: Shape,
    /// Text outside tags and comments, in source form.
    pub text: String,
    /// Number of start tags.
    pub elements: usize,
}

/// Scan `html`. Returns `None` when the chunk cannot be read back exactly.
pub fn scan(html: &str) -> Option<Scan> {
    let mut out = String::with_capacity(html.len() + 16);
    let mut text = String::new();
    let mut stack: Vec<String> = Vec::new();
    let mut balanced = true;
    let mut starts: Vec<String> = Vec::new();
    let mut ends: Vec<String> = Vec::new();
    let mut other = false;

    let mut rest = html;
    while !rest.is_empty() {
        let Some(lt) = rest.find('<') else {
            other |= !rest.trim().is_empty();
            text.push_str(rest);
            out.push_str(rest);
            break;
        };
        let (before, tail) = rest.split_at(lt);
        other |= !before.trim().is_empty();
        text.push_str(before);
        out.push_str(before);

        if tail.starts_with("<!--") {
            let end = tail.find("-->")? + 3;
            out.push_str(&tail[..end]);
            other = true;
            rest = &tail[end..];
        } else if tail.starts_with("<!") || tail.starts_with("<?") {
            let end = tail.find('>')? + 1;
            out.push_str(&tail[..end]);
            other = true;
            rest = &tail[end..];
        } else if let Some(body) = tail.strip_prefix("</") {
            let (name, consumed) = end_tag(body)?;
            out.push_str("</");
            out.push_str(&name);
            out.push('>');
            match stack.pop() {
                Some(open) if open == name => {}
                _ => balanced = false,
            }
            ends.push(name);
            rest = &body[consumed..];
        } else {
            let (tag, consumed) = start_tag(&tail[1..])?;
            if is_raw_text_element(&tag.name) || is_escapable_raw_text_element(&tag.name) {
                return None;
            }
            out.push_str(&tag.source);
            if !tag.self_closing && !is_void_element(&tag.name) {
                stack.push(tag.name.clone());
            }
            starts.push(tag.name);
            rest = &tail[1 + consumed..];
        }
    }

    let shape = if balanced && stack.is_empty() {
        Shape::Balanced
    } else if !other && ends.is_empty() && starts.len() == 1 && stack.len() == 1 {
        Shape::LoneStart(starts.remove(0))
    } else if !other && starts.is_empty() && ends.len() == 1 {
        Shape::LoneEnd(ends.remove(0))
    } else {
        Shape::Unbalanced
    };

    Some(Scan {
        normalized: out,
        shape,
        text,
        elements: starts.len(),
    })
}

/// A start tag rewritten with quoted attribute values.
struct StartTag {
    name: String,
    source: String,
    self_closing: bool,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

fn tag_name(s: &str) -> Option<(String, usize)> {
    if !s.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    let len = s.find(|c: char| !is_name_char(c)).unwrap_or(s.len());
    Some((s[..len].to_ascii_lowercase(), len))
}

/// Parse `name>` (after `</`). Returns the name and bytes consumed.
fn end_tag(s: &str) -> Option<(String, usize)> {
    let (name, len) = tag_name(s)?;
    let after = &s[len..];
    let gap = after.len() - after.trim_start().len();
    after[gap..].starts_with('>').then_some((name, len + gap + 1))
}

/// Parse `name attrs>` (after `<`). Returns the tag and bytes consumed.
fn start_tag(s: &str) -> Option<(StartTag, usize)> {
    let (name, mut pos) = tag_name(s)?;
    let mut source = format!("<{name}");

    let self_closing = loop {
        pos += s[pos..].len() - s[pos..].trim_start().len();
        let rest = &s[pos..];
        if rest.starts_with("/>") {
            pos += 2;
            break true;
        }
        if rest.starts_with('>') {
            pos += 1;
            break false;
        }

        let key_len = rest.find(|c: char| {
            c.is_whitespace() || matches!(c, '=' | '>' | '/' | '"' | '\'' | '<')
        })?;
        if key_len == 0 {
            return None;
        }
        source.push(' ');
        source.push_str(&rest[..key_len].to_ascii_lowercase());
        pos += key_len;

        let after_key = &s[pos..];
        let gap = after_key.len() - after_key.trim_start().len();
        if !after_key[gap..].starts_with('=') {
            continue;
        }
        pos += gap + 1;
        pos += s[pos..].len() - s[pos..].trim_start().len();

        let (value, consumed) = attr_value(&s[pos..])?;
        source.push_str("=\"");
        source.push_str(&value);
        source.push('"');
        pos += consumed;
    };

    if self_closing || is_void_element(&name) {
        source.push_str(" />");
    } else {
        source.push('>');
    }

    Some((
        StartTag {
            name,
            source,
            self_closing,
        },
        pos,
    ))
}

/// Parse a quoted or unquoted attribute value, returned ready for `"` quoting.
fn attr_value(s: &str) -> Option<(String, usize)> {
    let value_ok = |v: &str| !v.contains(['<', '>']);

    if let Some(quote @ ('"' | '\'')) = s.chars().next() {
        let inner = &s[1..];
        let end = inner.find(quote)?;
        let value = &inner[..end];
        if !value_ok(value) {
            return None;
        }
        return Some((value.replace('"', "&quot;"), end + 2));
    }

    let end = s
        .find(|c: char| c.is_whitespace() || c == '>')
        .unwrap_or(s.len());
    let value = &s[..end];
    if value.is_empty() || value.contains(['"', '\'', '=', '<', '`']) {
        return None;
    }
    Some((value.to_string(), end))
}
