//! Front matter splitting.
//!
//! Posts open with a block of `key: value` lines fenced by `---` lines:
//!
//! ```text
//! ---
//! title: "My Post"
//! date: 2024-03-05
//! ---
//! Body text...
//! ```
//!
//! Only the first two fence lines delimit metadata. Any later `---` line is
//! ordinary content (a Markdown thematic break).

use rustc_hash::FxHashMap;

/// Fence line opening and closing the metadata block.
pub const DELIMITER: &str = "---";

/// Separator between key and value inside the metadata block.
const SEPARATOR: &str = ": ";

/// Flat string metadata taken from a post header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: FxHashMap<String, String>,
}

impl FrontMatter {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Look up a dotted path such as `header.og_image`.
    ///
    /// Values are plain strings, so a path with more than one segment never
    /// resolves.
    pub fn lookup_path(&self, path: &str) -> Option<&str> {
        let mut segments = path.split('.');
        let value = self.get(segments.next()?)?;
        match segments.next() {
            None => Some(value),
            Some(_) => None,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse one metadata line. Lines without `": "` are ignored.
    fn parse_line(&mut self, line: &str) {
        let Some((key, value)) = line.split_once(SEPARATOR) else {
            return;
        };
        let value = value.trim();
        let value = value.strip_prefix('"').unwrap_or(value);
        let value = value.strip_suffix('"').unwrap_or(value);
        self.insert(key.trim(), value);
    }
}

/// Split a raw post into its front matter and Markdown body.
///
/// With fewer than two fence lines nothing is metadata and the body is the
/// input unchanged.
pub fn split(document: &str) -> (FrontMatter, String) {
    let fences = document.lines().filter(|line| *line == DELIMITER).count();
    if fences < 2 {
        return (FrontMatter::default(), document.to_string());
    }

    let mut meta = FrontMatter::default();
    let mut content: Vec<&str> = Vec::new();
    let mut in_metadata = false;
    let mut seen = 0usize;

    for line in document.lines() {
        if line == DELIMITER {
            seen += 1;
            if seen <= 2 {
                in_metadata = !in_metadata;
                continue;
            }
        }

        if in_metadata && seen <= 2 {
            meta.parse_line(line);
        } else {
            content.push(line);
        }
    }

    (meta, content.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic() {
        let doc = "---\ntitle: \"My Post\"\ndate: 2024-03-05\n---\n# Hello\n\nBody";
        let (meta, body) = split(doc);

        assert_eq!(meta.len(), 2);
        assert_eq!(meta.get("title"), Some("My Post"));
        assert_eq!(meta.get("date"), Some("2024-03-05"));
        assert_eq!(body, "# Hello\n\nBody");
    }

    #[test]
    fn test_split_no_delimiters() {
        let doc = "title: x\n\nJust text\n";
        let (meta, body) = split(doc);
        assert!(meta.is_empty());
        assert_eq!(body, doc);
    }

    #[test]
    fn test_split_single_delimiter_is_content() {
        let doc = "Intro\n---\ntitle: Not Meta\n";
        let (meta, body) = split(doc);
        assert!(meta.is_empty());
        assert_eq!(body, doc);
    }

    #[test]
    fn test_split_later_fences_are_content() {
        let doc = "---\ntitle: T\n---\nabove\n---\nbelow: not meta\n---\nend";
        let (meta, body) = split(doc);

        assert_eq!(meta.len(), 1);
        assert_eq!(body, "above\n---\nbelow: not meta\n---\nend");
    }

    #[test]
    fn test_split_fence_must_be_exact() {
        let doc = "---\ntitle: T\n--- \n----\nstill meta: yes\n---\nbody";
        let (meta, body) = split(doc);
        assert_eq!(meta.get("still meta"), Some("yes"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_metadata_line_parsing() {
        let doc = "---\n  title :   \"Quoted: twice: here\"  \nno separator\nkey:value\nempty: \n---\n";
        let (meta, body) = split(doc);

        assert_eq!(meta.get("title"), Some("Quoted: twice: here"));
        assert_eq!(meta.get("empty"), Some(""));
        assert_eq!(meta.get("key"), None);
        assert_eq!(meta.len(), 2);
        assert_eq!(body, "");
    }

    #[test]
    fn test_single_quote_layer_stripped() {
        let (meta, _) = split("---\na: \"\"x\"\"\nb: \"open\n---\n");
        assert_eq!(meta.get("a"), Some("\"x\""));
        assert_eq!(meta.get("b"), Some("open"));
    }

    #[test]
    fn test_lookup_path_is_flat() {
        let (meta, _) = split("---\nheader: big\nheader.og_image: x.png\n---\n");
        assert_eq!(meta.lookup_path("header"), Some("big"));
        assert_eq!(meta.lookup_path("header.og_image"), None);
    }
}
