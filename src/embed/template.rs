//! Template types for typed variable injection.

use std::borrow::Cow;
use std::marker::PhantomData;

/// Trait for template variable sets
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;
}

/// Template with typed variable injection
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }

    pub const fn content(&self) -> &'static str {
        self.content
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }
}

/// Replace every `__NAME__` token in `content` with `lookup(NAME)`.
///
/// One left-to-right pass: inserted values are never scanned again, so a
/// value that itself contains `__NAME__` is written as is. Tokens `lookup`
/// does not know are left untouched.
pub fn substitute<'v, F>(content: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<Cow<'v, str>>,
{
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("__") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after
            .find("__")
            .map(|end| &after[..end])
            .filter(|name| {
                !name.is_empty() && name.bytes().all(|b| b.is_ascii_uppercase() || b == b'_')
            })
            .and_then(|name| lookup(name).map(|value| (name.len(), value)));

        match value {
            Some((len, value)) => {
                out.push_str(&value);
                rest = &after[len + 2..];
            }
            None => {
                out.push('_');
                rest = &rest[start + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<Cow<'static, str>> {
        match name {
            "A" => Some(Cow::Borrowed("__B__")),
            "B" => Some(Cow::Borrowed("b")),
            "LONG_NAME" => Some(Cow::Borrowed("long")),
            _ => None,
        }
    }

    #[test]
    fn test_substitute_is_single_pass() {
        assert_eq!(substitute("x __A__ y __B__", lookup), "x __B__ y b");
    }

    #[test]
    fn test_substitute_leaves_unknown_tokens() {
        assert_eq!(substitute("__NOPE__ __LONG_NAME__", lookup), "__NOPE__ long");
        assert_eq!(substitute("a__b ___B__ __", lookup), "a__b _b __");
        assert_eq!(substitute("__lower__", lookup), "__lower__");
    }
}
