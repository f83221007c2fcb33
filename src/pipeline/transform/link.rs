//! Link processor: `a` elements.
//!
//! The accent style overwrites any style the author set on the link. Other
//! attributes are left alone.

use crate::config::ThemeSectionConfig;
use crate::vdom::{Fragment, Transform};

pub struct LinkTransform<'a> {
    theme: &'a ThemeSectionConfig,
}

impl<'a> LinkTransform<'a> {
    pub fn new(theme: &'a ThemeSectionConfig) -> Self {
        Self { theme }
    }

    pub fn style(&self) -> String {
        format!("color: {}; text-decoration: underline;", self.theme.accent)
    }
}

impl Transform for LinkTransform<'_> {
    fn transform(self, mut fragment: Fragment) -> Fragment {
        let style = self.style();
        fragment.modify_by_tag("a", |elem| elem.set_attr("style", style.as_str()));
        fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_style_overwrites_author_style() {
        let theme = ThemeSectionConfig::default();
        let html = r#"<p><a href="https://x.test" style="color: red" title="t">x</a></p>"#;
        let fragment = LinkTransform::new(&theme).transform(Fragment::parse(html));
        let a = fragment.find_all("a")[0];

        assert_eq!(a.get_attr("style"), Some("color: #4bae34; text-decoration: underline;"));
        assert_eq!(a.get_attr("href"), Some("https://x.test"));
        assert_eq!(a.get_attr("title"), Some("t"));
    }
}
