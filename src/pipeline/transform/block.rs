//! Block processor: `hr` and `blockquote` elements.

use crate::config::ThemeSectionConfig;
use crate::vdom::{Fragment, Transform};

pub struct BlockTransform<'a> {
    theme: &'a ThemeSectionConfig,
}

impl<'a> BlockTransform<'a> {
    pub fn new(theme: &'a ThemeSectionConfig) -> Self {
        Self { theme }
    }

    pub fn rule_style(&self) -> String {
        format!("border: 1px solid {};", self.theme.accent)
    }

    pub fn quote_style(&self) -> String {
        format!(
            "border-left: 4px solid {}; padding-left: 10px; font-style: italic; color: #555;",
            self.theme.accent
        )
    }
}

impl Transform for BlockTransform<'_> {
    fn transform(self, mut fragment: Fragment) -> Fragment {
        let rule = self.rule_style();
        fragment.modify_by_tag("hr", |elem| elem.set_attr("style", rule.as_str()));

        let quote = self.quote_style();
        fragment.modify_by_tag("blockquote", |elem| elem.set_attr("style", quote.as_str()));

        fragment
    }
}
