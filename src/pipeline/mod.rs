//! Fragment styling pipeline.
//!
//! ```text
//! Fragment ─▶ MediaTransform ─▶ BlockTransform ─▶ LinkTransform ─▶ Fragment
//! ```

pub mod transform;

use crate::config::NewsletterConfig;
use crate::vdom::{Fragment, Pipeline};

pub use transform::{BlockTransform, LinkTransform, MediaTransform};

/// Apply every email style transform to a parsed fragment.
pub fn stylize(fragment: Fragment, config: &NewsletterConfig) -> Fragment {
    Pipeline::new(fragment)
        .pipe(MediaTransform::new(&config.site))
        .pipe(BlockTransform::new(&config.theme))
        .pipe(LinkTransform::new(&config.theme))
        .into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylize_touches_only_known_tags() {
        let html = r#"<h2>T</h2><p><a href="/a"><img src="../assets/images/a.png" /></a></p><hr />"#;
        let out = stylize(Fragment::parse(html), &NewsletterConfig::default()).to_html();

        assert!(out.starts_with("<h2>T</h2>"));
        assert!(out.contains(r#"src="https://ben-mini.com/assets/images/a.png""#));
        assert!(out.contains(r#"<a href="/a" style="color: #4bae34; text-decoration: underline;">"#));
        assert!(out.ends_with(r#"<hr style="border: 1px solid #4bae34;" />"#));
    }
}
