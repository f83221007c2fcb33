//! Media processor: `img` elements.
//!
//! - relative asset prefix in `src` rewritten to the absolute asset base
//! - fixed block-centered, responsive inline style

use crate::config::SiteSectionConfig;
use crate::vdom::{Fragment, Transform};

/// Inline style applied to every image.
pub const IMAGE_STYLE: &str = "display: block; margin: 0 auto; max-width: 100%; height: auto;";

pub struct MediaTransform<'a> {
    site: &'a SiteSectionConfig,
}

impl<'a> MediaTransform<'a> {
    pub fn new(site: &'a SiteSectionConfig) -> Self {
        Self { site }
    }
}

impl Transform for MediaTransform<'_> {
    fn transform(self, mut fragment: Fragment) -> Fragment {
        fragment.modify_by_tag("img", |elem| {
            // Images without `src` still get the style.
            if let Some(src) = elem.get_attr("src") {
                let absolute = self.site.absolutize(src);
                elem.set_attr("src", absolute);
            }
            elem.set_attr("style", IMAGE_STYLE);
        });
        fragment
    }
}
