//! Embedded static resources.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `email` - Newsletter email layout (newsletter.html)
//!
//! # Usage
//!
//! ```ignore
//! use embed::email::{NEWSLETTER_HTML, NewsletterVars};
//!
//! let html = NEWSLETTER_HTML.render(&NewsletterVars::new(&meta, &content, &config));
//! ```

mod template;

pub use template::{Template, TemplateVars, substitute};

pub mod email {
    use std::borrow::Cow;

    use super::{Template, TemplateVars, substitute};
    use crate::compiler::PostMeta;
    use crate::config::NewsletterConfig;
    use crate::utils::html::{escape, escape_attr};

    /// Variables for newsletter.html template.
    pub struct NewsletterVars<'a> {
        pub title: &'a str,
        pub date: &'a str,
        pub article_url: &'a str,
        pub logo_url: &'a str,
        pub logo_alt: &'a str,
        pub accent: &'a str,
        pub background: &'a str,
        pub font_family: &'a str,
        pub unsubscribe_url: &'a str,
        /// Styled content fragment, inserted verbatim.
        pub content: &'a str,
    }

    impl<'a> NewsletterVars<'a> {
        pub fn new(meta: &'a PostMeta, content: &'a str, config: &'a NewsletterConfig) -> Self {
            Self {
                title: &meta.title,
                date: &meta.date,
                article_url: &meta.article_url,
                logo_url: &config.site.logo,
                logo_alt: &config.site.logo_alt,
                accent: &config.theme.accent,
                background: &config.theme.background,
                font_family: &config.theme.font,
                unsubscribe_url: &config.site.unsubscribe,
                content,
            }
        }
    }

    impl TemplateVars for NewsletterVars<'_> {
        fn apply(&self, content: &str) -> String {
            substitute(content, |name| match name {
                "TITLE" => Some(escape(self.title)),
                "DATE" => Some(escape(self.date)),
                "ARTICLE_URL" => Some(escape_attr(self.article_url)),
                "LOGO_URL" => Some(escape_attr(self.logo_url)),
                "LOGO_ALT" => Some(escape_attr(self.logo_alt)),
                "UNSUBSCRIBE_URL" => Some(escape_attr(self.unsubscribe_url)),
                "ACCENT" => Some(Cow::Borrowed(self.accent)),
                "BACKGROUND" => Some(Cow::Borrowed(self.background)),
                "FONT_FAMILY" => Some(Cow::Borrowed(self.font_family)),
                "CONTENT" => Some(Cow::Borrowed(self.content)),
                _ => None,
            })
        }
    }

    /// Inline-styled table layout for email clients.
    pub const NEWSLETTER_HTML: Template<NewsletterVars<'static>> =
        Template::new(include_str!("email/newsletter.html"));

    #[cfg(test)]
    mod tests {
        use super::*;

        fn vars<'a>(title: &'a str, content: &'a str) -> NewsletterVars<'a> {
            NewsletterVars {
                title,
                date: "March 05, 2024",
                article_url: "https://ben-mini.com/2024/my-post",
                logo_url: "https://ben-mini.com/logo.png",
                logo_alt: "logo",
                accent: "#4bae34",
                background: "#e8f6e4",
                font_family: "'Arial', sans-serif",
                unsubscribe_url: "https://tally.so/r/w4PVQr",
                content,
            }
        }

        #[test]
        fn test_all_placeholders_filled() {
            let html = NEWSLETTER_HTML.render(&vars("My Post", "<p>Body</p>"));
            assert!(!html.contains("__"));
            assert!(html.contains("<h1 style=\"font-size: 24px; color: #333; margin: 0 0 10px;\">My Post</h1>"));
            assert!(html.contains("<a href=\"https://ben-mini.com/2024/my-post\" style=\"color: #4bae34; text-decoration: underline;\">View in Browser</a>"));
            assert!(html.contains("<a href=\"https://tally.so/r/w4PVQr\""));
            assert!(html.contains("font-family: 'Arial', sans-serif;"));
            assert!(html.contains("<p>Body</p>"));
        }

        #[test]
        fn test_title_escaped_content_verbatim() {
            let html = NEWSLETTER_HTML.render(&vars("A <b> & C", "<p>__TITLE__ & <b>x</b></p>"));
            assert!(html.contains(">A &lt;b&gt; &amp; C</h1>"));
            assert!(html.contains("<p>__TITLE__ & <b>x</b></p>"));
        }

        #[test]
        fn test_placeholders_in_values_not_expanded() {
            let title = "Notes on __ACCENT__ and __CONTENT__";
            let html = NEWSLETTER_HTML.render(&vars(title, "<p>Body</p>"));
            assert!(html.contains(">Notes on __ACCENT__ and __CONTENT__</h1>"));
            assert_eq!(html.matches("<p>Body</p>").count(), 1);
        }

        #[test]
        fn test_template_has_layout_markers() {
            let raw = NEWSLETTER_HTML.content();
            assert!(raw.contains("View in Browser"));
            assert!(raw.contains("Unsubscribe"));
            assert_eq!(raw.matches("__CONTENT__").count(), 1);
        }
    }
}
