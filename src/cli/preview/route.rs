//! Request URL → preview route.

use percent_encoding::percent_decode_str;

/// Preview server routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `GET /[?url=..]`: rendered email of the current post.
    Index { override_url: Option<String> },
    /// `GET /newsletter.html`: the same email as a download.
    Download,
    /// `GET /posts`: cached post listing.
    Posts,
    /// `GET /posts/<name>`: fetch, render and select one post.
    Post(String),
    /// `GET /refresh`: invalidate the listing cache.
    Refresh,
    NotFound,
}

impl Route {
    pub fn parse(url: &str) -> Self {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));

        match path {
            "/" | "" => Self::Index {
                override_url: query_param(query, "url"),
            },
            "/newsletter.html" => Self::Download,
            "/posts" | "/posts/" => Self::Posts,
            "/refresh" => Self::Refresh,
            _ => match path.strip_prefix("/posts/") {
                Some(name) if !name.is_empty() && !name.contains('/') => {
                    match percent_decode_str(name).decode_utf8() {
                        Ok(name) => Self::Post(name.into_owned()),
                        Err(_) => Self::NotFound,
                    }
                }
                _ => Self::NotFound,
            },
        }
    }
}

/// First non-empty value of `key` in a query string.
fn query_param(query: &str, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/"), Route::Index { override_url: None });
        assert_eq!(Route::parse("/newsletter.html"), Route::Download);
        assert_eq!(Route::parse("/posts"), Route::Posts);
        assert_eq!(Route::parse("/refresh"), Route::Refresh);
        assert_eq!(Route::parse("/favicon.ico"), Route::NotFound);
        assert_eq!(Route::parse("/posts/a/b.md"), Route::NotFound);
    }

    #[test]
    fn test_parse_post_name_decoded() {
        assert_eq!(
            Route::parse("/posts/2024-03-05-my%20post.md"),
            Route::Post("2024-03-05-my post.md".into())
        );
    }

    #[test]
    fn test_parse_override_url() {
        assert_eq!(
            Route::parse("/?url=https%3A%2F%2Fben-mini.com%2F2024%2Fx"),
            Route::Index {
                override_url: Some("https://ben-mini.com/2024/x".into())
            }
        );
        assert_eq!(Route::parse("/?url="), Route::Index { override_url: None });
    }
}
