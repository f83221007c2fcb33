//! GitHub-hosted posts.
//!
//! Listing goes through the contents API; post bodies come from the raw
//! content host, which needs no JSON decoding.

use reqwest::blocking::{Client, Response};
use serde::Deserialize;

use super::{CacheKey, PostSource, SourceError, select_posts};
use crate::config::SourceConfig;
use crate::debug;

/// GitHub rejects API requests without a user agent.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// One entry of a contents API directory listing.
#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
}

pub struct GitHubSource {
    config: SourceConfig,
    client: Client,
}

impl GitHubSource {
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| SourceError::Http {
                url: config.api_base.clone(),
                source,
            })?;
        Ok(Self { config, client })
    }

    fn get(&self, url: &str) -> Result<Response, SourceError> {
        debug!("source"; "GET {}", url);
        let response = self.client.get(url).send().map_err(|source| SourceError::Http {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl PostSource for GitHubSource {
    fn key(&self) -> CacheKey {
        CacheKey::from(&self.config)
    }

    fn list_posts(&self) -> Result<Vec<String>, SourceError> {
        let url = self.config.listing_url();
        let body = self
            .get(&url)?
            .text()
            .map_err(|source| SourceError::Http {
                url: url.clone(),
                source,
            })?;
        let names = parse_listing(&body).map_err(|source| SourceError::Listing { url, source })?;
        Ok(select_posts(names, &self.config.extension))
    }

    fn fetch_post(&self, name: &str) -> Result<String, SourceError> {
        let url = self.config.raw_url(name);
        self.get(&url)?
            .text()
            .map_err(|source| SourceError::Http { url, source })
    }
}

/// Names from a contents API directory listing, in listing order.
fn parse_listing(body: &str) -> Result<Vec<String>, serde_json::Error> {
    let entries: Vec<ContentEntry> = serde_json::from_str(body)?;
    Ok(entries.into_iter().map(|entry| entry.name).collect())
}
