//! Resource retrieval.
//!
//! The engine never performs I/O directly: everything comes through the
//! [`ResourceFetcher`] trait. [`HttpFetcher`] is the production
//! implementation; tests plug in an in-memory stub.

use async_trait::async_trait;
use tracing::warn;

use crate::error::{EdcError, Result};
use crate::types::{Article, Documentation, Helper, PopoverLabel};

/// Retrieval boundary for export resources.
///
/// `path` is a logical path relative to the documentation root (e.g.
/// `multi-doc.json` or `myProduct1/toc.json`). Implementations resolve to
/// `None` on HTTP 404 or an empty body, and fail only on transport-level
/// problems. Callers treat failure as "could not retrieve", never a crash.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch_json(&self, path: &str) -> Result<Option<serde_json::Value>>;
    async fn fetch_raw(&self, path: &str) -> Result<Option<String>>;
}

/// [`ResourceFetcher`] over HTTP.
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(HttpFetcher {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn fetch_body(&self, path: &str) -> Result<Option<String>> {
        let response = self.client.get(self.url_for(path)).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response.error_for_status()?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(body))
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch_json(&self, path: &str) -> Result<Option<serde_json::Value>> {
        match self.fetch_body(path).await? {
            Some(body) => {
                let value =
                    serde_json::from_str(&body).map_err(|err| EdcError::InvalidContent {
                        path: path.to_string(),
                        reason: err.to_string(),
                    })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn fetch_raw(&self, path: &str) -> Result<Option<String>> {
        self.fetch_body(path).await
    }
}

/// An entity whose body is fetched lazily from its relative `url`.
///
/// Implemented by the closed set of content-bearing entities; nothing else
/// should pick this up.
pub trait Loadable {
    fn url(&self) -> &str;
    fn set_content(&mut self, content: Option<String>);
}

impl Loadable for Documentation {
    fn url(&self) -> &str {
        &self.url
    }
    fn set_content(&mut self, content: Option<String>) {
        self.content = content;
    }
}

impl Loadable for Helper {
    fn url(&self) -> &str {
        &self.url
    }
    fn set_content(&mut self, content: Option<String>) {
        self.content = content;
    }
}

impl Loadable for Article {
    fn url(&self) -> &str {
        &self.url
    }
    fn set_content(&mut self, content: Option<String>) {
        self.content = content;
    }
}

impl Loadable for PopoverLabel {
    fn url(&self) -> &str {
        &self.url
    }
    fn set_content(&mut self, content: Option<String>) {
        self.content = content;
    }
}

/// Fetch `<export_id>/<item.url>` and store the body on the item.
///
/// A missing or unreachable body leaves `content` unset and logs a warning;
/// content loading never fails a lookup that already resolved.
pub async fn load_content<T: Loadable>(
    fetcher: &dyn ResourceFetcher,
    export_id: &str,
    item: &mut T,
) {
    if item.url().is_empty() {
        return;
    }
    let path = format!("{export_id}/{}", item.url());
    match fetcher.fetch_raw(&path).await {
        Ok(content) => item.set_content(content),
        Err(err) => {
            warn!(path, %err, "could not read content body");
            item.set_content(None);
        }
    }
}
