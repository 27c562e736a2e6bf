//! HTTP client for the GitHub REST API.
//!
//! Configuration:
//! - base URL, `https://api.github.com` unless overridden
//! - `GITHUB_TOKEN` - bearer token (optional, raises the rate limit)

use reqwest::header::{HeaderMap, ACCEPT, LINK, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::{Direction, MilestoneSort, Tracker};
use crate::error::{Error, Result};
use crate::models::{Issue, Milestone};

/// Default API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PER_PAGE: &str = "100";
const ACCEPT_JSON: &str = "application/vnd.github+json";
const AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct GithubClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl GithubClient {
    /// Create a client for `base_url`, taking the token from `GITHUB_TOKEN`.
    pub fn from_env(base_url: impl Into<String>) -> Self {
        let token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
        Self::new(base_url, token)
    }

    /// Create with explicit configuration.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_JSON)
            .header(USER_AGENT, AGENT);
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// GET every page of a list endpoint, following `Link: rel="next"`.
    async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut url = format!("{}{}", self.base_url, path);
        let mut req = self.request(&url).query(query);

        loop {
            let response = req.send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::Status { url, status, body });
            }

            let next = next_link(response.headers());
            let text = response.text().await?;
            let page: Vec<T> =
                serde_json::from_str(&text).map_err(|source| Error::Decode {
                    url: url.clone(),
                    source,
                })?;
            tracing::debug!(url = %url, items = page.len(), "fetched page");
            items.extend(page);

            match next {
                Some(next) => {
                    req = self.request(&next);
                    url = next;
                }
                None => return Ok(items),
            }
        }
    }
}

impl Tracker for GithubClient {
    async fn fetch_milestones(
        &self,
        repo: &str,
        sort: MilestoneSort,
        direction: Direction,
    ) -> Result<Vec<Milestone>> {
        self.get_all(
            &format!("/repos/{}/milestones", repo),
            &[
                ("sort", sort.as_str()),
                ("direction", direction.as_str()),
                ("per_page", PER_PAGE),
            ],
        )
        .await
    }

    async fn fetch_issues(&self, repo: &str, milestone: u64) -> Result<Vec<Issue>> {
        let milestone = milestone.to_string();
        self.get_all(
            &format!("/repos/{}/issues", repo),
            &[("milestone", milestone.as_str()), ("per_page", PER_PAGE)],
        )
        .await
    }
}

/// Extract the `rel="next"` target from a `Link` header.
fn next_link(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;
    link.split(',').find_map(|entry| {
        let (target, params) = entry.split_once(';')?;
        let is_next = params.split(';').any(|p| p.trim() == r#"rel="next""#);
        is_next.then(|| {
            target
                .trim()
                .trim_start_matches('<')
                .trim_end_matches('>')
                .to_string()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(link: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(LINK, HeaderValue::from_str(link).unwrap());
        headers
    }

    #[test]
    fn finds_next_link() {
        let h = headers(
            r#"<https://api.github.com/repositories/1/issues?page=2>; rel="next", <https://api.github.com/repositories/1/issues?page=5>; rel="last""#,
        );
        assert_eq!(
            next_link(&h).as_deref(),
            Some("https://api.github.com/repositories/1/issues?page=2")
        );
    }

    #[test]
    fn last_page_has_no_next_link() {
        let h = headers(
            r#"<https://api.github.com/repositories/1/issues?page=1>; rel="first", <https://api.github.com/repositories/1/issues?page=4>; rel="prev""#,
        );
        assert!(next_link(&h).is_none());
        assert!(next_link(&HeaderMap::new()).is_none());
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = GithubClient::new("http://localhost:1234/", None);
        assert_eq!(client.base_url(), "http://localhost:1234");
    }
}
