pub mod error;
pub mod types;

pub use error::{Result, WikiError};
pub use types::{Page, Query, QueryResponse};

use reqwest::Url;

const BASE_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Wikipedia asks API clients to identify themselves.
const USER_AGENT: &str = concat!("vibe-backpacker/", env!("CARGO_PKG_VERSION"));

pub struct WikipediaClient {
    client: reqwest::Client,
    base_url: String,
}

impl WikipediaClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn extract_url(&self, title: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.base_url,
            &[
                ("action", "query"),
                ("prop", "extracts"),
                ("explaintext", "true"),
                ("format", "json"),
                ("redirects", "1"),
                ("titles", title),
            ],
        )
        .map_err(|e| WikiError::Parse(format!("invalid API url {}: {e}", self.base_url)))
    }

    /// Fetch the plain-text extract of the article titled `title`.
    ///
    /// Redirects are followed. Returns `Ok(None)` when no article exists or it
    /// has no text.
    pub async fn fetch_extract(&self, title: &str) -> Result<Option<String>> {
        let url = self.extract_url(title)?;

        tracing::debug!(title, "Fetching Wikipedia extract");

        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WikiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: QueryResponse = resp.json().await?;
        let extract = body.into_extract();

        tracing::debug!(
            title,
            chars = extract.as_ref().map(|t| t.len()).unwrap_or(0),
            "Fetched Wikipedia extract"
        );

        Ok(extract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_url_encodes_title() {
        let client = WikipediaClient::new().unwrap();
        let url = client.extract_url("Linköping, Sweden").unwrap();

        assert_eq!(url.host_str(), Some("en.wikipedia.org"));
        assert_eq!(url.path(), "/w/api.php");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("prop".into(), "extracts".into())));
        assert!(pairs.contains(&("explaintext".into(), "true".into())));
        assert!(pairs.contains(&("redirects".into(), "1".into())));
        assert!(pairs.contains(&("titles".into(), "Linköping, Sweden".into())));
        assert!(!url.as_str().contains(' '));
    }

    #[test]
    fn base_url_override() {
        let client = WikipediaClient::new()
            .unwrap()
            .with_base_url("http://localhost:9000/api.php");
        let url = client.extract_url("Tokyo").unwrap();
        assert_eq!(url.host_str(), Some("localhost"));
        assert_eq!(url.port(), Some(9000));
    }

    #[test]
    fn invalid_base_url_is_parse_error() {
        let client = WikipediaClient::new().unwrap().with_base_url("not a url");
        assert!(matches!(client.extract_url("Tokyo"), Err(WikiError::Parse(_))));
    }
}
