//! Fetch webring and status documents over HTTP
//!
//! Every fetch takes a [`CancellationToken`]. Cancelling it aborts the
//! request at whichever await point it is parked on and drops the
//! connection. There is no built-in timeout: cancel the token from a timer
//! or wrap the call in `tokio::time::timeout`.
//!
//! The body is collected chunk by chunk, checking the token between chunks,
//! and handed to the codec once the response is complete. Nothing is decoded
//! from a truncated body.

use crate::codec::Document;
use crate::error::{Error, Result, Stage};
use crate::schema::{Data, StatusData};
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

const DEFAULT_USER_AGENT: &str = concat!("webring/", env!("CARGO_PKG_VERSION"));

/// Configuration for [`Client`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// `User-Agent` header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP client for webring documents. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
}

impl Client {
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .build()
            .map_err(Error::Client)?;
        Ok(Self { http })
    }

    /// Use an existing reqwest client as-is
    pub fn from_reqwest(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetch the webring document at `url`
    pub async fn fetch_data(&self, token: &CancellationToken, url: &str) -> Result<Data> {
        self.fetch_json(token, url).await
    }

    /// Fetch the status document at `url`
    pub async fn fetch_status(&self, token: &CancellationToken, url: &str) -> Result<StatusData> {
        self.fetch_json(token, url).await
    }

    /// Fetch the status document that sits next to `webring_url`,
    /// located with [`guess_status_url`]
    pub async fn fetch_status_for_webring(
        &self,
        token: &CancellationToken,
        webring_url: &str,
    ) -> Result<StatusData> {
        self.fetch_status(token, &guess_status_url(webring_url))
            .await
    }

    /// Fetch the webring and its status document concurrently.
    /// The first failure wins and the other request is dropped.
    pub async fn fetch_webring(
        &self,
        token: &CancellationToken,
        webring_url: &str,
    ) -> Result<(Data, StatusData)> {
        futures::try_join!(
            self.fetch_data(token, webring_url),
            self.fetch_status_for_webring(token, webring_url),
        )
    }

    async fn fetch_json<T: Document>(&self, token: &CancellationToken, url: &str) -> Result<T> {
        let parsed = Url::parse(url).map_err(|source| Error::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        if token.is_cancelled() {
            return Err(Error::CancelledBeforeDispatch {
                url: url.to_string(),
            });
        }

        debug!(url, document = T::NAME, "fetching document");

        let mut response = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(cancelled(url, Stage::AwaitingResponse)),
            result = self.http.get(parsed).send() => result.map_err(|source| Error::Transport {
                url: url.to_string(),
                source,
            })?,
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!(url, status = %status, "unexpected response status");
            return Err(Error::Status {
                url: url.to_string(),
                status,
            });
        }

        let mut body = Vec::new();
        loop {
            let chunk = tokio::select! {
                biased;
                _ = token.cancelled() => return Err(cancelled(url, Stage::ReadingBody)),
                result = response.chunk() => result.map_err(|source| Error::Transport {
                    url: url.to_string(),
                    source,
                })?,
            };
            match chunk {
                Some(bytes) => body.extend_from_slice(&bytes),
                None => break,
            }
        }

        let document = T::from_reader(body.as_slice())?;
        debug!(url, document = T::NAME, bytes = body.len(), "decoded document");

        Ok(document)
    }
}

fn cancelled(url: &str, stage: Stage) -> Error {
    debug!(url, %stage, "request cancelled");
    Error::Cancelled {
        url: url.to_string(),
        stage,
    }
}

/// Fetch the webring document at `url` with a default [`Client`]
pub async fn fetch_data(token: &CancellationToken, url: &str) -> Result<Data> {
    Client::new()?.fetch_data(token, url).await
}

/// Fetch the status document at `url` with a default [`Client`]
pub async fn fetch_status(token: &CancellationToken, url: &str) -> Result<StatusData> {
    Client::new()?.fetch_status(token, url).await
}

/// Fetch the status document for `webring_url` with a default [`Client`]
pub async fn fetch_status_for_webring(
    token: &CancellationToken,
    webring_url: &str,
) -> Result<StatusData> {
    Client::new()?
        .fetch_status_for_webring(token, webring_url)
        .await
}

/// URL of the status file for `webring_url`: the first `.json` becomes
/// `.status.json`. Plain string replacement; the URL is not parsed.
pub fn guess_status_url(webring_url: &str) -> String {
    webring_url.replacen(".json", ".status.json", 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_guess_status_url() {
        assert_eq!(
            guess_status_url("https://x.test/webring.json"),
            "https://x.test/webring.status.json"
        );
        assert_eq!(
            guess_status_url("https://host/path/webring.json"),
            "https://host/path/webring.status.json"
        );
    }

    #[test]
    fn test_guess_status_url_first_match_only() {
        assert_eq!(
            guess_status_url("https://x.test/a.json/b.json"),
            "https://x.test/a.status.json/b.json"
        );
        assert_eq!(
            guess_status_url("https://host/a.json/b"),
            "https://host/a.status.json/b"
        );
        // Query strings get no special treatment
        assert_eq!(
            guess_status_url("https://host/ring?format=.json"),
            "https://host/ring?format=.status.json"
        );
    }

    #[test]
    fn test_guess_status_url_unchanged() {
        assert_eq!(guess_status_url("https://host/no-suffix"), "https://host/no-suffix");
        assert_eq!(guess_status_url(""), "");
    }

    #[test]
    fn test_default_user_agent() {
        let config = ClientConfig::default();
        assert!(config.user_agent.starts_with("webring/"));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let client = Client::new().unwrap();
        let token = CancellationToken::new();
        let err = client.fetch_data(&token, "not a url").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestConstruction);
        assert!(err.to_string().contains("not a url"));
    }

    #[tokio::test]
    async fn test_cancelled_before_dispatch() {
        let client = Client::new().unwrap();
        let token = CancellationToken::new();
        token.cancel();
        let err = client
            .fetch_status(&token, "https://x.test/webring.status.json")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestConstruction);
        assert!(err.is_cancelled());
    }
}
