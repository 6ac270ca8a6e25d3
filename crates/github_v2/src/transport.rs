//! HTTP transport for the GitHub API v2.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use crate::env::{var, var_parsed};

pub const DEFAULT_BASE_URL: &str = "https://github.com/api/v2/json";

type Result<T> = std::result::Result<T, TransportError>;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Permission(anyhow::Error),
    #[error(transparent)]
    NotFound(anyhow::Error),
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        use reqwest::StatusCode as Status;

        match error.status() {
            Some(Status::UNAUTHORIZED) | Some(Status::FORBIDDEN) => Self::Permission(error.into()),
            Some(Status::NOT_FOUND) => Self::NotFound(error.into()),
            _ => Self::Other(error.into()),
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(error: serde_json::Error) -> Self {
        Self::Other(error.into())
    }
}

/// The HTTP collaborator behind [`UserClient`](crate::users::UserClient).
///
/// Both methods perform a single request against the API and return the
/// decoded JSON body.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value>;
    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value>;
}

#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    auth: Option<(String, String)>,
}

impl HttpTransport {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self {
            client,
            base_url,
            auth: None,
        }
    }

    /// Attaches a `login`/`token` credential pair. The v2 API takes these as
    /// query parameters, so they are appended to every request.
    pub fn with_auth(mut self, login: impl Into<String>, token: impl Into<String>) -> Self {
        self.auth = Some((login.into(), token.into()));
        self
    }

    /// Creates a transport from the `GITHUB_V2_BASE_URL`, `GITHUB_V2_LOGIN`
    /// and `GITHUB_V2_TOKEN` environment variables, all of them optional.
    pub fn from_environment() -> anyhow::Result<Self> {
        let base_url = match var_parsed("GITHUB_V2_BASE_URL")? {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).unwrap(),
        };

        let transport = Self::new(Client::new(), base_url);
        match (var("GITHUB_V2_LOGIN")?, var("GITHUB_V2_TOKEN")?) {
            (Some(login), Some(token)) => Ok(transport.with_auth(login, token)),
            (None, None) => Ok(transport),
            _ => {
                warn!("GITHUB_V2_LOGIN and GITHUB_V2_TOKEN must be set together; ignoring them");
                Ok(transport)
            }
        }
    }

    fn url(&self, path: &str) -> String {
        // Plain concatenation; path segments are not escaped.
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    async fn request(&self, request: reqwest::RequestBuilder) -> Result<Value> {
        let request = match &self.auth {
            Some((login, token)) => request.query(&[("login", login), ("token", token)]),
            None => request,
        };

        Ok(request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        info!("GITHUB HTTP: GET {url}");
        self.request(self.client.get(url)).await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value> {
        let url = self.url(path);
        info!("GITHUB HTTP: POST {url}");

        let mut request = self.client.post(url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        self.request(request).await
    }
}
