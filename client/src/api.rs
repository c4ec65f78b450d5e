use movie_core::{ListItemView, MovieRecord};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("base url {0:?} cannot carry a path")]
    InvalidBaseUrl(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server answered {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status {
        status: reqwest::StatusCode,
        message: Option<String>,
    },
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Thin wrapper over the three `/api` routes.
#[derive(Clone)]
pub struct MovieClient {
    http: Client,
    base: Url,
}

impl MovieClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()).into());
        }
        let http = Client::builder()
            .user_agent(concat!("movie-client/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { http, base })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn ping(&self) -> Result<String, ApiError> {
        let resp = self.http.get(self.endpoint(&["api", "ping"])?).send().await?;
        let resp = check_status(resp).await?;
        Ok(resp.text().await?)
    }

    pub async fn list(&self) -> Result<Vec<ListItemView>, ApiError> {
        self.get_json(&["api", "movies"]).await
    }

    /// `id` is sent as text; the server matches it loosely against stored ids.
    pub async fn detail(&self, id: &str) -> Result<MovieRecord, ApiError> {
        self.get_json(&["api", "movies", id]).await
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "fetching");
        let resp = check_status(self.http.get(url).send().await?).await?;
        Ok(resp.json().await?)
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.json::<ErrorBody>().await.ok().map(|b| b.message);
    Err(ApiError::Status { status, message })
}
