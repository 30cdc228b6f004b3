//! HTTP transport for the catalog service.

use std::{iter, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{Filename, VideoSummary},
    error::ServiceError,
    protocol::{CatalogResponse, StreamUrlResponse, CATALOG_PATH, STREAM_PATH_PREFIX},
};
use tracing::debug;
use url::Url;

use crate::{error::ClientError, CatalogService};

#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    /// Applied by reqwest to the whole request; `None` leaves it unbounded.
    pub request_timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct HttpCatalogService {
    http: Client,
    base_url: Url,
}

impl HttpCatalogService {
    pub fn new(base_url: &str, options: HttpOptions) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url.trim()).map_err(|err| ClientError::Config {
            reason: format!("invalid api base url '{base_url}': {err}"),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::Config {
                reason: format!("api base url '{base_url}' cannot carry a path"),
            });
        }

        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|err| ClientError::Config {
            reason: format!("failed to build http client: {err}"),
        })?;

        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    pub fn catalog_url(&self) -> Url {
        self.endpoint(CATALOG_PATH.iter().copied())
    }

    /// The filename is pushed as one percent-encoded segment, so `/`, `?` and
    /// `#` inside it cannot reach another route.
    pub fn stream_url(&self, filename: &Filename) -> Url {
        self.endpoint(
            STREAM_PATH_PREFIX
                .iter()
                .copied()
                .chain(iter::once(filename.as_str())),
        )
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        // `new` rejected cannot-be-a-base urls.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_body(&self, url: Url) -> Result<Vec<u8>, String> {
        let res = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|err| format!("GET {url}: {err}"))?;
        let status = res.status();
        let body = res
            .bytes()
            .await
            .map_err(|err| format!("GET {url}: failed to read body: {err}"))?;

        if !status.is_success() {
            let err = ServiceError::from_body(status.as_u16(), &body);
            debug!(%url, status = err.status, code = ?err.code, "catalog service rejected request");
            return Err(format!("GET {url}: {}", err.message));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl CatalogService for HttpCatalogService {
    async fn list_videos(&self) -> Result<Vec<VideoSummary>, ClientError> {
        let body = self
            .get_body(self.catalog_url())
            .await
            .map_err(|reason| ClientError::CatalogFetchFailed { reason })?;
        let videos: CatalogResponse =
            serde_json::from_slice(&body).map_err(|err| ClientError::CatalogParseFailed {
                reason: err.to_string(),
            })?;

        debug!(count = videos.len(), "catalog fetched");
        Ok(videos)
    }

    async fn resolve_stream(&self, filename: &Filename) -> Result<String, ClientError> {
        // The url crate drops dot segments, which would hit the prefix route instead.
        if matches!(filename.as_str(), "" | "." | "..") {
            return Err(ClientError::StreamFetchFailed {
                filename: filename.clone(),
                reason: "filename is not a valid path segment".to_string(),
            });
        }

        let body = self
            .get_body(self.stream_url(filename))
            .await
            .map_err(|reason| ClientError::StreamFetchFailed {
                filename: filename.clone(),
                reason,
            })?;
        let response: StreamUrlResponse =
            serde_json::from_slice(&body).map_err(|err| ClientError::StreamFetchFailed {
                filename: filename.clone(),
                reason: format!("malformed body: {err}"),
            })?;

        let url = response
            .into_url()
            .ok_or_else(|| ClientError::StreamUrlMissing {
                filename: filename.clone(),
            })?;
        debug!(%filename, "stream url resolved");
        Ok(url)
    }
}
