use crate::domain::{SearchError, SearchProvider, SearchRequest, SearchResponse};
use crate::interface_adapters::protocol::{SearchErrorBody, SearchRequestBody, SearchResponseBody};
use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use url::Url;

// Thin wrapper around reqwest for the backend search endpoint.
#[derive(Clone)]
pub struct SearchClient {
    http: Client,
    endpoint: Url,
}

#[derive(Debug)]
pub enum SearchClientBuildError {
    InvalidBaseUrl(url::ParseError),
    Http(reqwest::Error),
}

impl fmt::Display for SearchClientBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchClientBuildError::InvalidBaseUrl(err) => {
                write!(f, "invalid search service url: {err}")
            }
            SearchClientBuildError::Http(err) => write!(f, "failed to build http client: {err}"),
        }
    }
}

impl std::error::Error for SearchClientBuildError {}

impl SearchClient {
    // `timeout` bounds each whole request; `None` leaves it to the transport.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, SearchClientBuildError> {
        let endpoint = Url::parse(&format!("{}/search", base_url.trim_end_matches('/')))
            .map_err(SearchClientBuildError::InvalidBaseUrl)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(SearchClientBuildError::Http)?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SearchProvider for SearchClient {
    async fn search(&self, req: &SearchRequest) -> Result<SearchResponse, SearchError> {
        // POST the product name as JSON; reqwest sets the content type.
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(&SearchRequestBody {
                product_name: req.product_name(),
            })
            .send()
            .await
            .map_err(|err| SearchError::Transport(err.to_string()))?;
        let status = res.status();

        // Keep the upstream message for the log; the page shows one generic error.
        if !status.is_success() {
            let message = res
                .json::<SearchErrorBody>()
                .await
                .ok()
                .map(|payload| payload.error);
            return Err(SearchError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        res.json::<SearchResponseBody>()
            .await
            .map_err(|err| SearchError::Decode(err.to_string()))?
            .into_domain()
    }
}
