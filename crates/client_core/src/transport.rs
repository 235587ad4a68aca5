//! HTTP access to the tweet generation service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::protocol::{
    ErrorBody, GenerateTweetResponse, GenerationParams, GenerationResult, HealthResponse,
    ResponseFailure, GENERATE_TWEET_ROUTE, HEALTH_ROUTE,
};
use tracing::{debug, warn};
use url::Url;

use crate::error::{GenerationError, UNKNOWN_SERVICE_ERROR};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, params: &GenerationParams)
        -> Result<GenerationResult, GenerationError>;
    async fn health(&self) -> Result<HealthResponse, GenerationError>;
}

pub struct HttpGenerationService {
    http: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpGenerationService {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, GenerationError> {
        let base_url = parse_server_url(server_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| GenerationError::Transport(err.to_string()))?;
        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, route: &str) -> Result<Url, GenerationError> {
        self.base_url
            .join(route.trim_start_matches('/'))
            .map_err(|err| GenerationError::InvalidServerUrl {
                url: self.base_url.to_string(),
                reason: err.to_string(),
            })
    }

    fn classify(&self, err: reqwest::Error) -> GenerationError {
        if err.is_timeout() {
            GenerationError::Timeout(self.timeout)
        } else if err.is_decode() {
            GenerationError::Decode(err.to_string())
        } else {
            GenerationError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl GenerationService for HttpGenerationService {
    async fn generate(
        &self,
        params: &GenerationParams,
    ) -> Result<GenerationResult, GenerationError> {
        let url = self.endpoint(GENERATE_TWEET_ROUTE)?;
        debug!(%url, tone = %params.tone, length = %params.length, "posting generation request");

        let response = self
            .http
            .post(url)
            .json(params)
            .send()
            .await
            .map_err(|err| self.classify(err))?;
        let status = response.status();
        let body = response.text().await.map_err(|err| self.classify(err))?;

        interpret_generate_response(status, &body).inspect_err(|err| {
            warn!(status = status.as_u16(), error = %err, "generation request failed");
        })
    }

    async fn health(&self) -> Result<HealthResponse, GenerationError> {
        let url = self.endpoint(HEALTH_ROUTE)?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| self.classify(err))?;
        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Service {
                status: Some(status.as_u16()),
                message: format!("HTTP {status}"),
            });
        }
        response.json().await.map_err(|err| self.classify(err))
    }
}

/// Normalizes the base so relative joins keep any path prefix.
pub fn parse_server_url(raw: &str) -> Result<Url, GenerationError> {
    let invalid = |reason: String| GenerationError::InvalidServerUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

pub(crate) fn interpret_generate_response(
    status: StatusCode,
    body: &str,
) -> Result<GenerationResult, GenerationError> {
    if !status.is_success() {
        let server_error = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.error)
            .filter(|error| !error.trim().is_empty());
        return Err(GenerationError::Service {
            status: Some(status.as_u16()),
            message: server_error.unwrap_or_else(|| format!("HTTP {status}")),
        });
    }

    let envelope: GenerateTweetResponse =
        serde_json::from_str(body).map_err(|err| GenerationError::Decode(err.to_string()))?;
    envelope.into_result().map_err(|failure| match failure {
        ResponseFailure::Unsuccessful { error } => GenerationError::Service {
            status: Some(status.as_u16()),
            message: error.unwrap_or_else(|| UNKNOWN_SERVICE_ERROR.to_string()),
        },
        ResponseFailure::MissingTweet => {
            GenerationError::Decode("response marked success but carries no tweet".to_string())
        }
    })
}
