use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Response};
use shared::{
    error::ApiError,
    protocol::{generate_route, GenerationRequest, PoemResponse},
};
use tracing::{info, warn};
use url::Url;

pub mod dispatcher;
pub mod error;
pub mod template;

pub use dispatcher::{GenerationDispatcher, GenerationOutcome, RequestTicket};
pub use error::GenerationError;
pub use template::{fetch_word_template, WordTemplate};

/// Boundary to the poem generation service.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

pub struct HttpGenerationGateway {
    http: Client,
    server_url: Url,
}

impl HttpGenerationGateway {
    pub fn new(server_url: &str) -> Result<Self, GenerationError> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, GenerationError> {
        Ok(Self {
            http,
            server_url: parse_server_url(server_url)?,
        })
    }

    pub fn server_url(&self) -> &Url {
        &self.server_url
    }
}

#[async_trait]
impl GenerationGateway for HttpGenerationGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let endpoint = endpoint(&self.server_url, generate_route())?;
        info!(%endpoint, devices = request.entries().len(), "requesting poem");
        let response = self.http.post(endpoint).json(request).send().await?;
        let response = ensure_success(response).await?;

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));
        let body = response.text().await?;
        if is_json {
            Ok(serde_json::from_str::<PoemResponse>(&body)?.poem)
        } else {
            Ok(body)
        }
    }
}

pub(crate) fn parse_server_url(raw: &str) -> Result<Url, GenerationError> {
    Url::parse(raw).map_err(|source| GenerationError::InvalidServerUrl {
        url: raw.to_string(),
        source,
    })
}

/// Resolves `route` beneath the server url's path, so a prefix such as
/// `http://host/poems` is kept.
pub(crate) fn endpoint(server_url: &Url, route: &str) -> Result<Url, GenerationError> {
    let mut base = server_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(route.trim_start_matches('/'))
        .map_err(|source| GenerationError::InvalidServerUrl {
            url: format!("{server_url}{route}"),
            source,
        })
}

/// Maps non-2xx responses to [`GenerationError::Service`], preferring the
/// message of an [`ApiError`] body when there is one.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, GenerationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ApiError>(&body) {
        Ok(api_error) => api_error.message,
        Err(_) if body.trim().is_empty() => status.to_string(),
        Err(_) => body,
    };
    warn!(status = status.as_u16(), %message, "generation service returned an error");
    Err(GenerationError::Service {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
