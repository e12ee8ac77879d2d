use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::AUTHORIZATION;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, error};

use crate::config::Config;
use crate::http_client::http_client;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Error 400: Bad request (probably means your key is wrong)")]
    BadRequest,
    #[error("Error 429: Sending too many requests right now")]
    RateLimited,
    #[error("Error {0}: Unknown request error")]
    Client(u16),
    #[error("Error {0}: Unknown server error")]
    Server(u16),
    #[error("Error {0}: Unexpected status code")]
    Unexpected(u16),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("graphql error: {0}")]
    Graphql(String),
}

impl ApiError {
    /// Numeric code shown to the user; `None` when no HTTP status was involved.
    pub fn code(&self) -> Option<u16> {
        match self {
            ApiError::BadRequest => Some(400),
            ApiError::RateLimited => Some(429),
            ApiError::Client(_) => Some(404),
            ApiError::Server(_) => Some(500),
            ApiError::Unexpected(status) => Some(*status),
            ApiError::Transport(_) | ApiError::Decode(_) | ApiError::Graphql(_) => None,
        }
    }
}

/// Maps an HTTP status to its error kind; `None` for 2xx.
pub fn classify_status(status: u16) -> Option<ApiError> {
    match status {
        200..=299 => None,
        400 => Some(ApiError::BadRequest),
        429 => Some(ApiError::RateLimited),
        401..=499 => Some(ApiError::Client(status)),
        500..=599 => Some(ApiError::Server(status)),
        _ => Some(ApiError::Unexpected(status)),
    }
}

/// One GraphQL round trip returning the raw response body.
pub trait GraphqlTransport {
    fn post(&self, query: &str, variables: &Value) -> Result<String, ApiError>;
}

pub struct StartggClient {
    client: &'static Client,
    url: String,
    bearer: String,
}

impl StartggClient {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let client = http_client(cfg.timeout)?;
        Ok(Self {
            client,
            url: cfg.api_url.clone(),
            bearer: format!("Bearer {}", cfg.token),
        })
    }

    /// POST with the bearer header and a `{query, variables}` JSON body.
    pub fn request(&self, query: &str, variables: &Value) -> RequestBuilder {
        let body = json!({ "query": query, "variables": variables });
        self.client
            .post(&self.url)
            .header(AUTHORIZATION, &self.bearer)
            .json(&body)
    }
}

impl GraphqlTransport for StartggClient {
    fn post(&self, query: &str, variables: &Value) -> Result<String, ApiError> {
        let result = self
            .request(query, variables)
            .send()
            .map_err(|err| ApiError::Transport(err.to_string()))
            .and_then(|resp| {
                let status = resp.status().as_u16();
                debug!(status, "graphql response");
                match classify_status(status) {
                    Some(err) => Err(err),
                    None => resp
                        .text()
                        .map_err(|err| ApiError::Decode(err.to_string())),
                }
            });

        if let Err(err) = &result {
            match err.code() {
                Some(code) => error!(code, "{err}"),
                None => error!("{err}"),
            }
        }
        result
    }
}
