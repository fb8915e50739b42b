pub mod imp;

use serde::de::DeserializeOwned;
use std::fmt::Display;
use thiserror::Error;

/// Transport used by the ledger client. Abstracted behind a trait so ledger
/// interactions can be exercised against a mock or a test server.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    /// POSTs a JSON body and returns the raw response.
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<Response, HttpClientError>;
}

#[derive(Debug)]
pub struct StatusCode(pub u16);

#[derive(Debug)]
pub struct Response {
    pub body: Vec<u8>,
    pub status: StatusCode,
}

#[derive(Debug, Error)]
pub enum HttpClientError {
    #[error("HTTP error: `{0}`")]
    HttpError(String),
    #[error("JSON error: `{0}`")]
    JsonError(#[from] serde_json::Error),
    #[error("HTTP status code is error: `{0}`")]
    StatusCodeIsError(StatusCode),
}

impl Response {
    pub fn error_for_status(self) -> Result<Self, HttpClientError> {
        if self.status.is_client_error() || self.status.is_server_error() {
            Err(HttpClientError::StatusCodeIsError(self.status))
        } else {
            Ok(self)
        }
    }

    pub fn json<T: DeserializeOwned>(self) -> Result<T, HttpClientError> {
        serde_json::from_slice(&self.body).map_err(HttpClientError::JsonError)
    }
}

impl StatusCode {
    pub fn is_success(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    pub fn is_client_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    pub fn is_server_error(&self) -> bool {
        self.0 >= 500 && self.0 < 600
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
