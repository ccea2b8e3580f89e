//! HTTP client for the Google Drive service-account token endpoint.
//!
//! The smoke page only builds the client and a token request to prove the
//! stack links; nothing is sent.

use std::time::Duration;

use crate::domain::error::{AppError, Result};

pub const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const REQUEST_TIMEOUT_SECS: u64 = 30;

pub struct DriveAuthClient {
    http: reqwest::Client,
    token_uri: String,
}

impl DriveAuthClient {
    pub fn new() -> Result<Self> {
        Self::with_token_uri(TOKEN_URI)
    }

    pub fn with_token_uri(token_uri: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("deploy-smoke/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            token_uri: token_uri.to_string(),
        })
    }

    pub fn token_uri(&self) -> &str {
        &self.token_uri
    }

    /// Builds, without sending, the POST a token exchange would issue.
    pub fn token_request(&self) -> Result<reqwest::Request> {
        self.http.post(&self.token_uri).build().map_err(|e| {
            AppError::Internal(format!("Invalid token endpoint {}: {}", self.token_uri, e))
        })
    }
}
