//! HTTP client for the company backend.
//!
//! Two endpoints, both under `{backend_url}/api`:
//!
//! | Method | Path       | Body                     | Success      |
//! |--------|------------|--------------------------|--------------|
//! | GET    | `/gallery` | (none)                   | JSON array of [`GalleryImage`] |
//! | POST   | `/contact` | [`ContactSubmission`] JSON | any 2xx    |
//!
//! Everything else (unreachable host, non-2xx status, body that does not
//! parse) is an [`ApiError`]. Callers decide what a failure means: the
//! gallery falls back to built-in images, the contact form shows an error
//! toast. This module never retries.

use crate::config::ApiConfig;
use crate::contact::{ContactEndpoint, ContactSubmission};
use crate::gallery::{GalleryImage, GallerySource};
use reqwest::blocking::Client;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL for an API path such as `"gallery"`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// `GET /api/gallery`.
    pub fn gallery(&self) -> Result<Vec<GalleryImage>, ApiError> {
        let url = self.endpoint("gallery");
        tracing::debug!(%url, "fetching gallery");
        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    /// `POST /api/contact`.
    pub fn contact(&self, submission: &ContactSubmission) -> Result<(), ApiError> {
        let url = self.endpoint("contact");
        tracing::debug!(%url, "posting contact message");
        let response = self.client.post(&url).json(submission).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(())
    }
}

impl GallerySource for ApiClient {
    fn fetch_gallery(&self) -> Result<Vec<GalleryImage>, ApiError> {
        self.gallery()
    }
}

impl ContactEndpoint for ApiClient {
    fn submit_contact(&self, submission: &ContactSubmission) -> Result<(), ApiError> {
        self.contact(submission)
    }
}
