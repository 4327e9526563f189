// SPDX-FileCopyrightText: 2026 Duokey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared HTTP client for the Duo API.

use std::time::Duration;

use duokey_core::DuokeyError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

/// User-Agent of the emulated Duo Mobile build.
pub const DUO_USER_AGENT: &str =
    "DuoMobileApp/4.73.0.873.1 (arm64; iOS 18.1); Client: Foundation";

/// HTTP client with the device default headers applied to every request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl ApiClient {
    pub fn new() -> Result<Self, DuokeyError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DUO_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-us"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DuokeyError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: None,
        })
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Resolve an endpoint URL against `https://{host}`, or against the
    /// test override when one is set.
    pub(crate) fn url(&self, host: &str, path: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{base}{path}"),
            None => format!("https://{host}{path}"),
        }
    }

    /// Overrides the scheme and host (for testing with wiremock).
    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }
}
