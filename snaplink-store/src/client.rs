// Copyright 2025 Snaplink (https://github.com/snaplink-dev/snaplink)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Shortener API client
//!
//! Async client for the remote creation endpoint. The endpoint is an
//! opaque collaborator: it accepts `{ url, temporary, expirationTime }`
//! and answers 201 with `{ url, key }`, or a non-201 status with an
//! optional `message` list.

use crate::error::{StoreError, StoreResult};
use reqwest::{Client as HttpClient, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Fallback shown when the endpoint fails without a usable message
pub const GENERIC_CREATE_ERROR: &str =
    "There was an error creating your link. Please try again.";

/// Key and destination returned by a successful creation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLink {
    pub url: String,
    pub key: String,
}

/// Seam over the creation endpoint so the store can be exercised
/// without a network.
#[async_trait::async_trait]
pub trait CreateLink: Send + Sync {
    /// Ask the remote service to create a temporary link for `url`.
    async fn create_temporary(&self, url: &str) -> StoreResult<CreatedLink>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ShortenRequest<'a> {
    url: &'a str,
    temporary: bool,
    /// Absolute expiry, epoch milliseconds
    expiration_time: i64,
}

#[derive(Debug, Deserialize)]
struct ShortenResponse {
    url: String,
    key: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<Vec<String>>,
}

/// HTTP client for the shortener API.
pub struct ShortenerClient {
    api_base: String,
    link_ttl: Duration,
    http: HttpClient,
}

impl ShortenerClient {
    /// Create a client against `api_base` with the given link lifetime
    /// and request timeout.
    pub fn new(api_base: impl Into<String>, link_ttl: Duration, timeout: Duration) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_base: api_base.into(),
            link_ttl,
            http,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/api/v1/shortener",
            self.api_base.trim_end_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl CreateLink for ShortenerClient {
    async fn create_temporary(&self, url: &str) -> StoreResult<CreatedLink> {
        let expiration_time =
            chrono::Utc::now().timestamp_millis() + self.link_ttl.as_millis() as i64;

        let body = ShortenRequest {
            url,
            temporary: true,
            expiration_time,
        };

        debug!(url, "posting creation request to shortener");
        let response = self.http.post(self.endpoint()).json(&body).send().await?;
        let status = response.status();

        if status != StatusCode::CREATED {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.is_empty())
                .map(|m| m.join(", "))
                .unwrap_or_else(|| GENERIC_CREATE_ERROR.to_string());

            return Err(StoreError::Endpoint {
                status: status.as_u16(),
                message,
            });
        }

        let data: ShortenResponse = response.json().await?;
        Ok(CreatedLink {
            url: data.url,
            key: data.key,
        })
    }
}
