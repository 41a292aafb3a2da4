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

//! Favicon lookup
//!
//! Resolves a favicon image reference for a destination URL. Best effort
//! only: every failure path degrades to "no favicon".

use reqwest::Client as HttpClient;
use tracing::warn;

const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";

/// Favicon image URL for a destination, from its host.
/// Returns `None` when the destination cannot be parsed.
pub fn favicon_url(destination: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(destination).ok()?;
    let host = parsed.host_str()?;
    Some(format!("{FAVICON_SERVICE}?domain={host}&sz=64"))
}

/// Resolve a favicon for `destination`, confirming the reference answers.
///
/// Any failure (unparseable URL, transport error, non-success status)
/// yields `None`; a missing favicon never fails a link creation.
pub async fn lookup(http: &HttpClient, destination: &str) -> Option<String> {
    let url = favicon_url(destination)?;

    match http.get(&url).send().await {
        Ok(response) if response.status().is_success() => Some(url),
        Ok(response) => {
            warn!(destination, status = %response.status(), "favicon lookup refused");
            None
        }
        Err(err) => {
            warn!(destination, error = %err, "favicon lookup failed");
            None
        }
    }
}
