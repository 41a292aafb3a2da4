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

//! Link records and shareable link formatting

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// A single temporary shortened-link record.
///
/// `key` is assigned by the remote shortener and resolves through it;
/// the record itself lives only in local storage until the server-side
/// expiry removes the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TempLink {
    /// Destination URL (normalized)
    pub url: String,
    /// Short key assigned by the shortener
    pub key: String,
    /// Favicon of the destination, when one could be resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

/// Normalize user input into a usable URL.
///
/// Trims surrounding whitespace and prepends `https://` when no scheme is
/// present. Empty input and input with embedded whitespace are rejected.
pub fn normalize_url(input: &str) -> CoreResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return Err(CoreError::InvalidUrl(input.to_string()));
    }

    if trimmed.contains("://") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("https://{trimmed}"))
    }
}

/// Format the short link for a key: `https://{domain}/{key}`
pub fn link_from_key(domain: &str, key: &str) -> String {
    format!("https://{}/{}", domain.trim_end_matches('/'), key)
}

/// Format a note link: `{origin}/note#{token}`.
///
/// The token sits in the fragment, which browsers never send to a server.
pub fn note_link(origin: &str, token: &str) -> String {
    format!("{}/note#{}", origin.trim_end_matches('/'), token)
}

/// Extract the note token from a note link.
///
/// Accepts either a full link (`.../note#token`) or a bare token. A link
/// with an empty fragment is broken: there is nothing to decode.
pub fn note_token_from_link(link: &str) -> CoreResult<String> {
    match link.split_once('#') {
        Some((_, token)) if !token.is_empty() => Ok(token.to_string()),
        Some(_) => Err(CoreError::InvalidToken),
        None => {
            if link.is_empty() {
                Err(CoreError::InvalidToken)
            } else {
                Ok(link.to_string())
            }
        }
    }
}
