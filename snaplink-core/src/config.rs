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

//! Configuration for the temporary link store

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Maximum number of temporary links held locally at any time
pub const MAX_LINKS: usize = 3;

/// Server-side lifetime of a temporary link (30 minutes)
pub const DEFAULT_LINK_TTL_SECS: u64 = 30 * 60;

/// Default timeout for calls to the shortener endpoint
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Settings for the link store and the remote shortener
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the shortener API
    pub api_base: String,

    /// Domain used when formatting short links (`https://{domain}/{key}`)
    pub domain: String,

    /// Maximum number of locally stored links
    pub max_links: usize,

    /// Requested lifetime of a temporary link, in seconds.
    /// Expiry is enforced server-side; the client only reports it.
    pub link_ttl_secs: u64,

    /// Timeout for the remote creation call, in seconds
    pub request_timeout_secs: u64,

    /// Whether to resolve a favicon for newly created links
    pub fetch_favicons: bool,

    /// Directory holding the persisted link list
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.snpl.ink".to_string(),
            domain: "snpl.ink".to_string(),
            max_links: MAX_LINKS,
            link_ttl_secs: DEFAULT_LINK_TTL_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            fetch_favicons: true,
            data_dir: PathBuf::from("./snaplink-data"),
        }
    }
}

impl StoreConfig {
    /// Lifetime of a temporary link as a [`Duration`]
    pub fn link_ttl(&self) -> Duration {
        Duration::from_secs(self.link_ttl_secs)
    }

    /// Remote request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_service_limits() {
        let config = StoreConfig::default();
        assert_eq!(config.max_links, 3);
        assert_eq!(config.link_ttl(), Duration::from_secs(1800));
        assert!(config.fetch_favicons);
    }
}
