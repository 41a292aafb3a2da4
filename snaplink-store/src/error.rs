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

//! Link store error types

use snaplink_core::CoreError;
use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the link store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The local list already holds the maximum number of links.
    /// The remote endpoint is never contacted in this state.
    #[error("link limit reached ({max} links)")]
    CapacityReached { max: usize },

    /// Another create is still pending against the remote endpoint
    #[error("a link creation is already in flight")]
    CreateInFlight,

    /// The shortener endpoint rejected the creation request
    #[error("shortener rejected the request ({status}): {message}")]
    Endpoint { status: u16, message: String },

    /// Remove index outside the stored list
    #[error("no link at index {index} (list holds {len})")]
    OutOfRange { index: usize, len: usize },

    /// HTTP transport failure talking to the shortener
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Persisted list could not be read or written
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted list could not be serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input (bad URL, broken token)
    #[error(transparent)]
    Core(#[from] CoreError),
}
