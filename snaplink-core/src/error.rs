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

//! Core error types

use thiserror::Error;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors produced by the pure core logic
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The token is not something `encode_note` could have produced.
    /// No partial data is recoverable from a broken token.
    #[error("note token is broken or invalid")]
    InvalidToken,

    /// The input cannot be turned into a usable URL
    #[error("invalid url: {0:?}")]
    InvalidUrl(String),
}
