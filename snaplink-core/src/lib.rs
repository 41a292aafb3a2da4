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

//! Snaplink Core
//!
//! Shared types and pure logic for the Snaplink toolkit:
//! - **Note codec**: reversible compression of note text into a
//!   URL-fragment-safe token (and back).
//! - **Link helpers**: URL normalization and shareable link formatting.
//! - **Configuration**: store limits and endpoint settings.
//!
//! This crate performs no I/O; networking and persistence live in
//! `snaplink-store`.

pub mod codec;
pub mod config;
pub mod error;
pub mod link;

pub use codec::{decode_note, encode_note};
pub use config::{StoreConfig, DEFAULT_LINK_TTL_SECS, MAX_LINKS};
pub use error::{CoreError, CoreResult};
pub use link::{link_from_key, normalize_url, note_link, note_token_from_link, TempLink};
