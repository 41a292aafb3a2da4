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

//! Snaplink Store
//!
//! The temporary link store: a capped, insertion-ordered list of
//! short-lived link records, persisted as a single JSON document and
//! created through the remote shortener API.
//!
//! The store is the single writer of the persisted list. Creations are
//! additionally single-flight: while one create is pending against the
//! remote endpoint, a second one is rejected outright instead of racing
//! the first past the capacity limit.

pub mod client;
pub mod error;
pub mod favicon;
pub mod store;

pub use client::{CreateLink, CreatedLink, ShortenerClient};
pub use error::{StoreError, StoreResult};
pub use store::LinkStore;
