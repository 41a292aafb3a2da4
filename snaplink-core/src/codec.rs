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

//! Note codec
//!
//! Turns arbitrary note text into an opaque token that can sit after the
//! `#` of a shareable link without any further escaping, and reverses the
//! transform on the viewing side. The fragment never reaches a server, so
//! the note exists only inside the link itself.
//!
//! The transform is DEFLATE at a fixed level followed by URL-safe base64
//! without padding. Both stages are deterministic: equal inputs always
//! produce identical tokens.

use crate::error::{CoreError, CoreResult};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Encode note text into a URL-fragment-safe token.
///
/// The output alphabet is `[A-Za-z0-9_-]`, all valid in a URL fragment
/// without percent-encoding.
pub fn encode_note(text: &str) -> String {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    // Writing into a Vec cannot fail.
    encoder
        .write_all(text.as_bytes())
        .expect("deflate into memory");
    let compressed = encoder.finish().expect("deflate into memory");
    URL_SAFE_NO_PAD.encode(compressed)
}

/// Decode a token produced by [`encode_note`] back into note text.
///
/// Anything that is not a well-formed token (bad base64, corrupt DEFLATE
/// stream, non-UTF-8 plaintext, empty input) yields
/// [`CoreError::InvalidToken`]; no partial text is ever returned.
pub fn decode_note(token: &str) -> CoreResult<String> {
    if token.is_empty() {
        return Err(CoreError::InvalidToken);
    }

    let compressed = URL_SAFE_NO_PAD
        .decode(token.as_bytes())
        .map_err(|_| CoreError::InvalidToken)?;

    let mut text = String::new();
    DeflateDecoder::new(compressed.as_slice())
        .read_to_string(&mut text)
        .map_err(|_| CoreError::InvalidToken)?;

    Ok(text)
}
