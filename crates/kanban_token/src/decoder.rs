//! Structural checks and claims decoding.
//!
//! Decoding never verifies the signature. The server is the only party that
//! holds the signing secret; the client reads claims for display and
//! locale selection only.

use crate::claims::Claims;
use crate::error::{TokenError, TokenResult};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

/// Segment delimiter.
pub const SEGMENT_DELIMITER: char = '.';

/// Number of segments in a compact token: header, claims, signature.
pub const SEGMENT_COUNT: usize = 3;

/// URL-safe alphabet, tolerant of both padded and unpadded input.
const SEGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Splits a token into its three segments.
///
/// # Errors
///
/// Returns [`TokenError::Malformed`] for a wrong segment count and
/// [`TokenError::EmptySegment`] if any segment is empty.
pub fn split_segments(token: &str) -> TokenResult<[&str; SEGMENT_COUNT]> {
    let parts: Vec<&str> = token.split(SEGMENT_DELIMITER).collect();
    let segments: [&str; SEGMENT_COUNT] = parts
        .as_slice()
        .try_into()
        .map_err(|_| TokenError::Malformed {
            segments: parts.len(),
        })?;

    if let Some(index) = segments.iter().position(|s| s.is_empty()) {
        return Err(TokenError::EmptySegment { index });
    }
    Ok(segments)
}

/// Returns true iff the token splits into exactly three non-empty segments.
#[must_use]
pub fn is_structurally_valid(token: &str) -> bool {
    split_segments(token).is_ok()
}

/// Decodes the claims segment of a token.
///
/// # Errors
///
/// Fails if the token is not structurally valid, or if the claims segment
/// is not base64url-encoded JSON.
pub fn decode_claims(token: &str) -> TokenResult<Claims> {
    let [_, claims, _] = split_segments(token)?;
    let bytes = SEGMENT_ENGINE.decode(claims)?;
    Ok(serde_json::from_slice(&bytes)?)
}
