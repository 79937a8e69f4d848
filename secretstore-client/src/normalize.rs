//! Hex and body normalization shared by the facades
//!
//! Parity's RPC methods expect `0x`-prefixed hex, Secret Store URL paths
//! expect bare hex, and Secret Store answers most sessions with a JSON string
//! literal as a plain-text body. These helpers translate between the three.

use alloy_primitives::hex;

use crate::error::ClientError;

const HEX_PREFIX: &str = "0x";

/// Remove a leading `0x`; `None` yields an empty string.
pub fn strip_hex_prefix(value: Option<&str>) -> String {
    let value = value.unwrap_or_default();
    value.strip_prefix(HEX_PREFIX).unwrap_or(value).to_string()
}

/// Prepend `0x` unless it is already there.
pub fn ensure_hex_prefix(value: &str) -> String {
    if value.starts_with(HEX_PREFIX) {
        value.to_string()
    } else {
        format!("{}{}", HEX_PREFIX, value)
    }
}

/// Whether the body is exactly one pair of enclosing double quotes around some content.
pub fn is_quoted(body: &str) -> bool {
    body.len() >= 2 && body.starts_with('"') && body.ends_with('"')
}

/// Strip one enclosing pair of double quotes, leaving inner quotes alone.
///
/// A body that is not quoted is returned unchanged.
pub fn unwrap_quoted_string(body: &str) -> String {
    if is_quoted(body) {
        body[1..body.len() - 1].to_string()
    } else {
        body.to_string()
    }
}

/// Turn a hex value into a URL path segment.
///
/// The prefix is stripped and what remains must be non-empty, even-length hex,
/// so a caller-supplied value can never add path components to a session URL.
pub fn hex_path_segment(field: &str, value: &str) -> Result<String, ClientError> {
    let bare = strip_hex_prefix(Some(value));
    if bare.is_empty() {
        return Err(ClientError::InvalidInput(format!("{} must not be empty", field)));
    }
    hex::decode(&bare).map_err(|e| ClientError::InvalidInput(format!("{} is not valid hex: {}", field, e)))?;
    Ok(bare)
}
