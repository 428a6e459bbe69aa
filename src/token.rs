//! Access Token Checks
//!
//! Local sanity checks on the bearer token: shape and JWT `exp`. The token is
//! otherwise opaque; a payload that cannot be decoded is not treated as expired.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use chrono::Utc;
use serde::Deserialize;

/// Tokens this close to expiry are already rejected
const CLOCK_SKEW_BUFFER_MS: i64 = 5 * 60 * 1000;

/// base64url, with or without padding, tolerating non-zero trailing bits
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenPayload {
    #[serde(default)]
    pub exp: Option<f64>,
    #[serde(default)]
    pub iat: Option<f64>,
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn decode_payload(token: &str) -> Option<TokenPayload> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    // Standard-alphabet payloads are accepted too
    let segment = parts[1].replace('+', "-").replace('/', "_");
    let bytes = PAYLOAD_ENGINE.decode(segment).ok()?;
    serde_json::from_slice(&bytes).ok()
}

fn is_valid_format(token: &str) -> bool {
    let parts: Vec<&str> = token.split('.').collect();
    parts.len() == 3 && parts.iter().all(|part| !part.is_empty())
}

/// `exp` in milliseconds; absent or zero means no expiry
pub fn token_expiration(token: &str) -> Option<i64> {
    decode_payload(token)?
        .exp
        .filter(|exp| *exp != 0.0 && exp.is_finite())
        .map(|exp| (exp * 1000.0) as i64)
}

pub fn is_expired_at(token: &str, now_ms: i64) -> bool {
    match token_expiration(token) {
        Some(expires_at) => now_ms >= expires_at - CLOCK_SKEW_BUFFER_MS,
        None => false,
    }
}

/// Present, well-formed and not about to expire
pub fn validate_token_at(token: Option<&str>, now_ms: i64) -> bool {
    match token {
        Some(token) if !token.is_empty() => is_valid_format(token) && !is_expired_at(token, now_ms),
        _ => false,
    }
}

pub fn validate_token(token: Option<&str>) -> bool {
    validate_token_at(token, now_millis())
}
