//! Base64 helpers for the caller boundary.
//!
//! Keys and signatures cross the boundary as standard padded base64;
//! challenge values and tokens use base64url without padding.

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};

use crate::core::constants::sizes::FINGERPRINT_BYTES;
use crate::core::error::{CryptoError, Result};

/// Encode binary data for the caller boundary
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a base64 public key
pub fn decode_key(value: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(value.trim())
        .map_err(|e| CryptoError::MalformedKey(format!("invalid base64: {}", e)).into())
}

/// Decode a base64 signature
pub fn decode_signature(value: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(value.trim())
        .map_err(|e| CryptoError::MalformedSignature(format!("invalid base64: {}", e)).into())
}

/// Encode random bytes as an unpadded base64url token
pub fn encode_token(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Short SHA-256 fingerprint of a key, for logs
pub fn fingerprint(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
