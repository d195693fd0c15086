/*!
Traits for signature verification.

This module defines the interface a signature verification backend
implements. Backends are handed to the verifier explicitly, which lets tests
substitute deterministic fakes.
*/

use crate::core::error::Result;
use crate::core::crypto::types::algorithms::SignatureAlgorithm;

/// Trait for signature verification backends
pub trait SignatureBackend: Send + Sync {
    /// Algorithm family this backend verifies
    fn algorithm(&self) -> SignatureAlgorithm;

    /// Check that `public_key` is a structurally valid key for this backend.
    ///
    /// Fails with `CryptoError::MalformedKey`.
    fn validate_public_key(&self, public_key: &[u8]) -> Result<()>;

    /// Verify `signature` over `message`.
    ///
    /// Returns `Ok(false)` when the signature simply does not match, and
    /// fails only with `CryptoError::MalformedKey` or
    /// `CryptoError::MalformedSignature` for structurally invalid inputs.
    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<bool>;
}
