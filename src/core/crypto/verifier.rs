/*!
Dual-family signature verification.

The verifier owns one backend per algorithm family, supplied at
construction. It holds no other state and can be shared freely between
threads.
*/

use std::fmt;
use std::sync::Arc;

use crate::core::crypto::encoding;
use crate::core::crypto::traits::signature::SignatureBackend;
use crate::core::crypto::types::algorithms::SignatureAlgorithm;
use crate::core::error::{CryptoError, Result};
use crate::crypto_err;

/// A public key that decoded and validated for one algorithm family
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKeyHandle {
    algorithm: SignatureAlgorithm,
    bytes: Vec<u8>,
}

impl PublicKeyHandle {
    /// Algorithm family the key belongs to
    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the handle, returning the raw key bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Short fingerprint for logging
    pub fn fingerprint(&self) -> String {
        encoding::fingerprint(&self.bytes)
    }
}

impl fmt::Debug for PublicKeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKeyHandle")
            .field("algorithm", &self.algorithm)
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

/// Stateless verifier over a classical and a post-quantum backend
#[derive(Clone)]
pub struct SignatureVerifier {
    classical: Arc<dyn SignatureBackend>,
    post_quantum: Arc<dyn SignatureBackend>,
}

impl SignatureVerifier {
    /// Create a verifier from explicit backends.
    ///
    /// Fails with `CryptoError::BackendMismatch` if a backend reports the
    /// wrong algorithm family for its slot.
    pub fn new(
        classical: Arc<dyn SignatureBackend>,
        post_quantum: Arc<dyn SignatureBackend>,
    ) -> Result<Self> {
        for (expected, backend) in [
            (SignatureAlgorithm::Classical, &classical),
            (SignatureAlgorithm::PostQuantum, &post_quantum),
        ] {
            if backend.algorithm() != expected {
                return crypto_err!(CryptoError::BackendMismatch {
                    expected: expected.to_string(),
                    actual: backend.algorithm().to_string(),
                });
            }
        }

        Ok(Self { classical, post_quantum })
    }

    fn backend(&self, algorithm: SignatureAlgorithm) -> &dyn SignatureBackend {
        match algorithm {
            SignatureAlgorithm::Classical => self.classical.as_ref(),
            SignatureAlgorithm::PostQuantum => self.post_quantum.as_ref(),
        }
    }

    /// Verify `signature` over `message` with the given family.
    ///
    /// `Ok(false)` means the signature does not match; errors are reserved
    /// for structurally invalid keys or signatures.
    pub fn verify(
        &self,
        algorithm: SignatureAlgorithm,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool> {
        self.backend(algorithm).verify(public_key, message, signature)
    }

    /// Decode a base64 public key into a validated handle
    pub fn decode_public_key(&self, algorithm: SignatureAlgorithm, encoded: &str) -> Result<PublicKeyHandle> {
        let bytes = encoding::decode_key(encoded)?;
        self.public_key_from_bytes(algorithm, bytes)
    }

    /// Validate raw public key bytes into a handle
    pub fn public_key_from_bytes(&self, algorithm: SignatureAlgorithm, bytes: Vec<u8>) -> Result<PublicKeyHandle> {
        self.backend(algorithm).validate_public_key(&bytes)?;
        Ok(PublicKeyHandle { algorithm, bytes })
    }
}

impl fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("classical", &self.classical.algorithm())
            .field("post_quantum", &self.post_quantum.algorithm())
            .finish()
    }
}
