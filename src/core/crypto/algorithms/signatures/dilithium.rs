/*!
CRYSTALS-Dilithium signature verification.

This module provides the post-quantum verification backend, with support
for the three Dilithium parameter sets.
*/

use crate::core::constants::sizes::dilithium as sizes;
use crate::core::error::{CryptoError, Result};
use crate::core::crypto::types::algorithms::{DilithiumLevel, SignatureAlgorithm};
use crate::core::crypto::traits::signature::SignatureBackend;
use crate::crypto_err;

use pqcrypto_dilithium::{dilithium2, dilithium3, dilithium5};
use pqcrypto_traits::sign::{DetachedSignature as _, PublicKey as _};

/// Decode key and signature for one parameter set and verify.
macro_rules! verify_detached {
    ($module:ident, $public_key:expr, $message:expr, $signature:expr) => {{
        let pk = $module::PublicKey::from_bytes($public_key)
            .map_err(|e| CryptoError::MalformedKey(format!("dilithium public key: {:?}", e)))?;
        let sig = $module::DetachedSignature::from_bytes($signature)
            .map_err(|e| CryptoError::MalformedSignature(format!("dilithium signature: {:?}", e)))?;
        Ok($module::verify_detached_signature(&sig, $message, &pk).is_ok())
    }};
}

/// Dilithium verification backend
#[derive(Debug, Clone, Copy)]
pub struct DilithiumVerifier {
    level: DilithiumLevel,
}

impl DilithiumVerifier {
    /// Create a verifier for the given parameter set
    pub fn new(level: DilithiumLevel) -> Self {
        Self { level }
    }

    /// Parameter set in use
    pub fn level(&self) -> DilithiumLevel {
        self.level
    }

    /// Get the public key size for the configured parameter set
    pub fn public_key_size(&self) -> usize {
        match self.level {
            DilithiumLevel::Dilithium2 => sizes::PUBLIC_KEY_BYTES_2,
            DilithiumLevel::Dilithium3 => sizes::PUBLIC_KEY_BYTES,
            DilithiumLevel::Dilithium5 => sizes::PUBLIC_KEY_BYTES_5,
        }
    }

    /// Get the signature size for the configured parameter set
    pub fn signature_size(&self) -> usize {
        match self.level {
            DilithiumLevel::Dilithium2 => sizes::SIGNATURE_BYTES_2,
            DilithiumLevel::Dilithium3 => sizes::SIGNATURE_BYTES,
            DilithiumLevel::Dilithium5 => sizes::SIGNATURE_BYTES_5,
        }
    }
}

impl Default for DilithiumVerifier {
    fn default() -> Self {
        Self::new(DilithiumLevel::default())
    }
}

impl SignatureBackend for DilithiumVerifier {
    fn algorithm(&self) -> SignatureAlgorithm {
        SignatureAlgorithm::PostQuantum
    }

    fn validate_public_key(&self, public_key: &[u8]) -> Result<()> {
        let expected = self.public_key_size();
        if public_key.len() != expected {
            return crypto_err!(CryptoError::MalformedKey(format!(
                "{} public key must be {} bytes, got {}",
                self.level,
                expected,
                public_key.len()
            )));
        }
        Ok(())
    }

    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<bool> {
        if signature.len() != self.signature_size() {
            return crypto_err!(CryptoError::MalformedSignature(format!(
                "{} signature must be {} bytes, got {}",
                self.level,
                self.signature_size(),
                signature.len()
            )));
        }

        match self.level {
            DilithiumLevel::Dilithium2 => verify_detached!(dilithium2, public_key, message, signature),
            DilithiumLevel::Dilithium3 => verify_detached!(dilithium3, public_key, message, signature),
            DilithiumLevel::Dilithium5 => verify_detached!(dilithium5, public_key, message, signature),
        }
    }
}
