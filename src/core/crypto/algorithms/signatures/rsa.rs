/*!
RSA PKCS#1 v1.5 / SHA-256 signature verification.

This module provides the classical verification backend. Public keys are
accepted as DER SubjectPublicKeyInfo (the X.509 encoding most platforms
export) or as bare PKCS#1 `RSAPublicKey` DER.
*/

use ::rsa::{
    RsaPublicKey,
    pkcs1::DecodeRsaPublicKey,
    pkcs1v15::{Signature as RsaSignature, VerifyingKey},
    pkcs8::DecodePublicKey,
    signature::Verifier,
    traits::PublicKeyParts,
};
use sha2::Sha256;

use crate::core::constants::sizes;
use crate::core::error::{CryptoError, Result};
use crate::core::crypto::types::algorithms::SignatureAlgorithm;
use crate::core::crypto::traits::signature::SignatureBackend;
use crate::crypto_err;

/// RSA verification backend
#[derive(Debug, Clone, Copy)]
pub struct RsaVerifier {
    min_modulus_bits: usize,
}

impl RsaVerifier {
    /// Create a verifier rejecting keys below `min_modulus_bits`
    pub fn new(min_modulus_bits: usize) -> Self {
        Self { min_modulus_bits }
    }

    /// Smallest accepted modulus
    pub fn min_modulus_bits(&self) -> usize {
        self.min_modulus_bits
    }

    /// Decode and size-check a public key
    pub fn decode_public_key(&self, public_key: &[u8]) -> Result<RsaPublicKey> {
        let key = RsaPublicKey::from_public_key_der(public_key)
            .or_else(|_| RsaPublicKey::from_pkcs1_der(public_key))
            .map_err(|_| CryptoError::MalformedKey("not a DER encoded RSA public key".into()))?;

        let bits = key.n().bits();
        if bits < self.min_modulus_bits {
            return crypto_err!(CryptoError::MalformedKey(format!(
                "RSA modulus of {} bits is below the required {}",
                bits, self.min_modulus_bits
            )));
        }

        Ok(key)
    }
}

impl Default for RsaVerifier {
    fn default() -> Self {
        Self::new(sizes::rsa::MIN_MODULUS_BITS)
    }
}

impl SignatureBackend for RsaVerifier {
    fn algorithm(&self) -> SignatureAlgorithm {
        SignatureAlgorithm::Classical
    }

    fn validate_public_key(&self, public_key: &[u8]) -> Result<()> {
        self.decode_public_key(public_key).map(|_| ())
    }

    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<bool> {
        let key = self.decode_public_key(public_key)?;

        // PKCS#1 v1.5 signatures are exactly as long as the modulus
        if signature.len() != key.size() {
            return crypto_err!(CryptoError::MalformedSignature(format!(
                "RSA signature must be {} bytes, got {}",
                key.size(),
                signature.len()
            )));
        }

        let signature = RsaSignature::try_from(signature)
            .map_err(|_| CryptoError::MalformedSignature("unreadable RSA signature".into()))?;

        let verifying_key = VerifyingKey::<Sha256>::new(key);
        Ok(verifying_key.verify(message, &signature).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use once_cell::sync::Lazy;
    use ::rsa::{
        RsaPrivateKey,
        pkcs1::EncodeRsaPublicKey,
        pkcs1v15::SigningKey,
        pkcs8::EncodePublicKey,
        rand_core::OsRng,
        signature::{SignatureEncoding, Signer},
    };

    static KEY: Lazy<RsaPrivateKey> =
        Lazy::new(|| RsaPrivateKey::new(&mut OsRng, 2048).expect("rsa key generation"));

    fn spki(key: &RsaPrivateKey) -> Vec<u8> {
        key.to_public_key().to_public_key_der().expect("spki").as_bytes().to_vec()
    }

    fn sign(key: &RsaPrivateKey, message: &[u8]) -> Vec<u8> {
        SigningKey::<Sha256>::new(key.clone()).sign(message).to_vec()
    }

    #[test]
    fn test_signature_verification() -> Result<()> {
        let verifier = RsaVerifier::default();
        let public_key = spki(&KEY);
        let signature = sign(&KEY, b"challenge-value");

        assert!(verifier.verify(&public_key, b"challenge-value", &signature)?);
        assert!(!verifier.verify(&public_key, b"challenge-other", &signature)?);
        Ok(())
    }

    #[test]
    fn test_pkcs1_public_key_accepted() -> Result<()> {
        let verifier = RsaVerifier::default();
        let public_key = KEY.to_public_key().to_pkcs1_der().expect("pkcs1").as_bytes().to_vec();
        let signature = sign(&KEY, b"msg");

        assert!(verifier.verify(&public_key, b"msg", &signature)?);
        Ok(())
    }

    #[test]
    fn test_tampered_signature_is_false() -> Result<()> {
        let verifier = RsaVerifier::default();
        let public_key = spki(&KEY);
        let mut signature = sign(&KEY, b"msg");
        signature[10] ^= 0xFF;

        assert!(!verifier.verify(&public_key, b"msg", &signature)?);
        Ok(())
    }

    #[test]
    fn test_malformed_inputs() {
        let verifier = RsaVerifier::default();
        let public_key = spki(&KEY);
        let signature = sign(&KEY, b"msg");

        let result = verifier.verify(b"not a key", b"msg", &signature);
        assert!(matches!(result, Err(Error::Crypto(CryptoError::MalformedKey(_)))));

        let result = verifier.verify(&public_key, b"msg", &signature[..100]);
        assert!(matches!(result, Err(Error::Crypto(CryptoError::MalformedSignature(_)))));
    }

    #[test]
    fn test_small_modulus_rejected() {
        let verifier = RsaVerifier::new(3072);
        let result = verifier.validate_public_key(&spki(&KEY));
        assert!(matches!(result, Err(Error::Crypto(CryptoError::MalformedKey(_)))));
    }
}
