/*!
Client-side key holder.

A [`HybridSigner`] owns one RSA and one Dilithium key pair and answers
challenges with both signatures, in exactly the encodings the server
expects: SPKI DER for the RSA public key, raw bytes for the Dilithium
public key, all wrapped in standard base64.
*/

use ::rsa::{
    RsaPrivateKey,
    pkcs1v15::SigningKey,
    pkcs8::EncodePublicKey,
    rand_core::OsRng,
    signature::{SignatureEncoding, Signer},
};
use pqcrypto_dilithium::{dilithium2, dilithium3, dilithium5};
use pqcrypto_traits::sign::{DetachedSignature as _, PublicKey as _};
use sha2::Sha256;
use std::fmt;

use crate::core::constants::sizes;
use crate::core::crypto::encoding;
use crate::core::crypto::types::algorithms::DilithiumLevel;
use crate::core::error::{Error, Result};
use crate::protocol::messages::{EnrollmentResponse, LoginResponse, SignatureProof};

enum DilithiumSecretKey {
    Level2(dilithium2::SecretKey),
    Level3(dilithium3::SecretKey),
    Level5(dilithium5::SecretKey),
}

impl DilithiumSecretKey {
    fn generate(level: DilithiumLevel) -> (Vec<u8>, Self) {
        match level {
            DilithiumLevel::Dilithium2 => {
                let (pk, sk) = dilithium2::keypair();
                (pk.as_bytes().to_vec(), Self::Level2(sk))
            }
            DilithiumLevel::Dilithium3 => {
                let (pk, sk) = dilithium3::keypair();
                (pk.as_bytes().to_vec(), Self::Level3(sk))
            }
            DilithiumLevel::Dilithium5 => {
                let (pk, sk) = dilithium5::keypair();
                (pk.as_bytes().to_vec(), Self::Level5(sk))
            }
        }
    }

    fn sign(&self, message: &[u8]) -> Vec<u8> {
        match self {
            Self::Level2(sk) => dilithium2::detached_sign(message, sk).as_bytes().to_vec(),
            Self::Level3(sk) => dilithium3::detached_sign(message, sk).as_bytes().to_vec(),
            Self::Level5(sk) => dilithium5::detached_sign(message, sk).as_bytes().to_vec(),
        }
    }
}

/// RSA and Dilithium key pairs held by a client
pub struct HybridSigner {
    rsa_key: SigningKey<Sha256>,
    rsa_public_key: Vec<u8>,
    dilithium_key: DilithiumSecretKey,
    dilithium_public_key: Vec<u8>,
    level: DilithiumLevel,
}

impl HybridSigner {
    /// Generate fresh key pairs
    pub fn generate(rsa_bits: usize, level: DilithiumLevel) -> Result<Self> {
        let private_key = RsaPrivateKey::new(&mut OsRng, rsa_bits)
            .map_err(|e| Error::Internal(format!("RSA key generation failed: {}", e)))?;
        Self::from_rsa_key(private_key, level)
    }

    /// Generate RSA-3072 and Dilithium3 key pairs
    pub fn generate_default() -> Result<Self> {
        Self::generate(sizes::rsa::CLIENT_MODULUS_BITS, DilithiumLevel::Dilithium3)
    }

    /// Use an existing RSA key and a fresh Dilithium key pair
    pub fn from_rsa_key(private_key: RsaPrivateKey, level: DilithiumLevel) -> Result<Self> {
        let rsa_public_key = private_key
            .to_public_key()
            .to_public_key_der()
            .map_err(|e| Error::Internal(format!("RSA public key encoding failed: {}", e)))?
            .as_bytes()
            .to_vec();

        let (dilithium_public_key, dilithium_key) = DilithiumSecretKey::generate(level);

        Ok(Self {
            rsa_key: SigningKey::<Sha256>::new(private_key),
            rsa_public_key,
            dilithium_key,
            dilithium_public_key,
            level,
        })
    }

    /// Dilithium parameter set of the post-quantum key
    pub fn level(&self) -> DilithiumLevel {
        self.level
    }

    /// RSA public key as SPKI DER
    pub fn classical_public_key(&self) -> &[u8] {
        &self.rsa_public_key
    }

    /// Dilithium public key bytes
    pub fn pq_public_key(&self) -> &[u8] {
        &self.dilithium_public_key
    }

    /// RSA public key, base64
    pub fn classical_public_key_b64(&self) -> String {
        encoding::encode(&self.rsa_public_key)
    }

    /// Dilithium public key, base64
    pub fn pq_public_key_b64(&self) -> String {
        encoding::encode(&self.dilithium_public_key)
    }

    /// RSA signature over the challenge's UTF-8 bytes
    pub fn sign_classical(&self, challenge: &str) -> Vec<u8> {
        self.rsa_key.sign(challenge.as_bytes()).to_vec()
    }

    /// Dilithium signature over the challenge's UTF-8 bytes
    pub fn sign_post_quantum(&self, challenge: &str) -> Vec<u8> {
        self.dilithium_key.sign(challenge.as_bytes())
    }

    /// Sign a challenge with both keys
    pub fn sign_challenge(&self, challenge: &str) -> SignatureProof {
        SignatureProof {
            challenge: challenge.to_string(),
            classical_signature: encoding::encode(&self.sign_classical(challenge)),
            pq_signature: encoding::encode(&self.sign_post_quantum(challenge)),
        }
    }

    /// Answer an enrollment challenge
    pub fn enrollment_response(&self, username: &str, challenge: &str) -> EnrollmentResponse {
        let proof = self.sign_challenge(challenge);
        EnrollmentResponse {
            username: username.to_string(),
            classical_public_key: self.classical_public_key_b64(),
            pq_public_key: self.pq_public_key_b64(),
            classical_signature: proof.classical_signature,
            pq_signature: proof.pq_signature,
            challenge: Some(proof.challenge),
        }
    }

    /// Answer a login challenge
    pub fn login_response(&self, username: &str, challenge: &str) -> LoginResponse {
        let proof = self.sign_challenge(challenge);
        LoginResponse {
            username: username.to_string(),
            classical_signature: proof.classical_signature,
            pq_signature: proof.pq_signature,
            challenge: Some(proof.challenge),
        }
    }
}

impl fmt::Debug for HybridSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HybridSigner")
            .field("classical", &encoding::fingerprint(&self.rsa_public_key))
            .field("post_quantum", &encoding::fingerprint(&self.dilithium_public_key))
            .field("level", &self.level)
            .finish()
    }
}
