/*!
Signature algorithm implementations.

This module provides the verification backends for both algorithm families.
*/

mod dilithium;
mod rsa;

pub use dilithium::DilithiumVerifier;
pub use self::rsa::RsaVerifier;

use crate::core::config::AuthConfig;
use crate::core::crypto::traits::signature::SignatureBackend;
use crate::core::crypto::types::algorithms::SignatureAlgorithm;

/// Create the production backend for an algorithm family
pub fn create_backend(algorithm: SignatureAlgorithm, config: &AuthConfig) -> Box<dyn SignatureBackend> {
    match algorithm {
        SignatureAlgorithm::Classical => Box::new(RsaVerifier::new(config.min_rsa_bits)),
        SignatureAlgorithm::PostQuantum => Box::new(DilithiumVerifier::new(config.dilithium)),
    }
}
