/*!
Cryptographic components for hybrid authentication.

This module provides signature verification for the two algorithm
families a credential pair combines: RSA (classical) and CRYSTALS-Dilithium
(post-quantum).
*/

// Algorithm backends
pub mod algorithms;

// Backend traits
pub mod traits;

// Algorithm types
pub mod types;

// Boundary encodings
pub mod encoding;

// Dual-family verifier
pub mod verifier;

// Re-export frequently used types
pub use algorithms::{DilithiumVerifier, RsaVerifier};
pub use traits::SignatureBackend;
pub use types::{DilithiumLevel, SignatureAlgorithm};
pub use verifier::{PublicKeyHandle, SignatureVerifier};
