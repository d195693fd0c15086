//! Client-side signing.

pub mod signer;

pub use signer::HybridSigner;
