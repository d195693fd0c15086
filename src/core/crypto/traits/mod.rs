/*!
Core traits for cryptographic operations.
*/

pub mod signature;

pub use signature::SignatureBackend;
