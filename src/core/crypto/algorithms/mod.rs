/*!
Cryptographic algorithm implementations.
*/

pub mod signatures;

pub use signatures::{create_backend, DilithiumVerifier, RsaVerifier};
