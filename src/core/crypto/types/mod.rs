/*!
Core types for cryptographic operations.
*/

pub mod algorithms;

pub use algorithms::{DilithiumLevel, SignatureAlgorithm};
