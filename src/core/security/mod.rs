/*!
Security utilities for hybrid authentication.
*/

// Constant-time operations to prevent timing attacks
pub mod constant_time;

pub use constant_time::constant_time_eq;
