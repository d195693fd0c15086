/*!
Constants for hybrid authentication.

This module contains challenge sizing, key and signature sizes, and
configuration defaults.
*/

use std::time::Duration;

/// Minimum random bytes behind a challenge value (256 bits)
pub const MIN_CHALLENGE_BYTES: usize = 32;

/// Size constants for the supported algorithms
pub mod sizes {
    /// CRYSTALS-Dilithium constants
    pub mod dilithium {
        /// Size of Dilithium2 public key in bytes
        pub const PUBLIC_KEY_BYTES_2: usize = 1312;

        /// Size of Dilithium2 signature in bytes
        pub const SIGNATURE_BYTES_2: usize = 2420;

        /// Size of Dilithium3 public key in bytes
        pub const PUBLIC_KEY_BYTES: usize = 1952;

        /// Size of Dilithium3 signature in bytes
        pub const SIGNATURE_BYTES: usize = 3293;

        /// Size of Dilithium5 public key in bytes
        pub const PUBLIC_KEY_BYTES_5: usize = 2592;

        /// Size of Dilithium5 signature in bytes
        pub const SIGNATURE_BYTES_5: usize = 4595;
    }

    /// RSA constants
    pub mod rsa {
        /// Smallest modulus accepted by any configuration
        pub const MIN_MODULUS_BITS: usize = 2048;

        /// Modulus size generated by the client signer
        pub const CLIENT_MODULUS_BITS: usize = 3072;
    }

    /// Bytes of a key fingerprint written to logs
    pub const FINGERPRINT_BYTES: usize = 8;
}

/// Configuration defaults
pub mod defaults {
    use super::Duration;

    /// Default challenge lifetime
    pub const CHALLENGE_TTL: Duration = Duration::from_secs(300); // 5 minutes

    /// Default session token lifetime
    pub const SESSION_TTL: Duration = Duration::from_secs(3600); // 1 hour

    /// Random bytes behind a session token
    pub const SESSION_TOKEN_BYTES: usize = 32;
}
