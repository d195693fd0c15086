/*!
Configuration for hybrid authentication.

This module provides the tunable parameters of the challenge lifecycle,
the accepted key strengths, and session lifetime, with presets in the same
spirit as the algorithm presets of a protocol configuration.
*/

use std::time::Duration;

use crate::core::constants::{defaults, sizes, MIN_CHALLENGE_BYTES};
use crate::core::crypto::types::algorithms::DilithiumLevel;
use crate::core::error::{Error, Result};

/// Authentication configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct AuthConfig {
    /// How long an issued challenge stays consumable
    pub challenge_ttl: Duration,
    /// Random bytes behind each challenge value
    pub challenge_bytes: usize,
    /// Smallest RSA modulus accepted at enrollment and login
    pub min_rsa_bits: usize,
    /// Dilithium parameter set used by the post-quantum backend
    pub dilithium: DilithiumLevel,
    /// Lifetime of session tokens minted after success
    pub session_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            challenge_ttl: defaults::CHALLENGE_TTL,
            challenge_bytes: MIN_CHALLENGE_BYTES,
            min_rsa_bits: sizes::rsa::MIN_MODULUS_BITS,
            dilithium: DilithiumLevel::default(),
            session_ttl: defaults::SESSION_TTL,
        }
    }
}

impl AuthConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with short windows and the strongest parameters
    pub fn strict() -> Self {
        Self {
            challenge_ttl: Duration::from_secs(60),
            challenge_bytes: 48,
            min_rsa_bits: sizes::rsa::CLIENT_MODULUS_BITS,
            dilithium: DilithiumLevel::Dilithium5,
            session_ttl: Duration::from_secs(15 * 60),
        }
    }

    /// Set the challenge lifetime
    pub fn with_challenge_ttl(mut self, ttl: Duration) -> Self {
        self.challenge_ttl = ttl;
        self
    }

    /// Set the session lifetime
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Set the Dilithium parameter set
    pub fn with_dilithium(mut self, level: DilithiumLevel) -> Self {
        self.dilithium = level;
        self
    }

    /// Set the smallest accepted RSA modulus
    pub fn with_min_rsa_bits(mut self, bits: usize) -> Self {
        self.min_rsa_bits = bits;
        self
    }

    /// Check the configuration for values that would weaken the protocol
    pub fn validate(&self) -> Result<()> {
        if self.challenge_bytes < MIN_CHALLENGE_BYTES {
            return Err(Error::Config(format!(
                "challenge_bytes must be at least {}, got {}",
                MIN_CHALLENGE_BYTES, self.challenge_bytes
            )));
        }
        if self.challenge_ttl.is_zero() {
            return Err(Error::Config("challenge_ttl must be non-zero".into()));
        }
        if self.session_ttl.is_zero() {
            return Err(Error::Config("session_ttl must be non-zero".into()));
        }
        if self.min_rsa_bits < sizes::rsa::MIN_MODULUS_BITS {
            return Err(Error::Config(format!(
                "min_rsa_bits must be at least {}, got {}",
                sizes::rsa::MIN_MODULUS_BITS, self.min_rsa_bits
            )));
        }
        Ok(())
    }
}
