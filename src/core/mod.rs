//! Core components for hybrid authentication.
//!
//! This module contains the building blocks the protocol is assembled from:
//! signature verification, challenges, the credential registry, sessions,
//! configuration, and error handling.

// Signature verification
pub mod crypto;

// Single-use challenges
pub mod challenge;

// Identities and credential pairs
pub mod registry;

// Session tokens and the authenticated context
pub mod session;

// Security utilities
pub mod security;

// Time source
pub mod clock;

// Configuration
pub mod config;

// Protocol constants
pub mod constants;

// Error handling
pub mod error;

// Re-exports for convenience
pub use self::error::{AuthError, ChallengeError, CryptoError, EnrollmentError, Error, Result};
pub use self::challenge::{Challenge, ChallengeStore, MemoryChallengeStore, Purpose};
pub use self::registry::{CredentialPair, CredentialRegistry, Identity, IdentityId, MemoryStore};
pub use self::session::{AuthContext, MemorySessionIssuer, SessionIssuer, SessionToken};
pub use self::clock::{Clock, ManualClock, SystemClock};
pub use self::config::AuthConfig;
