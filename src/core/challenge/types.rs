//! Challenge records.

use std::fmt;
use std::time::{Duration, SystemTime};

use crate::core::registry::types::IdentityId;

/// What a challenge may be used for.
///
/// Enrollment and login challenges live in separate namespaces per identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum Purpose {
    /// Binding a new credential pair
    Enroll,
    /// Proving possession of an enrolled pair
    Login,
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Purpose::Enroll => write!(f, "Enroll"),
            Purpose::Login => write!(f, "Login"),
        }
    }
}

/// A single-use challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    /// Random value, base64url without padding
    pub value: String,
    /// Identity the challenge was issued to
    pub owner: IdentityId,
    /// Enroll or login
    pub purpose: Purpose,
    /// Issue time
    pub issued_at: SystemTime,
    /// Whether the challenge was used
    pub consumed: bool,
}

impl Challenge {
    /// The exact bytes both signatures must cover
    pub fn message(&self) -> &[u8] {
        self.value.as_bytes()
    }

    /// When the challenge stops being consumable
    pub fn expires_at(&self, ttl: Duration) -> SystemTime {
        self.issued_at + ttl
    }
}
