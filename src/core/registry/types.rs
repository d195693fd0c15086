//! Identity and credential records.

use std::fmt;
use std::time::SystemTime;

use crate::core::crypto::encoding;

/// Store-assigned identity number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct IdentityId(pub u64);

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A principal that can enroll and log in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Store-assigned id
    pub id: IdentityId,
    /// Unique, immutable username
    pub username: String,
    /// Contact address given at enrollment start
    pub email: Option<String>,
    /// When the identity was first created
    pub created_at: SystemTime,
}

/// The enrolled classical and post-quantum public keys of one identity.
///
/// Created only after both enrollment signatures verified; never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialPair {
    /// Identity the keys belong to
    pub owner: IdentityId,
    /// RSA public key (DER)
    pub classical_public_key: Vec<u8>,
    /// Dilithium public key (raw)
    pub pq_public_key: Vec<u8>,
    /// When the pair was registered
    pub enrolled_at: SystemTime,
}

impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("owner", &self.owner)
            .field("classical", &encoding::fingerprint(&self.classical_public_key))
            .field("post_quantum", &encoding::fingerprint(&self.pq_public_key))
            .field("enrolled_at", &self.enrolled_at)
            .finish()
    }
}
