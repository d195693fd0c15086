/*!
Request and response types exchanged with the caller.

Keys and signatures are standard padded base64; challenge values are
base64url without padding and are signed as their UTF-8 bytes.
*/

use std::time::SystemTime;

use crate::core::registry::IdentityId;
use crate::core::session::SessionToken;

/// Challenge handed out by `start_enroll` and `start_login`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct ChallengeGrant {
    /// Value both signatures must cover
    pub challenge: String,
    /// Identity the challenge is bound to
    pub identity_id: IdentityId,
    /// When the challenge stops being accepted
    pub expires_at: SystemTime,
}

/// Client answer to an enrollment challenge
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct EnrollmentResponse {
    pub username: String,
    /// RSA public key, SPKI or PKCS#1 DER
    pub classical_public_key: String,
    /// Dilithium public key
    pub pq_public_key: String,
    pub classical_signature: String,
    pub pq_signature: String,
    /// Echo of the challenge; when absent the identity's current challenge is used
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub challenge: Option<String>,
}

/// Client answer to a login challenge
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct LoginResponse {
    pub username: String,
    pub classical_signature: String,
    pub pq_signature: String,
    /// Echo of the challenge; when absent the identity's current challenge is used
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub challenge: Option<String>,
}

/// Both signatures over one challenge
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct SignatureProof {
    pub challenge: String,
    pub classical_signature: String,
    pub pq_signature: String,
}

/// Outcome of a finish call at the service boundary
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct FinishResult {
    pub ok: bool,
    /// Why the flow was rejected
    #[cfg_attr(feature = "serde-support", serde(skip_serializing_if = "Option::is_none"))]
    pub reason: Option<String>,
    /// Session minted on success
    #[cfg_attr(feature = "serde-support", serde(skip_serializing_if = "Option::is_none"))]
    pub session: Option<SessionToken>,
}

impl FinishResult {
    /// A successful outcome carrying a session
    pub fn success(session: SessionToken) -> Self {
        Self {
            ok: true,
            reason: None,
            session: Some(session),
        }
    }

    /// A rejected outcome
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
            session: None,
        }
    }
}

/// Public view of an enrolled identity
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct UserCredentials {
    pub username: String,
    pub email: Option<String>,
    /// RSA public key, base64
    pub classical_public_key: String,
    /// Dilithium public key, base64
    pub pq_public_key: String,
}
