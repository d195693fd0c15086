//! The authenticated principal of a request.

use std::time::SystemTime;

use crate::core::registry::types::{Identity, IdentityId};

/// Who a request is acting as.
///
/// Produced by validating a session token and handed explicitly to
/// operations that need an authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct AuthContext {
    /// Authenticated identity
    pub identity_id: IdentityId,
    /// Username of the authenticated identity
    pub username: String,
    /// When the backing session expires
    pub expires_at: SystemTime,
}

impl AuthContext {
    /// Context for `identity` valid until `expires_at`
    pub fn new(identity: &Identity, expires_at: SystemTime) -> Self {
        Self {
            identity_id: identity.id,
            username: identity.username.clone(),
            expires_at,
        }
    }
}
