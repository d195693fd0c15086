/*!
Session tokens minted after a successful enrollment or login.

Tokens are random bearer strings. Only their SHA-256 digest is kept
server-side, so a leaked session table does not leak usable tokens.
*/

use parking_lot::RwLock;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::auth_err;
use crate::core::clock::{is_older_than, Clock, SystemClock};
use crate::core::config::AuthConfig;
use crate::core::constants::defaults::SESSION_TOKEN_BYTES;
use crate::core::crypto::encoding;
use crate::core::error::{AuthError, Result};
use crate::core::registry::types::Identity;
use crate::core::session::context::AuthContext;

/// A bearer token handed to the caller
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionToken {
    /// Opaque token value, base64url without padding
    pub token: String,
    /// When the token stops being accepted
    pub expires_at: SystemTime,
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Mints and validates session tokens
pub trait SessionIssuer: Send + Sync {
    /// Mint a token for `identity`
    fn issue(&self, identity: &Identity) -> Result<SessionToken>;

    /// Resolve a token to its context; unknown or expired tokens fail with
    /// `AuthError::InvalidSession`.
    fn validate(&self, token: &str) -> Result<AuthContext>;

    /// Forget a token
    fn revoke(&self, token: &str) -> Result<()>;
}

struct SessionRecord {
    context: AuthContext,
    issued_at: SystemTime,
}

/// In-memory session issuer.
///
/// Expired records are swept on every `issue`, so the table never outgrows
/// the sessions minted within one TTL.
pub struct MemorySessionIssuer {
    sessions: RwLock<HashMap<Vec<u8>, SessionRecord>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl MemorySessionIssuer {
    /// Create an issuer with the system clock
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create an issuer reading time from `clock`
    pub fn with_clock(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            clock,
            ttl: config.session_ttl,
        }
    }

    /// Drop expired sessions, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.write();
        let removed = Self::sweep(&mut sessions, now, self.ttl);
        if removed > 0 {
            log::debug!("Purged {} expired sessions", removed);
        }
        removed
    }

    /// Number of live or not-yet-purged sessions
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Whether no session is held
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    fn sweep(sessions: &mut HashMap<Vec<u8>, SessionRecord>, now: SystemTime, ttl: Duration) -> usize {
        let before = sessions.len();
        sessions.retain(|_, record| !is_older_than(record.issued_at, now, ttl));
        before - sessions.len()
    }

    fn digest(token: &str) -> Vec<u8> {
        Sha256::digest(token.as_bytes()).to_vec()
    }
}

impl SessionIssuer for MemorySessionIssuer {
    fn issue(&self, identity: &Identity) -> Result<SessionToken> {
        let mut bytes = [0u8; SESSION_TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        let token = encoding::encode_token(&bytes);

        let issued_at = self.clock.now();
        let expires_at = issued_at + self.ttl;

        let mut sessions = self.sessions.write();
        Self::sweep(&mut sessions, issued_at, self.ttl);
        sessions.insert(
            Self::digest(&token),
            SessionRecord {
                context: AuthContext::new(identity, expires_at),
                issued_at,
            },
        );

        Ok(SessionToken { token, expires_at })
    }

    fn validate(&self, token: &str) -> Result<AuthContext> {
        let key = Self::digest(token);
        let now = self.clock.now();

        {
            let sessions = self.sessions.read();
            match sessions.get(&key) {
                None => return auth_err!(AuthError::InvalidSession),
                Some(record) if !is_older_than(record.issued_at, now, self.ttl) => {
                    return Ok(record.context.clone());
                }
                Some(_) => {}
            }
        }

        self.sessions.write().remove(&key);
        log::debug!("Expired session dropped");
        auth_err!(AuthError::InvalidSession)
    }

    fn revoke(&self, token: &str) -> Result<()> {
        self.sessions.write().remove(&Self::digest(token));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::error::Error;
    use crate::core::registry::types::IdentityId;

    fn identity() -> Identity {
        Identity {
            id: IdentityId(3),
            username: "alice".into(),
            email: None,
            created_at: SystemTime::now(),
        }
    }

    fn issuer() -> (MemorySessionIssuer, ManualClock) {
        let clock = ManualClock::new();
        let issuer = MemorySessionIssuer::with_clock(&AuthConfig::default(), Arc::new(clock.clone()));
        (issuer, clock)
    }

    #[test]
    fn test_issue_and_validate() -> Result<()> {
        let (issuer, _) = issuer();
        let token = issuer.issue(&identity())?;

        let context = issuer.validate(&token.token)?;
        assert_eq!(context.identity_id, IdentityId(3));
        assert_eq!(context.username, "alice");
        assert_eq!(context.expires_at, token.expires_at);
        Ok(())
    }

    #[test]
    fn test_token_not_stored_in_clear() -> Result<()> {
        let (issuer, _) = issuer();
        let token = issuer.issue(&identity())?;

        let sessions = issuer.sessions.read();
        assert!(sessions.keys().all(|k| k.as_slice() != token.token.as_bytes()));
        assert!(!format!("{:?}", token).contains(&token.token));
        Ok(())
    }

    #[test]
    fn test_unknown_token_rejected() {
        let (issuer, _) = issuer();
        let result = issuer.validate("not-a-token");
        assert!(matches!(result, Err(Error::Authentication(AuthError::InvalidSession))));
    }

    #[test]
    fn test_expired_token_rejected() -> Result<()> {
        let (issuer, clock) = issuer();
        let token = issuer.issue(&identity())?;

        clock.advance(AuthConfig::default().session_ttl + Duration::from_secs(1));

        let result = issuer.validate(&token.token);
        assert!(matches!(result, Err(Error::Authentication(AuthError::InvalidSession))));
        assert!(issuer.is_empty());
        Ok(())
    }

    #[test]
    fn test_issue_sweeps_expired_sessions() -> Result<()> {
        let (issuer, clock) = issuer();
        for _ in 0..1000 {
            issuer.issue(&identity())?;
        }
        assert_eq!(issuer.len(), 1000);

        clock.advance(AuthConfig::default().session_ttl * 10);
        let fresh = issuer.issue(&identity())?;

        assert_eq!(issuer.len(), 1);
        assert!(issuer.validate(&fresh.token).is_ok());
        Ok(())
    }

    #[test]
    fn test_purge_expired() -> Result<()> {
        let (issuer, clock) = issuer();
        issuer.issue(&identity())?;
        issuer.issue(&identity())?;

        assert_eq!(issuer.purge_expired(), 0);
        clock.advance(AuthConfig::default().session_ttl + Duration::from_secs(1));
        assert_eq!(issuer.purge_expired(), 2);
        assert!(issuer.is_empty());
        Ok(())
    }

    #[test]
    fn test_revoke() -> Result<()> {
        let (issuer, _) = issuer();
        let token = issuer.issue(&identity())?;
        let other = issuer.issue(&identity())?;

        issuer.revoke(&token.token)?;

        assert!(issuer.validate(&token.token).is_err());
        assert!(issuer.validate(&other.token).is_ok());
        assert_eq!(issuer.len(), 1);
        Ok(())
    }
}
