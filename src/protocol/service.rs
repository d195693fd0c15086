/*!
Transport-facing authentication service.

Wraps [`AuthProtocol`] with the shape a request handler wants: base64
strings in, a [`FinishResult`] out, and a session token on success.
Rejections are ordinary results; only structural problems (malformed input,
storage, internal faults) are errors.
*/

use std::sync::Arc;

use crate::core::crypto::encoding;
use crate::core::error::{Error, Result};
use crate::core::session::{AuthContext, SessionIssuer};
use crate::protocol::auth_protocol::AuthProtocol;
use crate::protocol::messages::{
    ChallengeGrant, EnrollmentResponse, FinishResult, LoginResponse, UserCredentials,
};

/// Reason reported for every failed login
pub const LOGIN_FAILURE_REASON: &str = "authentication failed";

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    protocol: AuthProtocol,
    sessions: Arc<dyn SessionIssuer>,
}

impl AuthService {
    /// Create a service over a protocol and a session issuer
    pub fn new(protocol: AuthProtocol, sessions: Arc<dyn SessionIssuer>) -> Self {
        Self { protocol, sessions }
    }

    /// The underlying protocol
    pub fn protocol(&self) -> &AuthProtocol {
        &self.protocol
    }

    /// Begin enrollment
    pub fn start_enroll(&self, username: &str, email: Option<&str>) -> Result<ChallengeGrant> {
        self.protocol.start_enroll(username, email)
    }

    /// Complete enrollment from base64 keys and signatures
    pub fn finish_enroll(
        &self,
        username: &str,
        classical_public_key: &str,
        pq_public_key: &str,
        classical_signature: &str,
        pq_signature: &str,
    ) -> Result<FinishResult> {
        self.finish_enroll_response(&EnrollmentResponse {
            username: username.to_string(),
            classical_public_key: classical_public_key.to_string(),
            pq_public_key: pq_public_key.to_string(),
            classical_signature: classical_signature.to_string(),
            pq_signature: pq_signature.to_string(),
            challenge: None,
        })
    }

    /// Complete enrollment from a full response
    pub fn finish_enroll_response(&self, response: &EnrollmentResponse) -> Result<FinishResult> {
        let pair = match self.protocol.finish_enroll(response) {
            Ok(pair) => pair,
            Err(Error::Enrollment(reason)) => return Ok(FinishResult::rejected(reason.to_string())),
            Err(e) => return Err(e),
        };

        let (identity, _) = self.protocol.enrolled_identity(pair.owner)?;
        let session = self.sessions.issue(&identity)?;
        Ok(FinishResult::success(session))
    }

    /// Begin login
    pub fn start_login(&self, username: &str) -> Result<ChallengeGrant> {
        self.protocol.start_login(username)
    }

    /// Complete login from base64 signatures
    pub fn finish_login(
        &self,
        username: &str,
        classical_signature: &str,
        pq_signature: &str,
    ) -> Result<FinishResult> {
        self.finish_login_response(&LoginResponse {
            username: username.to_string(),
            classical_signature: classical_signature.to_string(),
            pq_signature: pq_signature.to_string(),
            challenge: None,
        })
    }

    /// Complete login from a full response
    pub fn finish_login_response(&self, response: &LoginResponse) -> Result<FinishResult> {
        match self.protocol.finish_login(response) {
            Ok(identity) => Ok(FinishResult::success(self.sessions.issue(&identity)?)),
            Err(Error::Authentication(_)) => Ok(FinishResult::rejected(LOGIN_FAILURE_REASON)),
            Err(e) => Err(e),
        }
    }

    /// Resolve a session token
    pub fn authenticate_token(&self, token: &str) -> Result<AuthContext> {
        self.sessions.validate(token)
    }

    /// End a session
    pub fn logout(&self, token: &str) -> Result<()> {
        self.sessions.revoke(token)
    }

    /// Public credentials of the authenticated caller
    pub fn user_credentials(&self, context: &AuthContext) -> Result<UserCredentials> {
        let (identity, pair) = self.protocol.enrolled_identity(context.identity_id)?;

        Ok(UserCredentials {
            username: identity.username,
            email: identity.email,
            classical_public_key: encoding::encode(&pair.classical_public_key),
            pq_public_key: encoding::encode(&pair.pq_public_key),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::config::AuthConfig;
    use crate::core::error::AuthError;
    use crate::core::session::MemorySessionIssuer;
    use crate::protocol::auth_protocol::tests::{fixture, FakeClient, Fixture};

    fn service() -> (AuthService, ManualClock) {
        let Fixture { protocol, clock, .. } = fixture();
        let sessions = MemorySessionIssuer::with_clock(&AuthConfig::default(), Arc::new(clock.clone()));
        (AuthService::new(protocol, Arc::new(sessions)), clock)
    }

    fn enroll(service: &AuthService, client: &FakeClient, username: &str) -> Result<FinishResult> {
        let grant = service.start_enroll(username, Some("user@example.com"))?;
        service.finish_enroll(
            username,
            &client.classical_public_key(),
            &client.pq_public_key(),
            &client.classical_signature(&grant.challenge),
            &client.pq_signature(&grant.challenge),
        )
    }

    #[test]
    fn test_enroll_issues_session() -> Result<()> {
        let (service, _) = service();
        let client = FakeClient::new(b"alice");

        let result = enroll(&service, &client, "alice")?;
        assert!(result.ok);
        assert!(result.reason.is_none());

        let token = result.session.expect("session on success");
        let context = service.authenticate_token(&token.token)?;
        assert_eq!(context.username, "alice");
        Ok(())
    }

    #[test]
    fn test_enroll_rejection_is_result() -> Result<()> {
        let (service, _) = service();
        let client = FakeClient::new(b"alice");
        enroll(&service, &client, "alice")?;

        let result = enroll(&service, &client, "alice")?;
        assert!(!result.ok);
        assert_eq!(result.reason.as_deref(), Some("Identity is already enrolled"));
        assert!(result.session.is_none());
        Ok(())
    }

    #[test]
    fn test_enroll_malformed_key_is_error() -> Result<()> {
        let (service, _) = service();
        let client = FakeClient::new(b"alice");
        let grant = service.start_enroll("alice", None)?;

        let result = service.finish_enroll(
            "alice",
            "***",
            &client.pq_public_key(),
            &client.classical_signature(&grant.challenge),
            &client.pq_signature(&grant.challenge),
        );
        assert!(result.is_err_and(|e| e.is_malformed()));
        Ok(())
    }

    #[test]
    fn test_login_reason_is_uniform() -> Result<()> {
        let (service, _) = service();
        let client = FakeClient::new(b"alice");
        enroll(&service, &client, "alice")?;

        let grant = service.start_login("alice")?;
        let wrong = service.finish_login("alice", &client.classical_signature(&grant.challenge), &client.pq_signature("x"))?;
        let unknown = service.finish_login("nobody", &client.classical_signature("x"), &client.pq_signature("x"))?;

        for result in [wrong, unknown] {
            assert!(!result.ok);
            assert_eq!(result.reason.as_deref(), Some(LOGIN_FAILURE_REASON));
        }
        Ok(())
    }

    #[test]
    fn test_login_and_user_credentials() -> Result<()> {
        let (service, _) = service();
        let client = FakeClient::new(b"alice");
        enroll(&service, &client, "alice")?;

        let grant = service.start_login("alice")?;
        let result = service.finish_login(
            "alice",
            &client.classical_signature(&grant.challenge),
            &client.pq_signature(&grant.challenge),
        )?;
        assert!(result.ok);

        let token = result.session.expect("session on success");
        let context = service.authenticate_token(&token.token)?;
        let credentials = service.user_credentials(&context)?;

        assert_eq!(credentials.username, "alice");
        assert_eq!(credentials.email.as_deref(), Some("user@example.com"));
        assert_eq!(credentials.classical_public_key, client.classical_public_key());
        assert_eq!(credentials.pq_public_key, client.pq_public_key());
        Ok(())
    }

    #[test]
    fn test_logout_and_expiry() -> Result<()> {
        let (service, clock) = service();
        let client = FakeClient::new(b"alice");

        let first = enroll(&service, &client, "alice")?.session.expect("session");
        service.logout(&first.token)?;
        assert!(matches!(
            service.authenticate_token(&first.token),
            Err(Error::Authentication(AuthError::InvalidSession))
        ));

        let grant = service.start_login("alice")?;
        let second = service
            .finish_login("alice", &client.classical_signature(&grant.challenge), &client.pq_signature(&grant.challenge))?
            .session
            .expect("session");

        clock.advance(AuthConfig::default().session_ttl * 2);
        assert!(service.authenticate_token(&second.token).is_err());
        Ok(())
    }
}
