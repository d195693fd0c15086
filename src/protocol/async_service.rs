/*!
Asynchronous authentication service.

RSA and Dilithium verification are CPU bound, so every operation runs on
tokio's blocking pool instead of the async executor.
*/

use crate::core::error::{Error, Result};
use crate::core::session::AuthContext;
use crate::protocol::messages::{ChallengeGrant, EnrollmentResponse, FinishResult, LoginResponse, UserCredentials};
use crate::protocol::service::AuthService;

/// Asynchronous wrapper around [`AuthService`]
#[derive(Clone)]
pub struct AsyncAuthService {
    inner: AuthService,
}

async fn run_blocking<T, F>(task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| Error::Internal(format!("blocking task failed: {}", e)))?
}

impl AsyncAuthService {
    /// Wrap a synchronous service
    pub fn new(inner: AuthService) -> Self {
        Self { inner }
    }

    /// The wrapped service
    pub fn inner(&self) -> &AuthService {
        &self.inner
    }

    /// Begin enrollment asynchronously
    pub async fn start_enroll(&self, username: &str, email: Option<&str>) -> Result<ChallengeGrant> {
        let service = self.inner.clone();
        let username = username.to_string();
        let email = email.map(str::to_string);
        run_blocking(move || service.start_enroll(&username, email.as_deref())).await
    }

    /// Complete enrollment asynchronously
    pub async fn finish_enroll(&self, response: EnrollmentResponse) -> Result<FinishResult> {
        let service = self.inner.clone();
        run_blocking(move || service.finish_enroll_response(&response)).await
    }

    /// Begin login asynchronously
    pub async fn start_login(&self, username: &str) -> Result<ChallengeGrant> {
        let service = self.inner.clone();
        let username = username.to_string();
        run_blocking(move || service.start_login(&username)).await
    }

    /// Complete login asynchronously
    pub async fn finish_login(&self, response: LoginResponse) -> Result<FinishResult> {
        let service = self.inner.clone();
        run_blocking(move || service.finish_login_response(&response)).await
    }

    /// Resolve a session token asynchronously
    pub async fn authenticate_token(&self, token: &str) -> Result<AuthContext> {
        let service = self.inner.clone();
        let token = token.to_string();
        run_blocking(move || service.authenticate_token(&token)).await
    }

    /// Revoke a session token asynchronously
    pub async fn logout(&self, token: &str) -> Result<()> {
        let service = self.inner.clone();
        let token = token.to_string();
        run_blocking(move || service.logout(&token)).await
    }

    /// Public credentials of the authenticated caller
    pub async fn user_credentials(&self, context: AuthContext) -> Result<UserCredentials> {
        let service = self.inner.clone();
        run_blocking(move || service.user_credentials(&context)).await
    }
}
