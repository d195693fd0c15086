/*!
Builder for authentication protocol instances.

Every collaborator can be injected; anything left unset falls back to the
in-memory implementations and the RSA and Dilithium backends selected by
the configuration.
*/

use std::sync::Arc;
use std::time::Duration;

use crate::core::{
    challenge::{ChallengeStore, MemoryChallengeStore},
    clock::{Clock, SystemClock},
    config::AuthConfig,
    crypto::{algorithms::create_backend, DilithiumLevel, SignatureAlgorithm, SignatureBackend, SignatureVerifier},
    error::Result,
    registry::{CredentialRegistry, CredentialStore, IdentityStore, MemoryStore},
    session::{MemorySessionIssuer, SessionIssuer},
};
use crate::protocol::auth_protocol::AuthProtocol;
use crate::protocol::service::AuthService;

#[cfg(feature = "async")]
use crate::protocol::async_service::AsyncAuthService;

/// Builder for [`AuthProtocol`] and [`AuthService`]
#[derive(Default)]
pub struct AuthProtocolBuilder {
    config: AuthConfig,
    clock: Option<Arc<dyn Clock>>,
    identities: Option<Arc<dyn IdentityStore>>,
    credentials: Option<Arc<dyn CredentialStore>>,
    challenges: Option<Arc<dyn ChallengeStore>>,
    classical: Option<Arc<dyn SignatureBackend>>,
    post_quantum: Option<Arc<dyn SignatureBackend>>,
    sessions: Option<Arc<dyn SessionIssuer>>,
}

impl AuthProtocolBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: AuthConfig) -> Self {
        self.config = config;
        self
    }

    /// Use the strict preset
    pub fn strict(mut self) -> Self {
        self.config = AuthConfig::strict();
        self
    }

    /// Set the challenge lifetime
    pub fn with_challenge_ttl(mut self, ttl: Duration) -> Self {
        self.config.challenge_ttl = ttl;
        self
    }

    /// Set the session lifetime
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.config.session_ttl = ttl;
        self
    }

    /// Use a specific Dilithium parameter set
    pub fn with_dilithium(mut self, level: DilithiumLevel) -> Self {
        self.config.dilithium = level;
        self
    }

    /// Use a specific time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Use one store for both identities and credentials
    pub fn with_store<S>(mut self, store: Arc<S>) -> Self
    where
        S: IdentityStore + CredentialStore + 'static,
    {
        self.identities = Some(store.clone());
        self.credentials = Some(store);
        self
    }

    /// Use a specific identity store
    pub fn with_identity_store(mut self, store: Arc<dyn IdentityStore>) -> Self {
        self.identities = Some(store);
        self
    }

    /// Use a specific credential store
    pub fn with_credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(store);
        self
    }

    /// Use a specific challenge store
    pub fn with_challenge_store(mut self, store: Arc<dyn ChallengeStore>) -> Self {
        self.challenges = Some(store);
        self
    }

    /// Use a specific classical verification backend
    pub fn with_classical_backend(mut self, backend: Arc<dyn SignatureBackend>) -> Self {
        self.classical = Some(backend);
        self
    }

    /// Use a specific post-quantum verification backend
    pub fn with_post_quantum_backend(mut self, backend: Arc<dyn SignatureBackend>) -> Self {
        self.post_quantum = Some(backend);
        self
    }

    /// Use a specific session issuer
    pub fn with_session_issuer(mut self, sessions: Arc<dyn SessionIssuer>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    /// The configuration being built
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Build the protocol
    pub fn build_protocol(self) -> Result<AuthProtocol> {
        self.config.validate()?;

        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock),
        };

        let (identities, credentials) = match (self.identities, self.credentials) {
            (Some(identities), Some(credentials)) => (identities, credentials),
            (Some(identities), None) => (identities, Arc::new(MemoryStore::new()) as Arc<dyn CredentialStore>),
            (None, Some(credentials)) => (Arc::new(MemoryStore::new()) as Arc<dyn IdentityStore>, credentials),
            (None, None) => {
                let store = Arc::new(MemoryStore::new());
                (store.clone() as Arc<dyn IdentityStore>, store as Arc<dyn CredentialStore>)
            }
        };

        let challenges: Arc<dyn ChallengeStore> = match self.challenges {
            Some(challenges) => challenges,
            None => Arc::new(MemoryChallengeStore::with_clock(&self.config, clock.clone())),
        };

        let classical: Arc<dyn SignatureBackend> = match self.classical {
            Some(backend) => backend,
            None => Arc::from(create_backend(SignatureAlgorithm::Classical, &self.config)),
        };
        let post_quantum: Arc<dyn SignatureBackend> = match self.post_quantum {
            Some(backend) => backend,
            None => Arc::from(create_backend(SignatureAlgorithm::PostQuantum, &self.config)),
        };
        let verifier = SignatureVerifier::new(classical, post_quantum)?;

        Ok(AuthProtocol::new(
            identities,
            CredentialRegistry::new(credentials),
            challenges,
            verifier,
            clock,
        ))
    }

    /// Build the service, with a session issuer
    pub fn build_service(mut self) -> Result<AuthService> {
        let sessions: Arc<dyn SessionIssuer> = match (self.sessions.take(), &self.clock) {
            (Some(sessions), _) => sessions,
            (None, Some(clock)) => Arc::new(MemorySessionIssuer::with_clock(&self.config, clock.clone())),
            (None, None) => Arc::new(MemorySessionIssuer::new(&self.config)),
        };

        let protocol = self.build_protocol()?;
        Ok(AuthService::new(protocol, sessions))
    }

    /// Build the asynchronous service (requires "async" feature)
    #[cfg(feature = "async")]
    pub fn build_async_service(self) -> Result<AsyncAuthService> {
        Ok(AsyncAuthService::new(self.build_service()?))
    }
}

// Convenience functions

/// Create a service with default settings
pub fn service() -> Result<AuthService> {
    AuthProtocolBuilder::new().build_service()
}

#[cfg(feature = "async")]
/// Create an async service with default settings
pub fn async_service() -> Result<AsyncAuthService> {
    AuthProtocolBuilder::new().build_async_service()
}
