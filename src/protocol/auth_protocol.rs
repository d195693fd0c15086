/*!
Hybrid enrollment and login.

An identity enrolls an RSA key and a Dilithium key by signing a fresh
challenge with both. Logging in later means signing a new challenge with
both private keys; the identity is authenticated only when both signatures
verify against the enrolled pair.

Login failures are deliberately indistinguishable to the caller: every one
surfaces as [`Error::Authentication`], whose display is the same string
regardless of cause. The precise reason stays in the error source and in
the `warn` log line.
*/

use std::sync::Arc;

use crate::core::challenge::{Challenge, ChallengeStore, Purpose};
use crate::core::clock::Clock;
use crate::core::crypto::{encoding, SignatureAlgorithm, SignatureVerifier};
use crate::core::error::{AuthError, EnrollmentError, Error, RegistryError, Result, StorageError};
use crate::core::registry::{CredentialPair, CredentialRegistry, Identity, IdentityId, IdentityStore};
use crate::protocol::messages::{ChallengeGrant, EnrollmentResponse, LoginResponse};
use crate::protocol::state::Flow;
use crate::{auth_err, enroll_err};

/// Enrollment and login over injected stores and verifier
#[derive(Clone)]
pub struct AuthProtocol {
    identities: Arc<dyn IdentityStore>,
    registry: CredentialRegistry,
    challenges: Arc<dyn ChallengeStore>,
    verifier: SignatureVerifier,
    clock: Arc<dyn Clock>,
}

impl AuthProtocol {
    /// Assemble a protocol from its collaborators.
    ///
    /// Most callers want [`AuthProtocolBuilder`](crate::protocol::builder::AuthProtocolBuilder).
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        registry: CredentialRegistry,
        challenges: Arc<dyn ChallengeStore>,
        verifier: SignatureVerifier,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            identities,
            registry,
            challenges,
            verifier,
            clock,
        }
    }

    /// The signature verifier
    pub fn verifier(&self) -> &SignatureVerifier {
        &self.verifier
    }

    /// The credential registry
    pub fn registry(&self) -> &CredentialRegistry {
        &self.registry
    }

    /// Begin enrollment for `username`, creating the identity on first use
    pub fn start_enroll(&self, username: &str, email: Option<&str>) -> Result<ChallengeGrant> {
        let identity = self.find_or_create(username, email)?;
        let challenge = self.challenges.issue(identity.id, Purpose::Enroll)?;

        log::info!("Enrollment started for '{}' (identity {})", username, identity.id);
        Ok(self.grant(&challenge))
    }

    /// Complete enrollment.
    ///
    /// The credential pair is stored only after both signatures verified
    /// over the consumed challenge; on any failure nothing is stored.
    pub fn finish_enroll(&self, response: &EnrollmentResponse) -> Result<CredentialPair> {
        let mut flow = Flow::new(Purpose::Enroll);

        let result = self.run_enroll(response, &mut flow);
        if let Err(e) = &result {
            flow.reject();
            log::warn!("Enrollment rejected for '{}': {}", response.username, e);
        }
        result
    }

    /// Begin login; the identity must exist and be enrolled
    pub fn start_login(&self, username: &str) -> Result<ChallengeGrant> {
        let identity = match self.identities.find_by_username(username)? {
            Some(identity) => identity,
            None => {
                log::warn!("Login start rejected for '{}': unknown identity", username);
                return auth_err!(AuthError::UnknownIdentity);
            }
        };

        if !self.registry.is_enrolled(identity.id)? {
            log::warn!("Login start rejected for '{}': not enrolled", username);
            return auth_err!(AuthError::NotEnrolled);
        }

        let challenge = self.challenges.issue(identity.id, Purpose::Login)?;

        log::info!("Login started for '{}'", username);
        Ok(self.grant(&challenge))
    }

    /// Complete login, returning the authenticated identity.
    ///
    /// Signatures that are not valid base64 are a malformed request and are
    /// reported before any lookup. Everything after that fails as an opaque
    /// [`Error::Authentication`].
    ///
    /// Response time is not equalised across failure paths. `start_login`
    /// already refuses unknown identities, so throttling enumeration belongs
    /// to the layer that fronts both calls.
    pub fn finish_login(&self, response: &LoginResponse) -> Result<Identity> {
        let classical_signature = encoding::decode_signature(&response.classical_signature)?;
        let pq_signature = encoding::decode_signature(&response.pq_signature)?;

        let mut flow = Flow::new(Purpose::Login);

        let result = self.run_login(response, &classical_signature, &pq_signature, &mut flow);
        if let Err(e) = &result {
            flow.reject();
            match e {
                Error::Authentication(detail) => {
                    log::warn!("Login rejected for '{}': {}", response.username, detail)
                }
                other => log::warn!("Login failed for '{}': {}", response.username, other),
            }
        }
        result
    }

    /// Look up an identity and its enrolled pair by id
    pub fn enrolled_identity(&self, id: IdentityId) -> Result<(Identity, CredentialPair)> {
        let identity = match self.identities.find(id)? {
            Some(identity) => identity,
            None => return auth_err!(AuthError::UnknownIdentity),
        };

        match self.registry.lookup(id) {
            Ok(pair) => Ok((identity, pair)),
            Err(Error::Registry(RegistryError::NotEnrolled)) => auth_err!(AuthError::NotEnrolled),
            Err(e) => Err(e),
        }
    }

    fn run_enroll(&self, response: &EnrollmentResponse, flow: &mut Flow) -> Result<CredentialPair> {
        let identity = match self.identities.find_by_username(&response.username)? {
            Some(identity) => identity,
            None => return enroll_err!(EnrollmentError::UnknownIdentity),
        };

        let challenge = self
            .consume(identity.id, Purpose::Enroll, response.challenge.as_deref())
            .map_err(|e| match e {
                Error::Challenge(c) => Error::Enrollment(EnrollmentError::ChallengeInvalid(c)),
                other => other,
            })?;
        flow.transition_to_challenge_consumed()?;

        if self.registry.is_enrolled(identity.id)? {
            return enroll_err!(EnrollmentError::AlreadyEnrolled);
        }

        let classical = self
            .verifier
            .decode_public_key(SignatureAlgorithm::Classical, &response.classical_public_key)?;
        let post_quantum = self
            .verifier
            .decode_public_key(SignatureAlgorithm::PostQuantum, &response.pq_public_key)?;
        log::debug!(
            "Enrollment keys for '{}': classical {}, post-quantum {}",
            response.username,
            classical.fingerprint(),
            post_quantum.fingerprint()
        );

        let classical_signature = encoding::decode_signature(&response.classical_signature)?;
        let pq_signature = encoding::decode_signature(&response.pq_signature)?;

        let classical_ok = self.verifier.verify(
            SignatureAlgorithm::Classical,
            classical.as_bytes(),
            challenge.message(),
            &classical_signature,
        )?;
        let pq_ok = self.verifier.verify(
            SignatureAlgorithm::PostQuantum,
            post_quantum.as_bytes(),
            challenge.message(),
            &pq_signature,
        )?;

        if !(classical_ok && pq_ok) {
            log::debug!(
                "Enrollment signatures for '{}': classical={}, post-quantum={}",
                response.username,
                classical_ok,
                pq_ok
            );
            return enroll_err!(EnrollmentError::VerificationFailed);
        }
        flow.transition_to_verified()?;

        let pair = self
            .registry
            .enroll(identity.id, classical, post_quantum, self.clock.now())
            .map_err(|e| match e {
                Error::Registry(RegistryError::AlreadyEnrolled) => {
                    Error::Enrollment(EnrollmentError::AlreadyEnrolled)
                }
                other => other,
            })?;
        flow.transition_to_completed()?;

        log::info!("Enrollment completed for '{}'", response.username);
        Ok(pair)
    }

    fn run_login(
        &self,
        response: &LoginResponse,
        classical_signature: &[u8],
        pq_signature: &[u8],
        flow: &mut Flow,
    ) -> Result<Identity> {
        let identity = match self.identities.find_by_username(&response.username)? {
            Some(identity) => identity,
            None => return auth_err!(AuthError::UnknownIdentity),
        };

        let pair = match self.registry.lookup(identity.id) {
            Ok(pair) => pair,
            Err(Error::Registry(RegistryError::NotEnrolled)) => return auth_err!(AuthError::NotEnrolled),
            Err(e) => return Err(e),
        };

        let challenge = self
            .consume(identity.id, Purpose::Login, response.challenge.as_deref())
            .map_err(|e| match e {
                Error::Challenge(c) => Error::Authentication(AuthError::Challenge(c)),
                other => other,
            })?;
        flow.transition_to_challenge_consumed()?;

        let classical_ok = self.verify_login_signature(
            SignatureAlgorithm::Classical,
            &pair.classical_public_key,
            &challenge,
            classical_signature,
        )?;
        let pq_ok = self.verify_login_signature(
            SignatureAlgorithm::PostQuantum,
            &pair.pq_public_key,
            &challenge,
            pq_signature,
        )?;

        if !(classical_ok && pq_ok) {
            log::debug!(
                "Login signatures for '{}': classical={}, post-quantum={}",
                response.username,
                classical_ok,
                pq_ok
            );
            return auth_err!(AuthError::VerificationFailed);
        }
        flow.transition_to_verified()?;
        flow.transition_to_completed()?;

        log::info!("Login completed for '{}'", response.username);
        Ok(identity)
    }

    // A signature the backend cannot parse counts as a failed verification.
    fn verify_login_signature(
        &self,
        algorithm: SignatureAlgorithm,
        public_key: &[u8],
        challenge: &Challenge,
        signature: &[u8],
    ) -> Result<bool> {
        match self.verifier.verify(algorithm, public_key, challenge.message(), signature) {
            Ok(valid) => Ok(valid),
            Err(e) if e.is_malformed() => {
                log::debug!("{} login signature unusable: {}", algorithm, e);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn consume(&self, owner: IdentityId, purpose: Purpose, presented: Option<&str>) -> Result<Challenge> {
        match presented {
            Some(value) => self.challenges.consume(owner, purpose, value),
            None => self.challenges.consume_current(owner, purpose),
        }
    }

    fn find_or_create(&self, username: &str, email: Option<&str>) -> Result<Identity> {
        if let Some(identity) = self.identities.find_by_username(username)? {
            return Ok(identity);
        }

        match self.identities.create(username, email, self.clock.now()) {
            Ok(identity) => Ok(identity),
            // Lost a creation race; the winner's identity is the one to use
            Err(Error::Storage(StorageError::Conflict(_))) => self
                .identities
                .find_by_username(username)?
                .ok_or_else(|| Error::Internal(format!("identity '{}' missing after conflict", username))),
            Err(e) => Err(e),
        }
    }

    fn grant(&self, challenge: &Challenge) -> ChallengeGrant {
        ChallengeGrant {
            challenge: challenge.value.clone(),
            identity_id: challenge.owner,
            expires_at: challenge.expires_at(self.challenges.ttl()),
        }
    }
}
