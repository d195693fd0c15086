/*!
Credential registry.

Owns the lifecycle of credential pairs: at most one per identity, created
once, never updated.
*/

use std::sync::Arc;
use std::time::SystemTime;

use crate::core::crypto::verifier::PublicKeyHandle;
use crate::core::crypto::types::algorithms::SignatureAlgorithm;
use crate::core::error::{Error, RegistryError, Result, StorageError};
use crate::core::registry::store::CredentialStore;
use crate::core::registry::types::{CredentialPair, IdentityId};

/// Registry of enrolled credential pairs
#[derive(Clone)]
pub struct CredentialRegistry {
    store: Arc<dyn CredentialStore>,
}

impl CredentialRegistry {
    /// Create a registry over a credential store
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Register the pair for `owner`.
    ///
    /// Fails with `RegistryError::AlreadyEnrolled` if a pair exists, including
    /// when a concurrent enrollment won the insert.
    pub fn enroll(
        &self,
        owner: IdentityId,
        classical: PublicKeyHandle,
        post_quantum: PublicKeyHandle,
        enrolled_at: SystemTime,
    ) -> Result<CredentialPair> {
        if classical.algorithm() != SignatureAlgorithm::Classical
            || post_quantum.algorithm() != SignatureAlgorithm::PostQuantum
        {
            return Err(Error::Internal("credential keys registered in the wrong slots".into()));
        }

        if self.store.exists(owner)? {
            return Err(RegistryError::AlreadyEnrolled.into());
        }

        let pair = CredentialPair {
            owner,
            classical_public_key: classical.into_bytes(),
            pq_public_key: post_quantum.into_bytes(),
            enrolled_at,
        };

        match self.store.save(pair.clone()) {
            Ok(()) => {
                log::debug!("Credential pair stored for identity {}", owner);
                Ok(pair)
            }
            Err(Error::Storage(StorageError::Conflict(_))) => {
                log::warn!("Concurrent enrollment lost the insert for identity {}", owner);
                Err(RegistryError::AlreadyEnrolled.into())
            }
            Err(e) => Err(e),
        }
    }

    /// Look up the pair for `owner`
    pub fn lookup(&self, owner: IdentityId) -> Result<CredentialPair> {
        self.store.find(owner)?.ok_or(Error::Registry(RegistryError::NotEnrolled))
    }

    /// Whether `owner` has an enrolled pair
    pub fn is_enrolled(&self, owner: IdentityId) -> Result<bool> {
        self.store.exists(owner)
    }
}
