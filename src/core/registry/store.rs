/*!
Persistence collaborators for identities and credential pairs.

The traits describe what the authentication core needs from a backing
store. [`MemoryStore`] implements both and is suitable for tests and
single-process deployments.
*/

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use crate::core::error::{Result, StorageError};
use crate::core::registry::types::{CredentialPair, Identity, IdentityId};

/// Identity persistence.
///
/// Implementations must enforce username uniqueness.
pub trait IdentityStore: Send + Sync {
    /// Create an identity; fails with `StorageError::Conflict` if the
    /// username is taken.
    fn create(&self, username: &str, email: Option<&str>, created_at: SystemTime) -> Result<Identity>;

    /// Find an identity by username
    fn find_by_username(&self, username: &str) -> Result<Option<Identity>>;

    /// Find an identity by id
    fn find(&self, id: IdentityId) -> Result<Option<Identity>>;
}

/// Credential pair persistence.
///
/// `save` is insert-if-absent; at most one pair per owner.
pub trait CredentialStore: Send + Sync {
    /// Store a pair; fails with `StorageError::Conflict` if the owner
    /// already has one.
    fn save(&self, pair: CredentialPair) -> Result<()>;

    /// Find the pair for an owner
    fn find(&self, owner: IdentityId) -> Result<Option<CredentialPair>>;

    /// Whether an owner has a pair
    fn exists(&self, owner: IdentityId) -> Result<bool> {
        Ok(self.find(owner)?.is_some())
    }
}

#[derive(Default)]
struct Identities {
    by_id: HashMap<IdentityId, Identity>,
    by_username: HashMap<String, IdentityId>,
}

/// In-memory identity and credential store
#[derive(Default)]
pub struct MemoryStore {
    identities: RwLock<Identities>,
    credentials: RwLock<HashMap<IdentityId, CredentialPair>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identities
    pub fn identity_count(&self) -> usize {
        self.identities.read().by_id.len()
    }

    /// Number of enrolled credential pairs
    pub fn credential_count(&self) -> usize {
        self.credentials.read().len()
    }
}

impl IdentityStore for MemoryStore {
    fn create(&self, username: &str, email: Option<&str>, created_at: SystemTime) -> Result<Identity> {
        let mut identities = self.identities.write();
        if identities.by_username.contains_key(username) {
            return Err(StorageError::Conflict(format!("username '{}' is taken", username)).into());
        }

        let id = IdentityId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let identity = Identity {
            id,
            username: username.to_string(),
            email: email.map(str::to_string),
            created_at,
        };

        identities.by_username.insert(identity.username.clone(), id);
        identities.by_id.insert(id, identity.clone());
        Ok(identity)
    }

    fn find_by_username(&self, username: &str) -> Result<Option<Identity>> {
        let identities = self.identities.read();
        Ok(identities
            .by_username
            .get(username)
            .and_then(|id| identities.by_id.get(id))
            .cloned())
    }

    fn find(&self, id: IdentityId) -> Result<Option<Identity>> {
        Ok(self.identities.read().by_id.get(&id).cloned())
    }
}

impl CredentialStore for MemoryStore {
    fn save(&self, pair: CredentialPair) -> Result<()> {
        let mut credentials = self.credentials.write();
        if credentials.contains_key(&pair.owner) {
            return Err(StorageError::Conflict(format!("identity {} already has credentials", pair.owner)).into());
        }
        credentials.insert(pair.owner, pair);
        Ok(())
    }

    fn find(&self, owner: IdentityId) -> Result<Option<CredentialPair>> {
        Ok(self.credentials.read().get(&owner).cloned())
    }

    fn exists(&self, owner: IdentityId) -> Result<bool> {
        Ok(self.credentials.read().contains_key(&owner))
    }
}
