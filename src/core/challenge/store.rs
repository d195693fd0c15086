/*!
Challenge issuance and consumption.

Each (owner, purpose) slot holds at most one challenge. Issuing replaces
whatever the slot held, and consumption checks and retires the challenge in
one critical section, so a challenge can be consumed at most once no matter
how many requests race for it.
*/

use parking_lot::Mutex;
use rand::RngCore;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::core::challenge::types::{Challenge, Purpose};
use crate::core::clock::{is_older_than, Clock, SystemClock};
use crate::core::config::AuthConfig;
use crate::core::constants::MIN_CHALLENGE_BYTES;
use crate::core::crypto::encoding;
use crate::core::error::{ChallengeError, Result};
use crate::core::registry::types::IdentityId;
use crate::core::security::constant_time_eq;

/// Challenge lifecycle.
///
/// `issue` and `consume` on the same (owner, purpose) must be linearizable,
/// and `consume` must succeed at most once per issued challenge.
pub trait ChallengeStore: Send + Sync {
    /// Issue a fresh challenge, invalidating any previous one for the slot
    fn issue(&self, owner: IdentityId, purpose: Purpose) -> Result<Challenge>;

    /// Consume the slot's challenge if its value equals `presented`.
    ///
    /// Fails with `ChallengeError::NotFound`, `Mismatch`, `AlreadyConsumed`
    /// or `Expired`. A mismatched presentation burns the challenge.
    fn consume(&self, owner: IdentityId, purpose: Purpose, presented: &str) -> Result<Challenge>;

    /// Consume whatever challenge the slot currently holds
    fn consume_current(&self, owner: IdentityId, purpose: Purpose) -> Result<Challenge>;

    /// Drop the slot's challenge
    fn invalidate(&self, owner: IdentityId, purpose: Purpose) -> Result<()>;

    /// How long a challenge stays consumable
    fn ttl(&self) -> Duration;
}

/// Slot contents. A used challenge leaves a tombstone so replays report
/// `AlreadyConsumed` until the next issue or sweep clears it.
#[derive(Debug)]
enum Slot {
    Pending(Challenge),
    Spent { issued_at: SystemTime },
}

impl Slot {
    fn issued_at(&self) -> SystemTime {
        match self {
            Slot::Pending(challenge) => challenge.issued_at,
            Slot::Spent { issued_at } => *issued_at,
        }
    }
}

/// In-memory challenge store.
///
/// Every `issue` sweeps slots older than the TTL, so the map holds at most
/// the challenges issued within one TTL window.
pub struct MemoryChallengeStore {
    slots: Mutex<HashMap<(IdentityId, Purpose), Slot>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    challenge_bytes: usize,
}

impl MemoryChallengeStore {
    /// Create a store with the system clock
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a store reading time from `clock`
    pub fn with_clock(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            clock,
            ttl: config.challenge_ttl,
            challenge_bytes: config.challenge_bytes.max(MIN_CHALLENGE_BYTES),
        }
    }

    /// Drop expired challenges and every tombstone, returning how many slots
    /// were removed
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut slots = self.slots.lock();
        let before = slots.len();
        slots.retain(|_, slot| match slot {
            Slot::Pending(c) => !is_older_than(c.issued_at, now, self.ttl),
            Slot::Spent { .. } => false,
        });
        let removed = before - slots.len();
        if removed > 0 {
            log::debug!("Purged {} stale challenges", removed);
        }
        removed
    }

    /// Number of occupied slots, tombstones included
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    /// Whether no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }

    fn generate_value(&self) -> String {
        let mut bytes = vec![0u8; self.challenge_bytes];
        rand::rng().fill_bytes(&mut bytes);
        encoding::encode_token(&bytes)
    }

    fn take(&self, owner: IdentityId, purpose: Purpose, presented: Option<&str>) -> Result<Challenge> {
        let now = self.clock.now();
        let mut slots = self.slots.lock();
        let key = (owner, purpose);

        let challenge = match slots.get(&key) {
            None => return Err(ChallengeError::NotFound.into()),
            Some(Slot::Spent { .. }) => return Err(ChallengeError::AlreadyConsumed.into()),
            Some(Slot::Pending(challenge)) => challenge,
        };

        if is_older_than(challenge.issued_at, now, self.ttl) {
            slots.remove(&key);
            log::debug!("{} challenge for identity {} expired", purpose, owner);
            return Err(ChallengeError::Expired.into());
        }

        let matches = presented.is_none_or(|p| constant_time_eq(challenge.value.as_bytes(), p.as_bytes()));
        let mut challenge = challenge.clone();
        slots.insert(key, Slot::Spent { issued_at: challenge.issued_at });

        if !matches {
            log::warn!("{} challenge for identity {} mismatched, slot burned", purpose, owner);
            return Err(ChallengeError::Mismatch.into());
        }

        challenge.consumed = true;
        Ok(challenge)
    }
}

impl ChallengeStore for MemoryChallengeStore {
    fn issue(&self, owner: IdentityId, purpose: Purpose) -> Result<Challenge> {
        let now = self.clock.now();
        let challenge = Challenge {
            value: self.generate_value(),
            owner,
            purpose,
            issued_at: now,
            consumed: false,
        };

        let mut slots = self.slots.lock();
        slots.retain(|_, slot| !is_older_than(slot.issued_at(), now, self.ttl));
        slots.insert((owner, purpose), Slot::Pending(challenge.clone()));
        Ok(challenge)
    }

    fn consume(&self, owner: IdentityId, purpose: Purpose, presented: &str) -> Result<Challenge> {
        self.take(owner, purpose, Some(presented))
    }

    fn consume_current(&self, owner: IdentityId, purpose: Purpose) -> Result<Challenge> {
        self.take(owner, purpose, None)
    }

    fn invalidate(&self, owner: IdentityId, purpose: Purpose) -> Result<()> {
        self.slots.lock().remove(&(owner, purpose));
        Ok(())
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}
