#![allow(dead_code)]

use std::sync::Arc;

use once_cell::sync::Lazy;
use pqc_hybrid_auth::{AuthConfig, AuthProtocolBuilder, AuthService, DilithiumLevel, HybridSigner, ManualClock, MemoryStore};
use rsa::{RsaPrivateKey, rand_core::OsRng};

// 2048-bit keys keep the suite fast; the server accepts them by default
fn signer() -> HybridSigner {
    let key = RsaPrivateKey::new(&mut OsRng, 2048).expect("rsa key generation");
    HybridSigner::from_rsa_key(key, DilithiumLevel::Dilithium3).expect("signer")
}

pub static ALICE: Lazy<HybridSigner> = Lazy::new(signer);
pub static BOB: Lazy<HybridSigner> = Lazy::new(signer);
pub static MALLORY: Lazy<HybridSigner> = Lazy::new(signer);

pub struct Harness {
    pub service: AuthService,
    pub store: Arc<MemoryStore>,
    pub clock: ManualClock,
}

pub fn harness() -> Harness {
    harness_with(AuthConfig::default())
}

pub fn harness_with(config: AuthConfig) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let clock = ManualClock::new();
    let service = AuthProtocolBuilder::new()
        .with_config(config)
        .with_store(store.clone())
        .with_clock(Arc::new(clock.clone()))
        .build_service()
        .expect("service");

    Harness { service, store, clock }
}

pub fn enroll(service: &AuthService, signer: &HybridSigner, username: &str) -> pqc_hybrid_auth::Result<pqc_hybrid_auth::FinishResult> {
    let grant = service.start_enroll(username, Some(&format!("{}@example.com", username)))?;
    service.finish_enroll_response(&signer.enrollment_response(username, &grant.challenge))
}
