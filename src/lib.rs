/*!
# PQC Hybrid Auth

Challenge-response enrollment and login where every credential is a pair:
a classical RSA key and a post-quantum CRYSTALS-Dilithium key. A login
succeeds only when both signatures over a fresh, single-use challenge
verify, so the scheme stays sound as long as either algorithm does.

## Overview

- RSA PKCS#1 v1.5 / SHA-256 and CRYSTALS-Dilithium (2, 3 or 5) verification
- Single-use, time-limited challenges bound to an identity and a purpose
- Credential pairs stored only after both enrollment signatures verified
- Login failures that do not reveal whether a username exists
- Session tokens and an explicit authenticated context
- Injected stores, clock, and verification backends
- Both synchronous and asynchronous services

## Example

```no_run
use pqc_hybrid_auth::{AuthProtocolBuilder, HybridSigner};

let service = AuthProtocolBuilder::new().build_service()?;
let signer = HybridSigner::generate_default()?;

let grant = service.start_enroll("alice", Some("alice@example.com"))?;
let enrolled = service.finish_enroll_response(&signer.enrollment_response("alice", &grant.challenge))?;
assert!(enrolled.ok);

let grant = service.start_login("alice")?;
let result = service.finish_login_response(&signer.login_response("alice", &grant.challenge))?;
assert!(result.ok);
# Ok::<(), pqc_hybrid_auth::Error>(())
```
*/

// Core components
pub mod core;

// Enrollment and login protocol
pub mod protocol;

// Client-side signing
pub mod client;

// Re-export commonly used types for convenience
pub use crate::core::error::{AuthError, ChallengeError, CryptoError, EnrollmentError, Error, RegistryError, Result, StorageError};
pub use crate::core::constants::sizes;
pub use crate::core::config::AuthConfig;
pub use crate::core::clock::{Clock, ManualClock, SystemClock};
pub use crate::core::challenge::{Challenge, ChallengeStore, MemoryChallengeStore, Purpose};
pub use crate::core::registry::{CredentialPair, CredentialRegistry, CredentialStore, Identity, IdentityId, IdentityStore, MemoryStore};
pub use crate::core::session::{AuthContext, MemorySessionIssuer, SessionIssuer, SessionToken};
pub use crate::core::crypto::{
    DilithiumLevel, DilithiumVerifier, PublicKeyHandle, RsaVerifier, SignatureAlgorithm, SignatureBackend,
    SignatureVerifier,
};
pub use crate::core::security::constant_time::constant_time_eq;

// Re-export protocol components
pub use protocol::{
    AuthProtocol, AuthProtocolBuilder, AuthService, ChallengeGrant, EnrollmentResponse, FinishResult, Flow, FlowState,
    LoginResponse, SignatureProof, UserCredentials, LOGIN_FAILURE_REASON,
};
pub use protocol::builder::service;

// Re-export asynchronous components (enabled with the "async" feature)
#[cfg(feature = "async")]
pub use protocol::{builder::async_service, AsyncAuthService};

pub use client::HybridSigner;
