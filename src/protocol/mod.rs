//! Enrollment and login protocol.
//!
//! This module contains the challenge-response flows, the transport-facing
//! service, and the builder that assembles them.

// Flow state machine
pub mod state;

// Request and response types
pub mod messages;

// Enrollment and login
pub mod auth_protocol;

// Transport-facing service
pub mod service;

// Asynchronous service
#[cfg(feature = "async")]
pub mod async_service;

// Builder
pub mod builder;

// Re-export for convenience
pub use auth_protocol::AuthProtocol;
pub use builder::AuthProtocolBuilder;
pub use messages::{ChallengeGrant, EnrollmentResponse, FinishResult, LoginResponse, SignatureProof, UserCredentials};
pub use service::{AuthService, LOGIN_FAILURE_REASON};
pub use state::{Flow, FlowState};

#[cfg(feature = "async")]
pub use async_service::AsyncAuthService;
