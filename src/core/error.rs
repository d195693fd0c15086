/*!
Error handling for hybrid authentication.

Errors are layered: the top-level [`Error`] tells structural problems
(malformed input, storage, configuration) apart from authentication and
enrollment rejections, and each rejection carries a detailed source that is
meant for server-side logs rather than for the caller.
*/

use thiserror::Error;

/// Result type for hybrid authentication
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for hybrid authentication
#[derive(Error, Debug)]
pub enum Error {
    /// Login did not succeed (limited details to prevent username enumeration)
    #[error("Authentication failed")]
    Authentication(#[source] AuthError),

    /// Enrollment did not succeed
    #[error("Enrollment failed: {0}")]
    Enrollment(#[source] EnrollmentError),

    /// Challenge could not be consumed
    #[error("Challenge rejected: {0}")]
    Challenge(#[source] ChallengeError),

    /// Credential registry error
    #[error("Credential registry error: {0}")]
    Registry(#[source] RegistryError),

    /// Structurally invalid key or signature
    #[error("Malformed request: {0}")]
    Crypto(#[source] CryptoError),

    /// Persistence collaborator failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Reasons a login attempt was rejected.
///
/// Never shown to the caller; `Error::Authentication` displays the same
/// message for every variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No identity with this username
    #[error("Unknown identity")]
    UnknownIdentity,

    /// Identity exists but holds no credential pair
    #[error("Identity is not enrolled")]
    NotEnrolled,

    /// Login challenge could not be consumed
    #[error("Challenge invalid: {0}")]
    Challenge(#[source] ChallengeError),

    /// One or both signatures did not verify
    #[error("Signature verification failed")]
    VerificationFailed,

    /// Session token unknown or expired
    #[error("Session invalid or expired")]
    InvalidSession,
}

/// Reasons an enrollment attempt was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentError {
    /// Enrollment was never started for this username
    #[error("Unknown identity")]
    UnknownIdentity,

    /// A credential pair is already registered for the identity
    #[error("Identity is already enrolled")]
    AlreadyEnrolled,

    /// Enrollment challenge could not be consumed
    #[error("Challenge invalid: {0}")]
    ChallengeInvalid(#[source] ChallengeError),

    /// One or both signatures did not verify
    #[error("Signature verification failed")]
    VerificationFailed,
}

/// Challenge consumption failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeError {
    /// No challenge was issued for this owner and purpose
    #[error("Challenge not found")]
    NotFound,

    /// The presented value is not the current challenge
    #[error("Challenge mismatch")]
    Mismatch,

    /// The challenge was already used
    #[error("Challenge already consumed")]
    AlreadyConsumed,

    /// The challenge is older than the expiry window
    #[error("Challenge expired")]
    Expired,
}

/// Credential registry failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// A credential pair already exists for the owner
    #[error("Credential pair already enrolled")]
    AlreadyEnrolled,

    /// No credential pair exists for the owner
    #[error("No credential pair enrolled")]
    NotEnrolled,
}

/// Structural failures of keys and signatures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Public key has the wrong encoding or type for its algorithm
    #[error("Invalid key format: {0}")]
    MalformedKey(String),

    /// Signature has the wrong encoding or size for its algorithm
    #[error("Invalid signature format: {0}")]
    MalformedSignature(String),

    /// A backend was registered for the wrong algorithm family
    #[error("Backend mismatch: expected {expected}, got {actual}")]
    BackendMismatch {
        expected: String,
        actual: String,
    },
}

/// Persistence collaborator failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Uniqueness constraint violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Backing store unavailable
    #[error("Unavailable: {0}")]
    Unavailable(String),
}

impl Error {
    /// Whether the request itself was malformed (as opposed to rejected)
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::Crypto(CryptoError::MalformedKey(_) | CryptoError::MalformedSignature(_)))
    }

    /// Whether this is an authentication or enrollment rejection
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::Authentication(_) | Error::Enrollment(_) | Error::Challenge(_) | Error::Registry(_)
        )
    }
}

impl From<CryptoError> for Error {
    fn from(error: CryptoError) -> Self {
        Error::Crypto(error)
    }
}

impl From<ChallengeError> for Error {
    fn from(error: ChallengeError) -> Self {
        Error::Challenge(error)
    }
}

impl From<RegistryError> for Error {
    fn from(error: RegistryError) -> Self {
        Error::Registry(error)
    }
}

/// Create an authentication error
#[macro_export]
macro_rules! auth_err {
    ($err:expr) => {
        Err($crate::core::error::Error::Authentication($err))
    };
}

/// Create an enrollment error
#[macro_export]
macro_rules! enroll_err {
    ($err:expr) => {
        Err($crate::core::error::Error::Enrollment($err))
    };
}

/// Create a crypto error
#[macro_export]
macro_rules! crypto_err {
    ($err:expr) => {
        Err($crate::core::error::Error::Crypto($err))
    };
}
