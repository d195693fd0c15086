/*!
Identity and credential registration.

Identities are created when enrollment starts; credential pairs are
registered only once both enrollment signatures verified.
*/

pub mod credentials;
pub mod store;
pub mod types;

pub use credentials::CredentialRegistry;
pub use store::{CredentialStore, IdentityStore, MemoryStore};
pub use types::{CredentialPair, Identity, IdentityId};
