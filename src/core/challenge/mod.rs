/*!
Single-use challenges.

A challenge is issued per (identity, purpose), bound to both, and consumed
at most once before it expires.
*/

pub mod store;
pub mod types;

pub use store::{ChallengeStore, MemoryChallengeStore};
pub use types::{Challenge, Purpose};
