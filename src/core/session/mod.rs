/*!
Session management for authenticated callers.

A successful enrollment or login mints a session token; later requests
present the token and receive an explicit [`AuthContext`].
*/

// Authenticated principal
pub mod context;

// Token minting and validation
pub mod issuer;

pub use self::context::AuthContext;
pub use self::issuer::{MemorySessionIssuer, SessionIssuer, SessionToken};
