//! OAuth client-credentials primitives: redacted secrets, bearer tokens, and the token
//! endpoint's request and response shapes.

pub mod secret;
pub mod token;

pub use secret::*;
pub use token::*;
