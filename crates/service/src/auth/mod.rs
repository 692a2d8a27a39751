//! Bearer token handling.
//!
//! Tokens are HS256 JWTs. The dealer id travels in the name-identifier claim
//! (`sub`, or the `nameid` alias) as a decimal string.

pub mod errors;
pub mod token;

pub use errors::AuthError;
pub use token::{issue_token, verify_token, Claims, TokenConfig};
