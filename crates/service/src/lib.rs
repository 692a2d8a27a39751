//! Service layer for dealer-scoped car inventory.
//! - `cars`: the `CarService` contract, its implementation and repositories.
//! - `auth`: bearer token issuing and verification; the dealer id lives in the
//!   name-identifier claim.
//!
//! Every operation takes the calling dealer's id; rows owned by other dealers
//! are invisible, never forbidden.

pub mod errors;
pub mod auth;
pub mod cars;
#[cfg(test)]
pub mod test_support;
