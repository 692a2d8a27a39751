use thiserror::Error;

/// Failures while turning a request credential into a dealer id
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("token has no dealer identifier claim")]
    MissingDealerClaim,
    #[error("dealer identifier claim is not a positive integer: {0:?}")]
    InvalidDealerClaim(String),
    #[error("token error: {0}")]
    TokenError(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::MissingToken => 1001,
            AuthError::InvalidToken(_) => 1002,
            AuthError::MissingDealerClaim => 1003,
            AuthError::InvalidDealerClaim(_) => 1004,
            AuthError::TokenError(_) => 1102,
        }
    }
}
