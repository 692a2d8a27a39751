//! Dealer identity extractor.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};
use axum_extra::extract::cookie::CookieJar;
use service::auth::{verify_token, AuthError};
use service::cars::DealerId;
use tracing::warn;

use crate::errors::JsonApiError;
use crate::state::ServerState;

pub const AUTH_COOKIE: &str = "auth_token";

/// Dealer id of the authenticated caller, read from the verified token's
/// name-identifier claim. Handlers never take a dealer id from the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthDealer(pub DealerId);

#[async_trait]
impl FromRequestParts<ServerState> for AuthDealer {
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let resolved = bearer_token(&parts.headers)
            .and_then(|token| verify_token(&token, &state.tokens))
            .and_then(|claims| claims.dealer_id());
        match resolved {
            Ok(dealer_id) => Ok(AuthDealer(dealer_id)),
            Err(e) => {
                warn!(path = %parts.uri.path(), code = e.code(), err = %e, "request rejected");
                Err(e.into())
            }
        }
    }
}

/// `Authorization: Bearer <token>`, falling back to the `auth_token` cookie.
fn bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let value = value
            .to_str()
            .map_err(|_| AuthError::InvalidToken("authorization header is not ASCII".into()))?;
        return match value.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => Err(AuthError::InvalidToken("expected `Bearer <token>`".into())),
        };
    }
    CookieJar::from_headers(headers)
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_bearer_header() {
        let mut h = HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&h).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_other_schemes() {
        let mut h = HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert!(matches!(bearer_token(&h), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn falls_back_to_cookie() {
        let mut h = HeaderMap::new();
        h.insert(header::COOKIE, HeaderValue::from_static("theme=dark; auth_token=tok123"));
        assert_eq!(bearer_token(&h).unwrap(), "tok123");
    }

    #[test]
    fn missing_credentials() {
        assert!(matches!(bearer_token(&HeaderMap::new()), Err(AuthError::MissingToken)));
    }
}
