use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::auth::AuthError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"error": <title>, "detail": <optional detail>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, detail: Option<String>) -> Self {
        Self { status, error, detail }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(detail.into()))
    }

    /// Bad input becomes 400; anything else is logged and hidden behind a 500.
    pub fn from_service(action: &'static str, e: ServiceError) -> Self {
        if e.is_validation() {
            return Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string()));
        }
        error!(err = %e, action, "car service failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingToken | AuthError::InvalidToken(_) | AuthError::MissingDealerClaim => {
                Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(e.to_string()))
            }
            AuthError::InvalidDealerClaim(_) => Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(e.to_string())),
            AuthError::TokenError(_) => {
                error!(err = %e, "token handling failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({"error": self.error, "detail": self.detail}));
        if self.status == StatusCode::UNAUTHORIZED {
            return (self.status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }
        (self.status, body).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn auth_errors_map_to_401_or_400() {
        assert_eq!(JsonApiError::from(AuthError::MissingToken).status, StatusCode::UNAUTHORIZED);
        assert_eq!(JsonApiError::from(AuthError::InvalidToken("bad".into())).status, StatusCode::UNAUTHORIZED);
        assert_eq!(JsonApiError::from(AuthError::MissingDealerClaim).status, StatusCode::UNAUTHORIZED);
        assert_eq!(JsonApiError::from(AuthError::InvalidDealerClaim("x".into())).status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn service_faults_hide_detail() {
        let err = JsonApiError::from_service("list", ServiceError::Db("connection reset".into()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.detail.is_none());

        let err = JsonApiError::from_service("add", ServiceError::Model(ModelError::Validation("stock must not be negative".into())));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthorized_carries_challenge_header() {
        let resp = JsonApiError::from(AuthError::MissingToken).into_response();
        assert_eq!(resp.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
    }
}
