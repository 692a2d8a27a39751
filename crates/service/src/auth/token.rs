use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::errors::AuthError;
use crate::cars::DealerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Name identifier: the dealer id as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Alternate spelling of the name identifier used by some issuers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nameid: Option<String>,
    pub exp: usize,
    #[serde(default)]
    pub iat: usize,
}

impl Claims {
    /// Parse the name-identifier claim as the tenant key.
    pub fn dealer_id(&self) -> Result<DealerId, AuthError> {
        let raw = self
            .sub
            .as_deref()
            .or(self.nameid.as_deref())
            .ok_or(AuthError::MissingDealerClaim)?;
        match raw.trim().parse::<DealerId>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(AuthError::InvalidDealerClaim(raw.to_string())),
        }
    }
}

#[derive(Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub ttl_mins: i64,
}

impl From<&configs::AuthConfig> for TokenConfig {
    fn from(cfg: &configs::AuthConfig) -> Self {
        Self { secret: cfg.jwt_secret.clone(), ttl_mins: cfg.token_ttl_mins }
    }
}

/// Mint a token whose name identifier is `dealer_id`.
///
/// # Examples
/// ```
/// use service::auth::{issue_token, verify_token, TokenConfig};
/// let cfg = TokenConfig { secret: "secret".into(), ttl_mins: 5 };
/// let token = issue_token(42, &cfg).unwrap();
/// assert_eq!(verify_token(&token, &cfg).unwrap().dealer_id().unwrap(), 42);
/// ```
pub fn issue_token(dealer_id: DealerId, cfg: &TokenConfig) -> Result<String, AuthError> {
    let now = chrono::Utc::now();
    let exp = chrono::Duration::try_minutes(cfg.ttl_mins)
        .filter(|ttl| *ttl > chrono::Duration::zero())
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| AuthError::TokenError(format!("token ttl of {} minutes is out of range", cfg.ttl_mins)))?;
    let claims = Claims {
        sub: Some(dealer_id.to_string()),
        nameid: None,
        exp: exp.timestamp() as usize,
        iat: now.timestamp() as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(cfg.secret.as_bytes()))
        .map_err(|e| AuthError::TokenError(e.to_string()))
}

/// Check signature and expiry; the dealer claim is parsed separately.
pub fn verify_token(token: &str, cfg: &TokenConfig) -> Result<Claims, AuthError> {
    let key = DecodingKey::from_secret(cfg.secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
}
