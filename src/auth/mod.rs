use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::JwtConfig;

/// Bearer token claims.
///
/// The identity is read from `name`, then `unique_name`, then `sub`, the same
/// precedence a Microsoft identity stack uses when mapping a token onto the
/// principal's name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_name: Option<String>,
    pub iss: String,
    pub aud: Audience,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

/// `aud` may be a single string or a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Claims {
    /// Claims expiring after the configured lifetime. An out-of-range
    /// lifetime saturates to the latest representable expiry.
    pub fn new(username: &str, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = Duration::try_minutes(config.expiry_minutes)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .map_or(i64::MAX, |at| at.timestamp());
        Self::issued(username, config, now.timestamp(), exp)
    }

    /// Claims expiring after `lifetime`, or `None` if the expiry is not a
    /// representable time
    pub fn with_lifetime(username: &str, config: &JwtConfig, lifetime: Duration) -> Option<Self> {
        let now = Utc::now();
        let exp = now.checked_add_signed(lifetime)?;
        Some(Self::issued(username, config, now.timestamp(), exp.timestamp()))
    }

    fn issued(username: &str, config: &JwtConfig, iat: i64, exp: i64) -> Self {
        Self {
            sub: Some(username.to_string()),
            name: Some(username.to_string()),
            unique_name: None,
            iss: config.issuer.clone(),
            aud: Audience::One(config.audience.clone()),
            exp,
            iat,
        }
    }

    /// The principal's username, if the token carries a non-blank one
    pub fn identity(&self) -> Option<&str> {
        [&self.name, &self.unique_name, &self.sub]
            .into_iter()
            .filter_map(|claim| claim.as_deref())
            .find(|value| !value.trim().is_empty())
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,
}

/// Sign a token with the configured symmetric key.
///
/// Used by the `token` CLI command and by tests; the HTTP surface does not
/// issue tokens.
pub fn generate_jwt(claims: &Claims, config: &JwtConfig) -> Result<String, JwtError> {
    if config.key.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(config.key.as_bytes());
    let header = Header::new(Algorithm::HS256);

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Verifies HS256 bearer tokens against the configured key, issuer and
/// audience. Expiry is checked with zero clock skew.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(config: &JwtConfig) -> Result<Self, JwtError> {
        if config.key.is_empty() {
            return Err(JwtError::InvalidSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(std::slice::from_ref(&config.issuer));
        validation.set_audience(std::slice::from_ref(&config.audience));
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.key.as_bytes()),
            validation,
        })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))
    }
}
