pub mod credentials;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use credentials::User;

/// Name of the cookie carrying the signed session token
pub const AUTH_COOKIE: &str = "auth-token";

pub const DEFAULT_TOKEN_LIFETIME_DAYS: i64 = 1;
pub const REMEMBER_ME_TOKEN_LIFETIME_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: String,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user: &User, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            user_id: user.id.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("JWT secret not configured")]
    MissingSecret,
    #[error("JWT generation error: {0}")]
    Encoding(String),
    #[error("Invalid JWT token: {0}")]
    Invalid(String),
    #[error("JWT token expired")]
    Expired,
}

/// A freshly signed token and how long the client should keep it
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub lifetime: Duration,
}

pub fn token_lifetime(remember_me: bool) -> Duration {
    if remember_me {
        Duration::days(REMEMBER_ME_TOKEN_LIFETIME_DAYS)
    } else {
        Duration::days(DEFAULT_TOKEN_LIFETIME_DAYS)
    }
}

/// HS256 signer/verifier built once from the process-wide secret
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    pub fn issue(&self, user: &User, remember_me: bool) -> Result<IssuedToken, TokenError> {
        let lifetime = token_lifetime(remember_me);
        let claims = Claims::new(user, lifetime);
        let expires_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now);

        let token = self.sign(&claims)?;

        Ok(IssuedToken {
            token,
            expires_at,
            lifetime,
        })
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Check signature and expiry, returning the embedded claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::default();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}
