use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use async_trait::async_trait;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::config::{SecurityConfig, VerifierKind};

/// Public user profile returned to clients and embedded in tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

/// Directory entry: the profile plus its stored password hash, if any
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("malformed password hash: {0}")]
    MalformedHash(String),
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Known dashboard accounts. There is no user table; the directory is
/// seeded from configuration at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    records: Vec<UserRecord>,
}

impl UserDirectory {
    pub fn new(records: Vec<UserRecord>) -> Self {
        Self { records }
    }

    pub fn seeded(security: &SecurityConfig) -> Self {
        Self::new(vec![
            UserRecord {
                user: User {
                    id: "1".to_string(),
                    email: "admin@purrify.ca".to_string(),
                    name: "Admin User".to_string(),
                    role: "admin".to_string(),
                },
                password_hash: security.admin_password_hash.clone(),
            },
            UserRecord {
                user: User {
                    id: "2".to_string(),
                    email: "sales@purrify.ca".to_string(),
                    name: "Sales Rep".to_string(),
                    role: "sales".to_string(),
                },
                password_hash: security.sales_password_hash.clone(),
            },
        ])
    }

    /// Case-insensitive lookup by email
    pub fn find_by_email(&self, email: &str) -> Option<&UserRecord> {
        let email = email.trim();
        self.records
            .iter()
            .find(|r| r.user.email.eq_ignore_ascii_case(email))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&UserRecord> {
        self.records.iter().find(|r| r.user.id == id)
    }
}

/// Decides whether a password is acceptable for a known user
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, record: &UserRecord, password: &str) -> Result<bool, CredentialError>;

    fn name(&self) -> &'static str;
}

/// Development stub: any password is accepted for a known email.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysAccept;

#[async_trait]
impl CredentialVerifier for AlwaysAccept {
    async fn verify(&self, _record: &UserRecord, _password: &str) -> Result<bool, CredentialError> {
        Ok(true)
    }

    fn name(&self) -> &'static str {
        "always_accept"
    }
}

/// Compares against the user's argon2 PHC hash. Users without a hash cannot log in.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashCompare;

#[async_trait]
impl CredentialVerifier for HashCompare {
    async fn verify(&self, record: &UserRecord, password: &str) -> Result<bool, CredentialError> {
        let Some(stored) = record.password_hash.as_deref() else {
            tracing::warn!("No password hash configured for {}", record.user.email);
            return Ok(false);
        };

        let parsed =
            PasswordHash::new(stored).map_err(|e| CredentialError::MalformedHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    fn name(&self) -> &'static str {
        "hash_compare"
    }
}

pub fn verifier_for(kind: VerifierKind) -> Arc<dyn CredentialVerifier> {
    match kind {
        VerifierKind::AlwaysAccept => Arc::new(AlwaysAccept),
        VerifierKind::HashCompare => Arc::new(HashCompare),
    }
}

/// Produce an argon2 PHC string suitable for `ADMIN_PASSWORD_HASH`
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CredentialError::Hashing(e.to_string()))
}
