use std::sync::Arc;

use crate::auth::credentials::{verifier_for, CredentialVerifier, UserDirectory};
use crate::auth::{TokenError, TokenService};
use crate::config::{AppConfig, VerifierKind};

/// Process-wide, read-only state shared by every request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: TokenService,
    pub users: Arc<UserDirectory>,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Result<Self, TokenError> {
        let tokens = TokenService::new(&config.security.jwt_secret)?;
        let users = UserDirectory::seeded(&config.security);
        let verifier = verifier_for(config.security.credential_verifier);

        if config.security.credential_verifier == VerifierKind::AlwaysAccept {
            tracing::warn!(
                "Credential verifier is '{}': any password is accepted for known users",
                verifier.name()
            );
        }
        if !config.security.enforce_auth {
            tracing::warn!("Authentication enforcement is disabled for protected pages");
        }

        Ok(Self {
            config: Arc::new(config),
            tokens,
            users: Arc::new(users),
            verifier,
        })
    }

    /// Swap the credential verifier, e.g. to plug in a different backend
    pub fn with_verifier(mut self, verifier: Arc<dyn CredentialVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn with_users(mut self, users: UserDirectory) -> Self {
        self.users = Arc::new(users);
        self
    }
}
