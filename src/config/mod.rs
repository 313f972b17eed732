use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

/// Placeholder secret used by development profiles. Production refuses it.
pub const DEVELOPMENT_JWT_SECRET: &str = "dev-only-dashboard-secret";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifierKind {
    AlwaysAccept,
    HashCompare,
}

impl std::str::FromStr for VerifierKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always_accept" | "always-accept" => Ok(VerifierKind::AlwaysAccept),
            "hash_compare" | "hash-compare" => Ok(VerifierKind::HashCompare),
            other => Err(ConfigError::Invalid {
                key: "CREDENTIAL_VERIFIER",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    /// Redirect unauthenticated requests for protected pages to /login
    pub enforce_auth: bool,
    pub secure_cookies: bool,
    pub credential_verifier: VerifierKind,
    #[serde(skip_serializing)]
    pub admin_password_hash: Option<String>,
    #[serde(skip_serializing)]
    pub sales_password_hash: Option<String>,
}

// Keep secrets out of logs
impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("enforce_auth", &self.enforce_auth)
            .field("secure_cookies", &self.secure_cookies)
            .field("credential_verifier", &self.credential_verifier)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    Invalid { key: &'static str, value: String },
    #[error("JWT_SECRET must be set to a non-default value in {0:?}")]
    InsecureSecret(Environment),
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("DASHBOARD_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("ENFORCE_AUTH") {
            self.security.enforce_auth = v.parse().unwrap_or(self.security.enforce_auth);
        }
        if let Ok(v) = env::var("SECURE_COOKIES") {
            self.security.secure_cookies = v.parse().unwrap_or(self.security.secure_cookies);
        }
        if let Ok(v) = env::var("CREDENTIAL_VERIFIER") {
            match v.parse() {
                Ok(kind) => self.security.credential_verifier = kind,
                Err(e) => tracing::warn!("Ignoring {}", e),
            }
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD_HASH") {
            self.security.admin_password_hash = Some(v);
        }
        if let Ok(v) = env::var("SALES_PASSWORD_HASH") {
            self.security.sales_password_hash = Some(v);
        }

        self
    }

    /// Reject configurations that must never reach a live deployment
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment == Environment::Production {
            let secret = self.security.jwt_secret.trim();
            if secret.is_empty() || secret == DEVELOPMENT_JWT_SECRET {
                return Err(ConfigError::InsecureSecret(self.environment));
            }
        }
        Ok(())
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            security: SecurityConfig {
                jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
                enforce_auth: true,
                secure_cookies: false,
                credential_verifier: VerifierKind::AlwaysAccept,
                admin_password_hash: None,
                sales_password_hash: None,
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            security: SecurityConfig {
                jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
                enforce_auth: true,
                secure_cookies: true,
                credential_verifier: VerifierKind::HashCompare,
                admin_password_hash: None,
                sales_password_hash: None,
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            api: ApiConfig {
                enable_request_logging: false,
                // Must stay above the 5MB upload rule so oversize files get a 400, not a 413
                max_request_size_bytes: 8 * 1024 * 1024,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                enforce_auth: true,
                secure_cookies: true,
                credential_verifier: VerifierKind::HashCompare,
                admin_password_hash: None,
                sales_password_hash: None,
            },
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
