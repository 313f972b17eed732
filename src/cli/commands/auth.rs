use chrono::{DateTime, Utc};
use clap::Subcommand;
use serde_json::{json, Value};

use crate::auth::credentials::User;
use crate::auth::token_lifetime;
use crate::cli::client::ApiClient;
use crate::cli::config::load_session_store;
use crate::cli::utils::{output_success, password_or_prompt};
use crate::cli::OutputFormat;
use crate::session::{AuthSession, AuthStore, SessionStorage};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to server")]
    Login {
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
        #[arg(long, help = "Keep the session for 30 days instead of 1")]
        remember_me: bool,
    },

    #[command(about = "Logout from server")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,
}

pub async fn handle(cmd: AuthCommands, server: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login {
            email,
            password,
            remember_me,
        } => login(server, email, password, remember_me, output_format).await,
        AuthCommands::Logout => logout(server, output_format).await,
        AuthCommands::Status => status(server, output_format).await,
    }
}

async fn login(
    server: &str,
    email: String,
    password: Option<String>,
    remember_me: bool,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let password = password_or_prompt(password)?;
    let client = ApiClient::new(server)?;

    let response = client
        .post_json(
            "/api/auth/login",
            &json!({
                "email": email,
                "password": password,
                "rememberMe": remember_me,
            }),
        )
        .await?;

    let user: User = serde_json::from_value(response["user"].clone())?;
    let token = response["token"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("login response did not include a token"))?
        .to_string();

    let session = AuthSession {
        user,
        token,
        expires_at: Utc::now() + token_lifetime(remember_me),
    };

    let mut store = load_session_store()?;
    store.login(session.clone())?;

    output_success(
        &output_format,
        &format!("Logged in as {} ({})", session.user.email, session.user.role),
        Some(json!({
            "user": session.user,
            "expiresAt": session.expires_at,
        })),
    )
}

async fn logout(server: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut store = load_session_store()?;

    // The server only clears its cookie; the local session is what matters
    let client = ApiClient::new(server)?;
    if let Err(e) = client.post_json("/api/auth/logout", &json!({})).await {
        tracing::warn!("Server logout failed: {}", e);
    }

    store.logout()?;
    output_success(&output_format, "Logged out", None)
}

/// The stored session, or an error when there is none or it has expired
fn live_session<S: SessionStorage>(
    store: &AuthStore<S>,
    now: DateTime<Utc>,
) -> anyhow::Result<&AuthSession> {
    let session = store
        .current()
        .ok_or_else(|| anyhow::anyhow!("Not logged in"))?;

    if !store.is_authenticated(now) {
        anyhow::bail!(
            "Session for {} expired at {}",
            session.user.email,
            session.expires_at
        );
    }

    Ok(session)
}

async fn status(server: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = load_session_store()?;
    let now = Utc::now();

    let session = live_session(&store, now)?;

    let client = ApiClient::new(server)?.with_token(store.bearer_token(now));
    let server_user: Option<Value> = match client.get_json("/api/auth/me").await {
        Ok(body) => Some(body["user"].clone()),
        Err(e) => {
            tracing::warn!("Could not confirm session with server: {}", e);
            None
        }
    };

    match output_format {
        OutputFormat::Json => output_success(
            &output_format,
            "Authenticated",
            Some(json!({
                "user": session.user,
                "expiresAt": session.expires_at,
                "serverConfirmed": server_user.is_some(),
            })),
        ),
        OutputFormat::Text => {
            println!("Logged in as {} <{}>", session.user.name, session.user.email);
            println!("Role: {}", session.user.role);
            println!("Expires: {}", session.expires_at);
            if server_user.is_none() {
                println!("Server: token not confirmed by {}", server);
            }
            Ok(())
        }
    }
}
