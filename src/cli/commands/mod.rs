pub mod auth;
pub mod import;
pub mod metrics;

use serde_json::json;

use crate::auth::credentials::hash_password as argon2_hash;
use crate::cli::utils::{output_success, password_or_prompt};
use crate::cli::OutputFormat;

pub fn hash_password(password: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let password = password_or_prompt(password)?;
    let hash = argon2_hash(&password)?;

    match output_format {
        OutputFormat::Json => output_success(&output_format, "Password hashed", Some(json!({ "hash": hash }))),
        OutputFormat::Text => {
            println!("{}", hash);
            Ok(())
        }
    }
}
