pub mod client;
pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "dashctl")]
#[command(about = "dashctl - Command-line client for the Dashboard API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Server URL (defaults to $DASHBOARD_API_URL, then http://localhost:3000)")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Authentication and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Import store contacts from CSV or Google Sheets exports")]
    Import {
        #[command(subcommand)]
        cmd: commands::import::ImportCommands,
    },

    #[command(about = "Fetch dashboard metrics")]
    Metrics {
        #[arg(long, help = "Reporting period: day, week, month, quarter or year")]
        period: Option<String>,
        #[arg(long, help = "Include the monthly sales breakdown")]
        details: bool,
    },

    #[command(about = "Print an argon2 hash for ADMIN_PASSWORD_HASH / SALES_PASSWORD_HASH")]
    HashPassword {
        #[arg(help = "Password to hash (will prompt if not provided)")]
        password: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let server = config::server_url(cli.server.as_deref());

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &server, output_format).await,
        Commands::Import { cmd } => commands::import::handle(cmd, &server, output_format).await,
        Commands::Metrics { period, details } => {
            commands::metrics::handle(period, details, &server, output_format).await
        }
        Commands::HashPassword { password } => commands::hash_password(password, output_format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_login_with_remember_me() {
        let cli = Cli::try_parse_from([
            "dashctl",
            "auth",
            "login",
            "admin@purrify.ca",
            "--password",
            "secret123",
            "--remember-me",
        ])
        .unwrap();

        match cli.command {
            Commands::Auth {
                cmd:
                    commands::auth::AuthCommands::Login {
                        email,
                        password,
                        remember_me,
                    },
            } => {
                assert_eq!(email, "admin@purrify.ca");
                assert_eq!(password.as_deref(), Some("secret123"));
                assert!(remember_me);
            }
            _ => panic!("expected auth login"),
        }
    }

    #[test]
    fn json_flag_is_global() {
        let cli = Cli::try_parse_from(["dashctl", "metrics", "--period", "week", "--json"]).unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
    }

    #[test]
    fn import_requires_a_path() {
        assert!(Cli::try_parse_from(["dashctl", "import", "csv"]).is_err());
    }
}
