use clap::Parser;
use dashboard_api::cli::{utils::output_error, Cli, OutputFormat};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_format = OutputFormat::from_cli(&cli);

    if let Err(e) = dashboard_api::cli::run(cli).await {
        match (std::env::var("CLI_VERBOSE").as_deref(), &output_format) {
            (Ok("true") | Ok("1"), _) => eprintln!("Error: {e:?}"),
            (_, OutputFormat::Json) => output_error(&output_format, &e.to_string())?,
            _ => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }

    Ok(())
}
