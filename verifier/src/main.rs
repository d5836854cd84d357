use clap::Parser;
use deployment_verifier::{cli::Cli, commands::verify_deployment, config::VerifierConfig};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config = VerifierConfig::from(Cli::parse());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = verify_deployment(&config).await {
        // Failed checks are logged as they run
        if !e.is_mismatch() {
            error!("{e}");
        }
        std::process::exit(1);
    }

    Ok(())
}
