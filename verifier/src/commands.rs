//! The top-level verification command

use tracing::info;

use crate::{
    chain::{RpcChain, RpcDeployer},
    checklist::DeploymentVerifier,
    checks::CheckOutcome,
    config::VerifierConfig,
    errors::VerifierError,
    utils::{load_inputs, setup_local_client, setup_rpc_client},
};

/// Verify the deployment described by the config against the live chain
pub async fn verify_deployment(
    config: &VerifierConfig,
) -> Result<Vec<CheckOutcome>, VerifierError> {
    let inputs = load_inputs(config)?;
    info!(
        "loaded manifest {} and parameters {}",
        config.manifest_path.display(),
        config.parameters_path.display()
    );

    let chain = RpcChain::new(setup_rpc_client(config.endpoint_url()?));
    let local = RpcDeployer::new(setup_local_client(&config.local_pkey, config.local_url()?)?);

    let verifier = DeploymentVerifier::new(chain, local, inputs);
    let outcomes = verifier.run(config.failure_mode).await?;

    info!("all {} checks passed", outcomes.len());
    Ok(outcomes)
}
