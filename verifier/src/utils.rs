//! Utilities for setting up the verifier's RPC clients and inputs

use std::str::FromStr;

use alloy::{
    network::EthereumWallet,
    providers::{DynProvider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};

use crate::{
    checklist::VerificationInputs,
    config::VerifierConfig,
    errors::VerifierError,
    types::{ArtifactSet, DeployParameters, DeploymentManifest},
};

/// Sets up a read-only client for the chain being verified
pub fn setup_rpc_client(url: Url) -> DynProvider {
    let provider = ProviderBuilder::new().on_http(url);
    DynProvider::new(provider)
}

/// Sets up a client for the local chain, signing with the given private key
pub fn setup_local_client(priv_key: &str, url: Url) -> Result<DynProvider, VerifierError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| VerifierError::ClientInitialization(e.to_string()))?;

    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_http(url);

    Ok(DynProvider::new(provider))
}

/// Loads the manifest, parameters and artifacts named in the config
pub fn load_inputs(config: &VerifierConfig) -> Result<VerificationInputs, VerifierError> {
    let manifest = DeploymentManifest::from_file(&config.manifest_path)?;
    let parameters = DeployParameters::from_file(&config.parameters_path)?;
    let artifacts =
        ArtifactSet::load(&config.artifacts_dir, config.upgrades_proxy_artifact.as_deref())?;

    Ok(VerificationInputs { manifest, parameters, artifacts })
}
