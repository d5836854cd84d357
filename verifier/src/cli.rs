//! Definitions of the CLI arguments for the deployment verifier

use std::path::PathBuf;

use clap::Parser;

use crate::{
    config::{FailureMode, VerifierConfig},
    constants::{
        DEFAULT_ARTIFACTS_DIR, DEFAULT_LOCAL_PKEY, DEFAULT_LOCAL_RPC_URL, DEFAULT_MANIFEST_PATH,
        DEFAULT_PARAMETERS_PATH,
    },
};

/// Verify that the contracts deployed on a live chain match the locally
/// compiled artifacts and the recorded deployment manifest.
///
/// Contracts embedding constructor arguments in their runtime code are
/// redeployed to a local node (e.g. Anvil or Hardhat) for comparison.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// RPC URL of the chain being verified
    #[arg(short, long, env = "RPC_URL")]
    pub rpc_url: String,

    /// Credential appended to the RPC URL as a final path segment,
    /// e.g. an Infura project ID
    #[arg(long, env = "RPC_CREDENTIAL", hide_env_values = true)]
    pub credential: Option<String>,

    /// RPC URL of the local node used for throwaway deployments
    #[arg(long, env = "LOCAL_RPC_URL", default_value = DEFAULT_LOCAL_RPC_URL)]
    pub local_rpc_url: String,

    /// Private key funding the throwaway deployments, defaults to the first
    /// default Anvil account
    #[arg(long, env = "LOCAL_PKEY", default_value = DEFAULT_LOCAL_PKEY, hide_default_value = true)]
    pub local_pkey: String,

    /// Path to the deployment manifest
    #[arg(short, long, env = "DEPLOYMENT_MANIFEST", default_value = DEFAULT_MANIFEST_PATH)]
    pub manifest: PathBuf,

    /// Path to the deployment parameters file
    #[arg(short, long, env = "DEPLOY_PARAMETERS", default_value = DEFAULT_PARAMETERS_PATH)]
    pub parameters: PathBuf,

    /// Path to the Hardhat artifacts directory
    #[arg(short, long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Path to the upgrades plugin's `TransparentUpgradeableProxy` artifact,
    /// defaults to its location under `node_modules` next to the artifacts
    #[arg(long, env = "UPGRADES_PROXY_ARTIFACT")]
    pub upgrades_proxy_artifact: Option<PathBuf>,

    /// Run every check and report all failures, rather than stopping at the
    /// first failure
    #[arg(short, long)]
    pub keep_going: bool,
}

impl From<Cli> for VerifierConfig {
    fn from(cli: Cli) -> Self {
        let failure_mode =
            if cli.keep_going { FailureMode::ReportAll } else { FailureMode::FailFast };

        Self {
            rpc_url: cli.rpc_url,
            credential: cli.credential,
            local_rpc_url: cli.local_rpc_url,
            local_pkey: cli.local_pkey,
            manifest_path: cli.manifest,
            parameters_path: cli.parameters,
            artifacts_dir: cli.artifacts_dir,
            upgrades_proxy_artifact: cli.upgrades_proxy_artifact,
            failure_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["verify-deployment", "--rpc-url", "http://node:8545"])
            .unwrap();
        let config = VerifierConfig::from(cli);

        assert_eq!(config.rpc_url, "http://node:8545");
        assert_eq!(config.local_rpc_url, DEFAULT_LOCAL_RPC_URL);
        assert_eq!(config.manifest_path, PathBuf::from(DEFAULT_MANIFEST_PATH));
        assert_eq!(config.failure_mode, FailureMode::FailFast);
    }

    #[test]
    fn test_keep_going_selects_report_all() {
        let cli = Cli::try_parse_from([
            "verify-deployment",
            "--rpc-url",
            "http://node:8545",
            "--keep-going",
        ])
        .unwrap();

        assert_eq!(VerifierConfig::from(cli).failure_mode, FailureMode::ReportAll);
    }
}
