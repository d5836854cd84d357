//! Configuration of a verification run

use std::path::PathBuf;

use alloy::transports::http::reqwest::Url;

use crate::errors::VerifierError;

/// How the runner reacts to a failed check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Abort the run at the first failed check
    #[default]
    FailFast,
    /// Run every check and report all failures at the end
    ReportAll,
}

/// Everything a verification run needs to know, gathered up front so that
/// nothing below the CLI reads the process environment
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// RPC endpoint of the chain being verified
    pub rpc_url: String,
    /// Optional credential appended to the endpoint as a final path segment,
    /// e.g. an Infura project ID
    pub credential: Option<String>,
    /// RPC endpoint of the local chain used for throwaway deployments
    pub local_rpc_url: String,
    /// Private key funding the throwaway deployments
    pub local_pkey: String,
    /// Path to the deployment manifest
    pub manifest_path: PathBuf,
    /// Path to the deployment parameters file
    pub parameters_path: PathBuf,
    /// Path to the Hardhat artifacts directory
    pub artifacts_dir: PathBuf,
    /// Path to the upgrades plugin's proxy artifact, if not in its default
    /// location
    pub upgrades_proxy_artifact: Option<PathBuf>,
    /// How to react to a failed check
    pub failure_mode: FailureMode,
}

impl VerifierConfig {
    /// The full URL of the verified chain's endpoint, with the credential
    /// joined on
    pub fn endpoint_url(&self) -> Result<Url, VerifierError> {
        let mut url = Url::parse(&self.rpc_url)
            .map_err(|e| VerifierError::Config(format!("invalid RPC URL: {e}")))?;

        if let Some(credential) = &self.credential {
            url.path_segments_mut()
                .map_err(|_| VerifierError::Config("RPC URL cannot have a path".to_string()))?
                .pop_if_empty()
                .push(credential);
        }

        Ok(url)
    }

    /// The URL of the local chain's endpoint
    pub fn local_url(&self) -> Result<Url, VerifierError> {
        Url::parse(&self.local_rpc_url)
            .map_err(|e| VerifierError::Config(format!("invalid local RPC URL: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A config pointing at the given endpoint
    fn config_with(rpc_url: &str, credential: Option<&str>) -> VerifierConfig {
        VerifierConfig {
            rpc_url: rpc_url.to_string(),
            credential: credential.map(str::to_string),
            local_rpc_url: "http://127.0.0.1:8545".to_string(),
            local_pkey: String::new(),
            manifest_path: PathBuf::new(),
            parameters_path: PathBuf::new(),
            artifacts_dir: PathBuf::new(),
            upgrades_proxy_artifact: None,
            failure_mode: FailureMode::default(),
        }
    }

    #[test]
    fn test_endpoint_without_credential() {
        let config = config_with("https://eth.example.org/rpc", None);
        assert_eq!(config.endpoint_url().unwrap().as_str(), "https://eth.example.org/rpc");
    }

    #[test]
    fn test_credential_is_appended() {
        let config = config_with("https://mainnet.infura.io/v3", Some("abc123"));
        assert_eq!(config.endpoint_url().unwrap().as_str(), "https://mainnet.infura.io/v3/abc123");
    }

    #[test]
    fn test_credential_after_trailing_slash() {
        let config = config_with("https://mainnet.infura.io/v3/", Some("abc123"));
        assert_eq!(config.endpoint_url().unwrap().as_str(), "https://mainnet.infura.io/v3/abc123");
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let config = config_with("not a url", None);
        assert!(matches!(config.endpoint_url(), Err(VerifierError::Config(_))));
    }

    #[test]
    fn test_default_mode_is_fail_fast() {
        assert_eq!(FailureMode::default(), FailureMode::FailFast);
    }
}
