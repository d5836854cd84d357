//! Type definitions for the verifier's inputs: the deployment manifest, the
//! deployment parameters, and the compiled build artifacts

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::primitives::{Address, Bytes, B256, U256};
use serde::{de::DeserializeOwned, Deserialize};

use crate::{
    constants::{
        BRIDGE_ARTIFACT, FFLONK_VERIFIER_ARTIFACT, GLOBAL_EXIT_ROOT_ARTIFACT,
        PROXY_ADMIN_ARTIFACT, TIMELOCK_ARTIFACT, TRANSPARENT_PROXY_ARTIFACT,
        UPGRADES_PROXY_ARTIFACT, ZKEVM_ARTIFACT, ZKEVM_DEPLOYER_ARTIFACT,
    },
    errors::VerifierError,
};

/// Read and deserialize a JSON file, describing the failure with the path
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;

    serde_json::from_str(&content).map_err(|e| format!("failed to parse {}: {}", path.display(), e))
}

/// The addresses recorded when the contracts were deployed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeploymentManifest {
    /// The `FflonkVerifier` contract
    #[serde(rename = "fflonkVerifierAddress")]
    pub fflonk_verifier_address: Address,
    /// The `PolygonZkEVMDeployer` contract
    #[serde(rename = "polygonZkEVMDeployerAddress")]
    pub zkevm_deployer_address: Address,
    /// The bridge proxy
    #[serde(rename = "polygonZkEVMBridgeAddress")]
    pub bridge_address: Address,
    /// The timelock contract
    #[serde(rename = "polygonZkEVMTimelockAddress")]
    pub timelock_address: Address,
    /// The global exit root proxy
    #[serde(rename = "polygonZkEVMGlobalExitRootAddress")]
    pub global_exit_root_address: Address,
    /// The rollup proxy
    #[serde(rename = "polygonZkEVMAddress")]
    pub zkevm_address: Address,
    /// The state root recorded for batch zero
    #[serde(rename = "genesisRoot")]
    pub genesis_root: B256,
}

impl DeploymentManifest {
    /// Load the manifest from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, VerifierError> {
        read_json(path).map_err(VerifierError::ReadManifest)
    }
}

/// The parameters the contracts were deployed with
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeployParameters {
    /// The L2 chain ID
    #[serde(rename = "chainID")]
    pub chain_id: u64,
    /// The fork ID the rollup was deployed at
    #[serde(rename = "forkID")]
    pub fork_id: u64,
    /// The address acting as the timelock's proposer, executor and admin
    #[serde(rename = "timelockAddress")]
    pub timelock_address: Address,
    /// The timelock's minimum delay, in seconds
    #[serde(rename = "minDelayTimelock")]
    pub min_delay_timelock: U256,
    /// The MATIC token contract
    #[serde(rename = "maticTokenAddress")]
    pub matic_token_address: Address,
    /// The rollup admin. This is not the proxy admin, so it is only reported
    /// alongside it
    #[serde(default)]
    pub admin: Option<Address>,
}

impl DeployParameters {
    /// Load the parameters from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, VerifierError> {
        read_json(path).map_err(VerifierError::ReadParameters)
    }
}

/// A Hardhat compilation artifact
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    /// The name of the compiled contract
    pub contract_name: String,
    /// The creation bytecode
    pub bytecode: Bytes,
    /// The runtime bytecode left on-chain after construction
    pub deployed_bytecode: Bytes,
}

impl ContractArtifact {
    /// Parse an artifact from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, VerifierError> {
        let artifact: Self = serde_json::from_str(json)
            .map_err(|e| VerifierError::ArtifactParsing(e.to_string()))?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Load an artifact from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, VerifierError> {
        let artifact: Self = read_json(path).map_err(VerifierError::ArtifactParsing)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Reject artifacts with no runtime code, e.g. those of interfaces or
    /// abstract contracts
    fn validate(&self) -> Result<(), VerifierError> {
        if self.deployed_bytecode.is_empty() {
            return Err(VerifierError::ArtifactParsing(format!(
                "artifact for {} has no deployed bytecode",
                self.contract_name
            )));
        }

        Ok(())
    }
}

/// The build artifacts every check compares against
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    /// `FflonkVerifier`
    pub fflonk_verifier: ContractArtifact,
    /// `PolygonZkEVMDeployer`
    pub zkevm_deployer: ContractArtifact,
    /// `PolygonZkEVMBridge`, the bridge implementation
    pub bridge: ContractArtifact,
    /// `PolygonZkEVMTimelock`
    pub timelock: ContractArtifact,
    /// `PolygonZkEVMGlobalExitRoot`, the global exit root implementation
    pub global_exit_root: ContractArtifact,
    /// `PolygonZkEVM`, the rollup implementation
    pub zkevm: ContractArtifact,
    /// `ProxyAdmin`
    pub proxy_admin: ContractArtifact,
    /// The project-compiled `TransparentUpgradeableProxy`
    pub transparent_proxy: ContractArtifact,
    /// The `TransparentUpgradeableProxy` shipped with the OpenZeppelin
    /// upgrades plugin
    pub upgrades_proxy: ContractArtifact,
}

impl ArtifactSet {
    /// Load every artifact from a Hardhat artifacts directory.
    ///
    /// The upgrades plugin's proxy artifact lives outside the artifacts
    /// directory; when no explicit path is given it is looked up in the
    /// `node_modules` directory next to it.
    pub fn load(
        artifacts_dir: &Path,
        upgrades_proxy_artifact: Option<&Path>,
    ) -> Result<Self, VerifierError> {
        let load = |relative: &str| ContractArtifact::from_file(&artifacts_dir.join(relative));

        let upgrades_proxy_path = upgrades_proxy_artifact
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_upgrades_proxy_path(artifacts_dir));

        Ok(Self {
            fflonk_verifier: load(FFLONK_VERIFIER_ARTIFACT)?,
            zkevm_deployer: load(ZKEVM_DEPLOYER_ARTIFACT)?,
            bridge: load(BRIDGE_ARTIFACT)?,
            timelock: load(TIMELOCK_ARTIFACT)?,
            global_exit_root: load(GLOBAL_EXIT_ROOT_ARTIFACT)?,
            zkevm: load(ZKEVM_ARTIFACT)?,
            proxy_admin: load(PROXY_ADMIN_ARTIFACT)?,
            transparent_proxy: load(TRANSPARENT_PROXY_ARTIFACT)?,
            upgrades_proxy: ContractArtifact::from_file(&upgrades_proxy_path)?,
        })
    }
}

/// The default location of the upgrades plugin's proxy artifact
fn default_upgrades_proxy_path(artifacts_dir: &Path) -> PathBuf {
    artifacts_dir.join(UPGRADES_PROXY_ARTIFACT)
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, b256};

    use super::*;

    /// A manifest in the format written by the deployment scripts
    const MANIFEST_JSON: &str = r#"{
        "polygonZkEVMAddress": "0x5132A183E9F3CB7C848b0AAC5Ae0c4f0491B7aB2",
        "polygonZkEVMBridgeAddress": "0x2a3DD3EB832aF982ec71669E178424b10Dca2EDe",
        "polygonZkEVMGlobalExitRootAddress": "0x580bda1e7A0CFAe92Fa7F6c20A3794F169CE3CFb",
        "polygonZkEVMDeployerAddress": "0xCB19eDdE626906eB1EE52357a27F62dd519608C2",
        "maticTokenAddress": "0x7D1AfA7B718fb893dB30A3aBc0Cfc608AaCfeBB0",
        "fflonkVerifierAddress": "0x4F9A0e7FD2Bf6067db6994CF12E4495Df938E6e9",
        "polygonZkEVMTimelockAddress": "0xEf1462451C30Ea7aD8555386226059Fe837CA4EF",
        "deploymentBlockNumber": 16896721,
        "genesisRoot": "0x3f86b09b43e3e49a41fc20a07579b79eba044253367817d5c241d23c0e2bc5c9"
    }"#;

    /// Deployment parameters with extra keys the verifier does not use
    const PARAMETERS_JSON: &str = r#"{
        "timelockAddress": "0x4c1665d6651ecEfa59B9B3041951608468b18891",
        "minDelayTimelock": 864000,
        "salt": "0x0000000000000000000000000000000000000000000000000000000000000000",
        "admin": "0x242daE44F5d8fb54B198D03a94dA45B5a4413e21",
        "trustedSequencer": "0x148Ee7dAF16574cD020aFa34CC658f8F3fbd2800",
        "forkID": 4,
        "chainID": 1101,
        "maticTokenAddress": "0x7D1AfA7B718fb893dB30A3aBc0Cfc608AaCfeBB0"
    }"#;

    #[test]
    fn test_parse_manifest() {
        let manifest: DeploymentManifest = serde_json::from_str(MANIFEST_JSON).unwrap();

        assert_eq!(
            manifest.bridge_address,
            address!("2a3DD3EB832aF982ec71669E178424b10Dca2EDe")
        );
        assert_eq!(
            manifest.genesis_root,
            b256!("3f86b09b43e3e49a41fc20a07579b79eba044253367817d5c241d23c0e2bc5c9")
        );
    }

    #[test]
    fn test_manifest_missing_role_fails() {
        let json = r#"{ "fflonkVerifierAddress": "0x4F9A0e7FD2Bf6067db6994CF12E4495Df938E6e9" }"#;
        assert!(serde_json::from_str::<DeploymentManifest>(json).is_err());
    }

    #[test]
    fn test_parse_parameters() {
        let parameters: DeployParameters = serde_json::from_str(PARAMETERS_JSON).unwrap();

        assert_eq!(parameters.chain_id, 1101);
        assert_eq!(parameters.fork_id, 4);
        assert_eq!(parameters.min_delay_timelock, U256::from(864000));
        assert_eq!(
            parameters.admin,
            Some(address!("242daE44F5d8fb54B198D03a94dA45B5a4413e21"))
        );
    }

    #[test]
    fn test_parse_hex_timelock_delay() {
        let json = PARAMETERS_JSON.replace("864000", r#""0xd2f00""#);
        let parameters: DeployParameters = serde_json::from_str(&json).unwrap();

        assert_eq!(parameters.min_delay_timelock, U256::from(864000));
    }

    #[test]
    fn test_timelock_delay_wider_than_u64() {
        let json = PARAMETERS_JSON.replace("864000", r#""0x10000000000000000""#);
        let parameters: DeployParameters = serde_json::from_str(&json).unwrap();

        assert_eq!(parameters.min_delay_timelock, U256::from(u64::MAX) + U256::from(1));
    }

    #[test]
    fn test_parameters_without_admin() {
        let json = r#"{
            "timelockAddress": "0x4c1665d6651ecEfa59B9B3041951608468b18891",
            "minDelayTimelock": 3600,
            "forkID": 4,
            "chainID": 1101,
            "maticTokenAddress": "0x7D1AfA7B718fb893dB30A3aBc0Cfc608AaCfeBB0"
        }"#;
        let parameters: DeployParameters = serde_json::from_str(json).unwrap();

        assert_eq!(parameters.admin, None);
    }

    #[test]
    fn test_parse_artifact() {
        let json = r#"{
            "_format": "hh-sol-artifact-1",
            "contractName": "ProxyAdmin",
            "sourceName": "@openzeppelin/contracts/proxy/transparent/ProxyAdmin.sol",
            "abi": [],
            "bytecode": "0x608060405234801561001057600080fd5b50",
            "deployedBytecode": "0x6080604052",
            "linkReferences": {},
            "deployedLinkReferences": {}
        }"#;

        let artifact = ContractArtifact::from_json(json).unwrap();
        assert_eq!(artifact.contract_name, "ProxyAdmin");
        assert_eq!(&artifact.deployed_bytecode[..], &[0x60, 0x80, 0x60, 0x40, 0x52]);
    }

    #[test]
    fn test_artifact_without_runtime_code_fails() {
        let json = r#"{
            "contractName": "IBasePolygonZkEVMGlobalExitRoot",
            "bytecode": "0x",
            "deployedBytecode": "0x"
        }"#;

        let err = ContractArtifact::from_json(json).unwrap_err();
        assert!(matches!(err, VerifierError::ArtifactParsing(_)));
    }

    #[test]
    fn test_artifact_with_bad_hex_fails() {
        let json = r#"{ "contractName": "X", "bytecode": "0x60", "deployedBytecode": "0xzz" }"#;
        assert!(ContractArtifact::from_json(json).is_err());
    }

    #[test]
    fn test_missing_manifest_file_is_read_error() {
        let err = DeploymentManifest::from_file(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, VerifierError::ReadManifest(_)));
        assert!(!err.is_mismatch());
    }

    #[test]
    fn test_default_upgrades_proxy_path() {
        let path = default_upgrades_proxy_path(Path::new("artifacts"));
        assert!(path.starts_with("artifacts/../node_modules/@openzeppelin/upgrades-core"));
    }
}
