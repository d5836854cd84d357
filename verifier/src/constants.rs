//! Constants used by the deployment verifier

use alloy::primitives::{b256, B256};

/// The storage slot containing the proxy admin address in a transparent proxy.
///
/// This is specified in EIP1967: https://eips.ethereum.org/EIPS/eip-1967#admin-address
pub const PROXY_ADMIN_STORAGE_SLOT: B256 =
    b256!("b53127684a568b3173ae13b9f8a6016e243e63b6e8ee1178d6a717850b5d6103");

/// The storage slot containing the implementation address in a transparent proxy.
///
/// This is specified in EIP1967: https://eips.ethereum.org/EIPS/eip-1967#logic-contract-address
pub const PROXY_IMPLEMENTATION_STORAGE_SLOT: B256 =
    b256!("360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc");

/// The number of bytes stored in a single storage slot
pub const NUM_BYTES_STORAGE_SLOT: usize = 32;

/// The number of bytes in an Ethereum address
pub const NUM_BYTES_ADDRESS: usize = 20;

/// The batch number whose state root is recorded as the genesis root
pub const GENESIS_BATCH_NUM: u64 = 0;

/// The default hostport of a local Anvil / Hardhat node
pub const DEFAULT_LOCAL_RPC_URL: &str = "http://127.0.0.1:8545";

/// The first default account of an Anvil / Hardhat node, used for the
/// throwaway local deployments
pub const DEFAULT_LOCAL_PKEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// The default path of the deployment manifest
pub const DEFAULT_MANIFEST_PATH: &str = "deployment/mainnetDeployment.json";

/// The default path of the deployment parameters file
pub const DEFAULT_PARAMETERS_PATH: &str = "deployment/mainnetDeployParameters.json";

/// The default Hardhat artifacts directory
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

// -------------------
// | ARTIFACT PATHS  |
// -------------------

/// Path of the `FflonkVerifier` artifact, relative to the artifacts directory
pub const FFLONK_VERIFIER_ARTIFACT: &str =
    "contracts/verifiers/FflonkVerifier.sol/FflonkVerifier.json";

/// Path of the `PolygonZkEVMDeployer` artifact, relative to the artifacts directory
pub const ZKEVM_DEPLOYER_ARTIFACT: &str =
    "contracts/deployment/PolygonZkEVMDeployer.sol/PolygonZkEVMDeployer.json";

/// Path of the `PolygonZkEVMBridge` artifact, relative to the artifacts directory
pub const BRIDGE_ARTIFACT: &str = "contracts/PolygonZkEVMBridge.sol/PolygonZkEVMBridge.json";

/// Path of the `PolygonZkEVMTimelock` artifact, relative to the artifacts directory
pub const TIMELOCK_ARTIFACT: &str = "contracts/PolygonZkEVMTimelock.sol/PolygonZkEVMTimelock.json";

/// Path of the `PolygonZkEVMGlobalExitRoot` artifact, relative to the artifacts directory
pub const GLOBAL_EXIT_ROOT_ARTIFACT: &str =
    "contracts/PolygonZkEVMGlobalExitRoot.sol/PolygonZkEVMGlobalExitRoot.json";

/// Path of the `PolygonZkEVM` artifact, relative to the artifacts directory
pub const ZKEVM_ARTIFACT: &str = "contracts/PolygonZkEVM.sol/PolygonZkEVM.json";

/// Path of the `ProxyAdmin` artifact, relative to the artifacts directory
pub const PROXY_ADMIN_ARTIFACT: &str =
    "@openzeppelin/contracts/proxy/transparent/ProxyAdmin.sol/ProxyAdmin.json";

/// Path of the project-compiled `TransparentUpgradeableProxy` artifact,
/// relative to the artifacts directory
pub const TRANSPARENT_PROXY_ARTIFACT: &str =
    "@openzeppelin/contracts/proxy/transparent/TransparentUpgradeableProxy.sol/TransparentUpgradeableProxy.json";

/// Path of the `TransparentUpgradeableProxy` artifact shipped with the
/// OpenZeppelin upgrades plugin, relative to the artifacts directory.
///
/// The proxies deployed through the upgrades plugin use this build rather
/// than the project-compiled one.
pub const UPGRADES_PROXY_ARTIFACT: &str =
    "../node_modules/@openzeppelin/upgrades-core/artifacts/@openzeppelin/contracts/proxy/transparent/TransparentUpgradeableProxy.sol/TransparentUpgradeableProxy.json";

// ---------------
// | CHECK NAMES |
// ---------------

/// Name of the `FflonkVerifier` bytecode check
pub const FFLONK_VERIFIER_CHECK: &str = "fflonk-verifier";
/// Name of the `PolygonZkEVMDeployer` bytecode check
pub const ZKEVM_DEPLOYER_CHECK: &str = "zkevm-deployer";
/// Name of the bridge implementation bytecode check
pub const BRIDGE_IMPLEMENTATION_CHECK: &str = "bridge-implementation";
/// Name of the bridge proxy bytecode check
pub const BRIDGE_PROXY_CHECK: &str = "bridge-proxy";
/// Name of the timelock bytecode check
pub const TIMELOCK_CHECK: &str = "timelock";
/// Name of the global exit root implementation bytecode check
pub const GLOBAL_EXIT_ROOT_IMPLEMENTATION_CHECK: &str = "global-exit-root-implementation";
/// Name of the global exit root proxy bytecode check
pub const GLOBAL_EXIT_ROOT_PROXY_CHECK: &str = "global-exit-root-proxy";
/// Name of the zkEVM implementation bytecode check
pub const ZKEVM_IMPLEMENTATION_CHECK: &str = "zkevm-implementation";
/// Name of the zkEVM proxy bytecode check
pub const ZKEVM_PROXY_CHECK: &str = "zkevm-proxy";
/// Name of the shared proxy admin check
pub const PROXY_ADMIN_CHECK: &str = "proxy-admin";
/// Name of the genesis root check
pub const GENESIS_ROOT_CHECK: &str = "genesis-root";
