//! Definitions of the Solidity interfaces and constructors used during verification

use alloy::{
    primitives::Bytes,
    sol,
    sol_types::SolConstructor,
};

use crate::types::{DeployParameters, DeploymentManifest};

sol! {
    /// The rollup contract, of which only the state root lookup is needed
    #[sol(rpc)]
    interface IPolygonZkEVM {
        function batchNumToStateRoot(uint64 batchNum) external view returns (bytes32 root);
    }

    contract PolygonZkEVMTimelock {
        constructor(
            uint256 minDelay,
            address[] proposers,
            address[] executors,
            address admin,
            address polygonZkEVM
        );
    }

    contract PolygonZkEVMGlobalExitRoot {
        constructor(address rollupAddress, address bridgeAddress);
    }

    contract PolygonZkEVM {
        constructor(
            address globalExitRootManager,
            address matic,
            address rollupVerifier,
            address bridgeAddress,
            uint64 chainID,
            uint64 forkID
        );
    }
}

/// Append the ABI-encoded constructor arguments to a contract's creation bytecode
pub fn init_code<C: SolConstructor>(creation_bytecode: &Bytes, constructor: &C) -> Bytes {
    [&creation_bytecode[..], &constructor.abi_encode()[..]].concat().into()
}

/// The constructor arguments the timelock was deployed with.
///
/// The timelock address serves as the sole proposer, the sole executor and the
/// admin; none of these are stored in the runtime code, only the rollup
/// address is.
pub fn timelock_constructor(
    manifest: &DeploymentManifest,
    parameters: &DeployParameters,
) -> PolygonZkEVMTimelock::constructorCall {
    PolygonZkEVMTimelock::constructorCall {
        minDelay: parameters.min_delay_timelock,
        proposers: vec![parameters.timelock_address],
        executors: vec![parameters.timelock_address],
        admin: parameters.timelock_address,
        polygonZkEVM: manifest.zkevm_address,
    }
}

/// The constructor arguments the global exit root implementation was deployed with
pub fn global_exit_root_constructor(
    manifest: &DeploymentManifest,
) -> PolygonZkEVMGlobalExitRoot::constructorCall {
    PolygonZkEVMGlobalExitRoot::constructorCall {
        rollupAddress: manifest.zkevm_address,
        bridgeAddress: manifest.bridge_address,
    }
}

/// The constructor arguments the rollup implementation was deployed with
pub fn zkevm_constructor(
    manifest: &DeploymentManifest,
    parameters: &DeployParameters,
) -> PolygonZkEVM::constructorCall {
    PolygonZkEVM::constructorCall {
        globalExitRootManager: manifest.global_exit_root_address,
        matic: parameters.matic_token_address,
        rollupVerifier: manifest.fflonk_verifier_address,
        bridgeAddress: manifest.bridge_address,
        chainID: parameters.chain_id,
        forkID: parameters.fork_id,
    }
}
