//! The chain capabilities the verifier depends on, and their RPC-backed
//! implementations
//!
//! The verified chain is only ever read. Contracts whose runtime code embeds
//! constructor arguments are deployed to a separate local chain, whose
//! resulting runtime code is then compared against the verified chain.

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, B256, U256},
    providers::{DynProvider, Provider},
    rpc::types::TransactionRequest,
};
use tracing::debug;

use crate::{errors::VerifierError, solidity::IPolygonZkEVM};

/// Read access to the chain being verified
#[allow(async_fn_in_trait)]
pub trait ChainReader {
    /// Fetch the runtime code stored at the given address
    async fn code_at(&self, address: Address) -> Result<Bytes, VerifierError>;

    /// Fetch the 32-byte word stored at the given slot of the given contract
    async fn storage_at(&self, address: Address, slot: B256) -> Result<B256, VerifierError>;

    /// Call `batchNumToStateRoot` on the rollup contract at the given address
    async fn batch_state_root(&self, rollup: Address, batch_num: u64)
        -> Result<B256, VerifierError>;
}

/// Deploys throwaway contract instances to a local chain
#[allow(async_fn_in_trait)]
pub trait LocalDeployer {
    /// Deploy the given init code (creation bytecode followed by the encoded
    /// constructor arguments) and return the resulting runtime code
    async fn deploy(&self, init_code: Bytes) -> Result<Bytes, VerifierError>;
}

impl<T: ChainReader> ChainReader for &T {
    async fn code_at(&self, address: Address) -> Result<Bytes, VerifierError> {
        (**self).code_at(address).await
    }

    async fn storage_at(&self, address: Address, slot: B256) -> Result<B256, VerifierError> {
        (**self).storage_at(address, slot).await
    }

    async fn batch_state_root(
        &self,
        rollup: Address,
        batch_num: u64,
    ) -> Result<B256, VerifierError> {
        (**self).batch_state_root(rollup, batch_num).await
    }
}

impl<T: LocalDeployer> LocalDeployer for &T {
    async fn deploy(&self, init_code: Bytes) -> Result<Bytes, VerifierError> {
        (**self).deploy(init_code).await
    }
}

// ---------------------
// | RPC-BACKED CHAINS |
// ---------------------

/// A [`ChainReader`] backed by a JSON-RPC provider
#[derive(Clone)]
pub struct RpcChain {
    /// The provider for the verified chain
    provider: DynProvider,
}

impl RpcChain {
    /// Wrap a provider for the verified chain
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }
}

impl ChainReader for RpcChain {
    async fn code_at(&self, address: Address) -> Result<Bytes, VerifierError> {
        self.provider
            .get_code_at(address)
            .await
            .map_err(|e| VerifierError::ChainRead(format!("code at {address}: {e}")))
    }

    async fn storage_at(&self, address: Address, slot: B256) -> Result<B256, VerifierError> {
        let word = self
            .provider
            .get_storage_at(address, U256::from_be_bytes(slot.0))
            .await
            .map_err(|e| VerifierError::ChainRead(format!("slot {slot} of {address}: {e}")))?;

        Ok(B256::from(word.to_be_bytes::<32>()))
    }

    async fn batch_state_root(
        &self,
        rollup: Address,
        batch_num: u64,
    ) -> Result<B256, VerifierError> {
        let rollup_contract = IPolygonZkEVM::new(rollup, self.provider.clone());
        let root = rollup_contract
            .batchNumToStateRoot(batch_num)
            .call()
            .await
            .map_err(|e| VerifierError::ContractInteraction(e.to_string()))?
            .root;

        Ok(root)
    }
}

/// A [`LocalDeployer`] backed by a JSON-RPC provider with a wallet attached
#[derive(Clone)]
pub struct RpcDeployer {
    /// The provider for the local chain, able to sign transactions
    provider: DynProvider,
}

impl RpcDeployer {
    /// Wrap a wallet-equipped provider for the local chain
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }
}

impl LocalDeployer for RpcDeployer {
    async fn deploy(&self, init_code: Bytes) -> Result<Bytes, VerifierError> {
        let tx = TransactionRequest::default().with_deploy_code(init_code);

        let receipt = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| VerifierError::ContractDeployment(e.to_string()))?
            .get_receipt()
            .await
            .map_err(|e| VerifierError::ContractDeployment(e.to_string()))?;

        if !receipt.status() {
            return Err(VerifierError::ContractDeployment(format!(
                "deployment transaction {} reverted",
                receipt.transaction_hash
            )));
        }

        let address = receipt.contract_address.ok_or_else(|| {
            VerifierError::ContractDeployment("receipt has no contract address".to_string())
        })?;
        debug!("deployed local instance at {address:#x}");

        self.provider
            .get_code_at(address)
            .await
            .map_err(|e| VerifierError::ContractDeployment(e.to_string()))
    }
}
