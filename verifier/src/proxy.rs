//! Resolution of the addresses stored in a transparent proxy's EIP-1967 slots

use alloy::primitives::{Address, B256};

use crate::{
    chain::ChainReader,
    constants::{
        NUM_BYTES_ADDRESS, NUM_BYTES_STORAGE_SLOT, PROXY_ADMIN_STORAGE_SLOT,
        PROXY_IMPLEMENTATION_STORAGE_SLOT,
    },
    errors::VerifierError,
};

/// Extract the right-aligned address from a storage word.
///
/// The leading 12 bytes are discarded without being checked, a slot that does
/// not hold an address yields an arbitrary address.
pub fn address_from_word(word: B256) -> Address {
    Address::from_slice(&word[NUM_BYTES_STORAGE_SLOT - NUM_BYTES_ADDRESS..NUM_BYTES_STORAGE_SLOT])
}

/// Read the address held in the given slot of the given proxy
pub async fn read_address_slot(
    chain: &impl ChainReader,
    proxy: Address,
    slot: B256,
) -> Result<Address, VerifierError> {
    let word = chain.storage_at(proxy, slot).await?;
    Ok(address_from_word(word))
}

/// Read the implementation address of the given proxy
pub async fn implementation_address(
    chain: &impl ChainReader,
    proxy: Address,
) -> Result<Address, VerifierError> {
    read_address_slot(chain, proxy, PROXY_IMPLEMENTATION_STORAGE_SLOT).await
}

/// Read the admin address of the given proxy
pub async fn admin_address(
    chain: &impl ChainReader,
    proxy: Address,
) -> Result<Address, VerifierError> {
    read_address_slot(chain, proxy, PROXY_ADMIN_STORAGE_SLOT).await
}
