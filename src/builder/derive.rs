use crate::constants::SAFE_PROXY_INIT_CODE_HASH;
use alloy::primitives::{keccak256, Address, B256};
use alloy::sol_types::SolValue;

/// CREATE2 address: keccak256(0xff ++ deployer ++ salt ++ initCodeHash)[12..].
pub fn create2_address(deployer: Address, salt: B256, init_code_hash: B256) -> Address {
    deployer.create2(salt, init_code_hash)
}

/// Predict the wallet proxy address the factory would deploy for `owner`.
/// The salt is the keccak of the ABI-encoded owner, so the prediction is
/// stable before the wallet exists on chain.
pub fn derive_safe_address(owner: Address, proxy_factory: Address) -> Address {
    let salt = keccak256(owner.abi_encode());
    create2_address(proxy_factory, salt, SAFE_PROXY_INIT_CODE_HASH)
}
