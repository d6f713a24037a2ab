//! Relayer REST paths.

use alloy::primitives::Address;

pub const GET_TRANSACTION: &str = "/v1/transactions";

/// Wallet-scoped submission endpoint.
pub fn transactions(safe: &Address) -> String {
    format!("/v1/safes/{safe}/transactions")
}

pub fn deployed(safe: &Address) -> String {
    format!("/v1/safes/{safe}/deployed")
}

pub fn nonce(safe: &Address) -> String {
    format!("/v1/safes/{safe}/nonce")
}
