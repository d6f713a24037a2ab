use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a call leg is executed from the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Call = 0,
    DelegateCall = 1,
}

impl OperationType {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(OperationType::Call),
            1 => Some(OperationType::DelegateCall),
            _ => None,
        }
    }
}

/// One call leg as supplied by the caller. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTransaction {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub operation: OperationType,
}

/// Gas parameters computed for a single relay attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasEstimate {
    pub safe_tx_gas: u64,
    pub base_gas: u64,
    pub gas_price: u128,
}

impl GasEstimate {
    /// Total wei the wallet pays for gas: `(safeTxGas + baseGas) * gasPrice`.
    pub fn total_cost(&self) -> U256 {
        U256::from(self.safe_tx_gas as u128 + self.base_gas as u128)
            * U256::from(self.gas_price)
    }
}

/// A fully parameterized wallet transaction, ready to be signed and relayed.
///
/// Built once per relay attempt and handed off; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeTransaction {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub operation: OperationType,
    pub safe_tx_gas: u64,
    pub base_gas: u64,
    pub gas_price: u128,
    pub gas_token: Address,
    pub refund_receiver: Address,
    pub nonce: U256,
}

impl SafeTransaction {
    pub fn gas_estimate(&self) -> GasEstimate {
        GasEstimate {
            safe_tx_gas: self.safe_tx_gas,
            base_gas: self.base_gas,
            gas_price: self.gas_price,
        }
    }

    pub fn total_gas_cost(&self) -> U256 {
        self.gas_estimate().total_cost()
    }

    /// Render the relay envelope. Numeric gas fields become decimal strings,
    /// addresses are checksummed, `data` is 0x-prefixed hex. The signature
    /// bytes are produced elsewhere and passed in by the caller.
    pub fn into_relay_request(self, signatures: impl Into<String>) -> RelayTransactionRequest {
        RelayTransactionRequest {
            to: self.to.to_string(),
            value: self.value.to_string(),
            data: self.data.to_string(),
            operation: self.operation.as_u8(),
            safe_tx_gas: self.safe_tx_gas.to_string(),
            base_gas: self.base_gas.to_string(),
            gas_price: self.gas_price.to_string(),
            gas_token: self.gas_token.to_string(),
            refund_receiver: self.refund_receiver.to_string(),
            nonce: self.nonce.to_string(),
            signatures: signatures.into(),
        }
    }
}

/// Wire DTO submitted to the relayer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RelayTransactionRequest {
    pub to: String,
    pub value: String,
    pub data: String,
    pub operation: u8,
    pub safe_tx_gas: String,
    pub base_gas: String,
    pub gas_price: String,
    pub gas_token: String,
    pub refund_receiver: String,
    pub nonce: String,
    pub signatures: String,
}

/// Which estimation path the builder takes. A caller decision, never
/// auto-selected and never fallen back from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimationStrategy {
    /// Chain-level `eth_estimateGas` per leg. Requires every target contract
    /// to be deployed.
    Direct,
    /// Accessor-based simulation. Tolerates an undeployed wallet, so it is
    /// the usual choice for first-time transactions.
    Simulation,
}

/// Caller input for one relay attempt.
#[derive(Debug, Clone)]
pub struct SafeTransactionArgs {
    pub safe: Address,
    pub transactions: Vec<MetaTransaction>,
    pub nonce: U256,
    /// Whether the wallet contract exists on chain, as reported by the
    /// relayer. Only consulted by the simulation strategy.
    pub deployed: bool,
    pub strategy: EstimationStrategy,
}

/// Lifecycle states a submitted transaction moves through on the relayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayerTransactionState {
    New,
    Executed,
    Mined,
    Invalid,
    Confirmed,
    Failed,
}

impl RelayerTransactionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelayerTransactionState::New => "STATE_NEW",
            RelayerTransactionState::Executed => "STATE_EXECUTED",
            RelayerTransactionState::Mined => "STATE_MINED",
            RelayerTransactionState::Invalid => "STATE_INVALID",
            RelayerTransactionState::Confirmed => "STATE_CONFIRMED",
            RelayerTransactionState::Failed => "STATE_FAILED",
        }
    }
}

impl FromStr for RelayerTransactionState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STATE_NEW" => Ok(RelayerTransactionState::New),
            "STATE_EXECUTED" => Ok(RelayerTransactionState::Executed),
            "STATE_MINED" => Ok(RelayerTransactionState::Mined),
            "STATE_INVALID" => Ok(RelayerTransactionState::Invalid),
            "STATE_CONFIRMED" => Ok(RelayerTransactionState::Confirmed),
            "STATE_FAILED" => Ok(RelayerTransactionState::Failed),
            _ => Err(()),
        }
    }
}
