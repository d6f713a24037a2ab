use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, U256},
    providers::Provider,
    rpc::types::TransactionRequest,
};
use alloy::eips::BlockNumberOrTag;
use async_trait::async_trait;
use thiserror::Error;

/// Fee-market data for one historical block at a chosen reward percentile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSample {
    pub base_fee_per_gas: u128,
    pub priority_fee_reward: u128,
}

/// Result of a non-mutating call. A revert is a value here, not an error:
/// the simulation path relies on the revert payload being observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Success(Bytes),
    Revert(Bytes),
}

/// A transport-level RPC failure. Anything more specific is assigned by the
/// component that issued the query.
#[derive(Debug, Error)]
#[error("chain query failed: {0}")]
pub struct ChainQueryError(String);

impl ChainQueryError {
    pub fn new(msg: impl Into<String>) -> Self {
        ChainQueryError(msg.into())
    }

    pub(crate) fn transport(err: impl std::fmt::Display) -> Self {
        ChainQueryError(err.to_string())
    }
}

/// The chain primitives this crate consumes. Kept deliberately narrow so the
/// estimation pipeline can be driven by any RPC client, or by a test double.
#[async_trait]
pub trait ChainQuery: Send + Sync {
    /// Fee history for the most recent block at the given reward percentile.
    async fn sample_fees(&self, reward_percentile: f64) -> Result<FeeSample, ChainQueryError>;

    /// Native-token balance of an account.
    async fn native_balance(&self, address: Address) -> Result<U256, ChainQueryError>;

    /// `eth_estimateGas` for a single call leg.
    async fn estimate_call_gas(
        &self,
        from: Address,
        to: Address,
        value: U256,
        data: Bytes,
    ) -> Result<u64, ChainQueryError>;

    /// Execute a non-mutating call, surfacing a revert as [`CallOutcome::Revert`].
    async fn simulate_call(&self, to: Address, data: Bytes) -> Result<CallOutcome, ChainQueryError>;
}

/// Adapter from an alloy [`Provider`] to [`ChainQuery`].
#[derive(Debug, Clone)]
pub struct RpcChain<P> {
    provider: P,
}

impl<P> RpcChain<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P> ChainQuery for RpcChain<P>
where
    P: Provider + Send + Sync,
{
    async fn sample_fees(&self, reward_percentile: f64) -> Result<FeeSample, ChainQueryError> {
        let history = self
            .provider
            .get_fee_history(1, BlockNumberOrTag::Latest, &[reward_percentile])
            .await
            .map_err(ChainQueryError::transport)?;

        let base_fee_per_gas = history
            .latest_block_base_fee()
            .ok_or_else(|| ChainQueryError::new("fee history carried no base fee"))?;
        let priority_fee_reward = history
            .reward
            .as_ref()
            .and_then(|blocks| blocks.first())
            .and_then(|percentiles| percentiles.first())
            .copied()
            .ok_or_else(|| ChainQueryError::new("fee history carried no reward"))?;

        Ok(FeeSample { base_fee_per_gas, priority_fee_reward })
    }

    async fn native_balance(&self, address: Address) -> Result<U256, ChainQueryError> {
        self.provider
            .get_balance(address)
            .await
            .map_err(ChainQueryError::transport)
    }

    async fn estimate_call_gas(
        &self,
        from: Address,
        to: Address,
        value: U256,
        data: Bytes,
    ) -> Result<u64, ChainQueryError> {
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(to)
            .with_value(value)
            .with_input(data);
        self.provider
            .estimate_gas(tx)
            .await
            .map_err(ChainQueryError::transport)
    }

    async fn simulate_call(&self, to: Address, data: Bytes) -> Result<CallOutcome, ChainQueryError> {
        let tx = TransactionRequest::default().with_to(to).with_input(data);
        match self.provider.call(tx).await {
            Ok(ret) => Ok(CallOutcome::Success(ret)),
            Err(err) => {
                // A revert comes back as a JSON-RPC error response carrying
                // the revert data; only errors without one are transport
                // failures.
                if let Some(payload) = err.as_error_resp().and_then(|resp| resp.as_revert_data()) {
                    Ok(CallOutcome::Revert(payload))
                } else {
                    Err(ChainQueryError::transport(err))
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Canned-response chain for driving the pipeline without a node.
    pub(crate) struct StaticChain {
        pub fees: FeeSample,
        pub balance: U256,
        pub gas_per_leg: u64,
        pub call_outcome: Option<CallOutcome>,
    }

    impl Default for StaticChain {
        fn default() -> Self {
            Self {
                fees: FeeSample { base_fee_per_gas: 0, priority_fee_reward: 0 },
                balance: U256::ZERO,
                gas_per_leg: 21_000,
                call_outcome: None,
            }
        }
    }

    #[async_trait]
    impl ChainQuery for StaticChain {
        async fn sample_fees(&self, _reward_percentile: f64) -> Result<FeeSample, ChainQueryError> {
            Ok(self.fees)
        }

        async fn native_balance(&self, _address: Address) -> Result<U256, ChainQueryError> {
            Ok(self.balance)
        }

        async fn estimate_call_gas(
            &self,
            _from: Address,
            _to: Address,
            _value: U256,
            _data: Bytes,
        ) -> Result<u64, ChainQueryError> {
            Ok(self.gas_per_leg)
        }

        async fn simulate_call(
            &self,
            _to: Address,
            _data: Bytes,
        ) -> Result<CallOutcome, ChainQueryError> {
            self.call_outcome
                .clone()
                .ok_or_else(|| ChainQueryError::new("node unreachable"))
        }
    }

    /// Chain whose every query fails, for exercising error mapping.
    pub(crate) struct UnreachableChain;

    #[async_trait]
    impl ChainQuery for UnreachableChain {
        async fn sample_fees(&self, _reward_percentile: f64) -> Result<FeeSample, ChainQueryError> {
            Err(ChainQueryError::new("node unreachable"))
        }

        async fn native_balance(&self, _address: Address) -> Result<U256, ChainQueryError> {
            Err(ChainQueryError::new("node unreachable"))
        }

        async fn estimate_call_gas(
            &self,
            _from: Address,
            _to: Address,
            _value: U256,
            _data: Bytes,
        ) -> Result<u64, ChainQueryError> {
            Err(ChainQueryError::new("node unreachable"))
        }

        async fn simulate_call(
            &self,
            _to: Address,
            _data: Bytes,
        ) -> Result<CallOutcome, ChainQueryError> {
            Err(ChainQueryError::new("node unreachable"))
        }
    }
}
