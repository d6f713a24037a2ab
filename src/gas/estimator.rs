use crate::chain::ChainQuery;
use crate::errors::EstimationError;
use crate::models::MetaTransaction;
use alloy::primitives::Address;
use tracing::{debug, instrument};

/// Estimate execution gas by asking the node to simulate each leg and
/// summing the results. Every target contract must already be deployed;
/// estimating against missing code fails and is propagated, not retried.
/// Callers that cannot meet that requirement use the simulation estimator
/// instead.
#[instrument(skip(chain, transactions), fields(legs = transactions.len()))]
pub async fn estimate_gas<C: ChainQuery + ?Sized>(
    chain: &C,
    from: Address,
    transactions: &[MetaTransaction],
) -> Result<u64, EstimationError> {
    let mut total: u64 = 0;
    for tx in transactions {
        let gas = chain
            .estimate_call_gas(from, tx.to, tx.value, tx.data.clone())
            .await
            .map_err(EstimationError::GasEstimationFailed)?;
        total = total.saturating_add(gas);
    }

    debug!(total, "estimated execution gas");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::testing::{StaticChain, UnreachableChain};
    use crate::models::OperationType;
    use alloy::primitives::{Bytes, U256};

    fn leg(to_byte: u8) -> MetaTransaction {
        MetaTransaction {
            to: Address::repeat_byte(to_byte),
            value: U256::ZERO,
            data: Bytes::new(),
            operation: OperationType::Call,
        }
    }

    #[tokio::test]
    async fn sums_gas_across_legs() {
        let chain = StaticChain { gas_per_leg: 40_000, ..Default::default() };
        let total = estimate_gas(&chain, Address::ZERO, &[leg(0x11), leg(0x22), leg(0x33)])
            .await
            .unwrap();
        assert_eq!(total, 120_000);
    }

    #[tokio::test]
    async fn empty_batch_estimates_to_zero() {
        let chain = StaticChain::default();
        assert_eq!(estimate_gas(&chain, Address::ZERO, &[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn leg_failure_maps_to_gas_estimation_failed() {
        let err = estimate_gas(&UnreachableChain, Address::ZERO, &[leg(0x11)])
            .await
            .unwrap_err();
        assert!(matches!(err, EstimationError::GasEstimationFailed(_)));
    }
}
