use crate::chain::ChainQuery;
use crate::errors::EstimationError;
use crate::models::GasEstimate;
use alloy::primitives::{Address, U256};
use tracing::instrument;

/// Total wei the wallet must hold: projected gas cost plus the value being
/// transferred.
pub fn required_cost(estimate: &GasEstimate, transfer_value: U256) -> U256 {
    estimate.total_cost() + transfer_value
}

/// Check that the wallet can cover `required`. Exact equality passes. The
/// only side effect is the balance query itself.
#[instrument(skip(chain))]
pub async fn ensure_funds<C: ChainQuery + ?Sized>(
    chain: &C,
    safe: Address,
    required: U256,
) -> Result<(), EstimationError> {
    let available = chain.native_balance(safe).await?;
    if available < required {
        return Err(EstimationError::InsufficientBalance { required, available });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::testing::{StaticChain, UnreachableChain};

    #[tokio::test]
    async fn shortfall_fails_with_both_amounts() {
        let chain = StaticChain { balance: U256::from(999u64), ..Default::default() };
        let err = ensure_funds(&chain, Address::ZERO, U256::from(1_000u64))
            .await
            .unwrap_err();
        match err {
            EstimationError::InsufficientBalance { required, available } => {
                assert_eq!(required, U256::from(1_000u64));
                assert_eq!(available, U256::from(999u64));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn exact_balance_passes() {
        let chain = StaticChain { balance: U256::from(1_000u64), ..Default::default() };
        ensure_funds(&chain, Address::ZERO, U256::from(1_000u64)).await.unwrap();
    }

    #[tokio::test]
    async fn surplus_passes() {
        let chain = StaticChain { balance: U256::from(2_000u64), ..Default::default() };
        ensure_funds(&chain, Address::ZERO, U256::from(1_000u64)).await.unwrap();
    }

    #[tokio::test]
    async fn balance_query_failure_is_a_network_error() {
        let err = ensure_funds(&UnreachableChain, Address::ZERO, U256::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, EstimationError::Network(_)));
    }

    #[test]
    fn required_cost_adds_transfer_value() {
        let estimate = GasEstimate { safe_tx_gas: 10, base_gas: 5, gas_price: 4 };
        assert_eq!(
            required_cost(&estimate, U256::from(100u64)),
            U256::from(15u64 * 4 + 100)
        );
    }
}
