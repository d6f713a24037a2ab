use crate::chain::ChainQuery;
use crate::errors::EstimationError;
use tracing::{debug, instrument};

/// Derive a competitive gas price from the most recent block: priority-fee
/// reward at the configured percentile plus the base fee, with a 10% buffer
/// on top. Computed fresh on every call; stale prices risk a stuck or
/// overpaying transaction.
#[instrument(skip(chain))]
pub async fn current_gas_price<C: ChainQuery + ?Sized>(
    chain: &C,
    reward_percentile: f64,
) -> Result<u128, EstimationError> {
    let sample = chain
        .sample_fees(reward_percentile)
        .await
        .map_err(EstimationError::FeeQueryFailed)?;

    let competitive = sample.priority_fee_reward + sample.base_fee_per_gas;
    // round half up; the buffer never collapses to zero
    let buffer = ((competitive + 5) / 10).max(1);
    let gas_price = competitive + buffer;

    debug!(
        base_fee = sample.base_fee_per_gas,
        reward = sample.priority_fee_reward,
        gas_price,
        "derived gas price"
    );
    Ok(gas_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::testing::{StaticChain, UnreachableChain};
    use crate::chain::FeeSample;

    #[tokio::test]
    async fn buffers_the_observed_fee_by_ten_percent() {
        let chain = StaticChain {
            fees: FeeSample {
                base_fee_per_gas: 20_000_000_000,
                priority_fee_reward: 1_000_000_000,
            },
            ..Default::default()
        };

        let gas_price = current_gas_price(&chain, 50.0).await.unwrap();
        assert_eq!(gas_price, 23_100_000_000);
    }

    #[tokio::test]
    async fn output_exceeds_observed_fee_for_positive_inputs() {
        for (base, reward) in [(1u128, 1u128), (3, 4), (9, 0), (7_000, 300)] {
            let chain = StaticChain {
                fees: FeeSample { base_fee_per_gas: base, priority_fee_reward: reward },
                ..Default::default()
            };
            let gas_price = current_gas_price(&chain, 50.0).await.unwrap();
            assert!(gas_price > base + reward, "no buffer for base={base} reward={reward}");
        }
    }

    #[tokio::test]
    async fn transport_failure_maps_to_fee_query_failed() {
        let err = current_gas_price(&UnreachableChain, 50.0).await.unwrap_err();
        assert!(matches!(err, EstimationError::FeeQueryFailed(_)));
    }
}
