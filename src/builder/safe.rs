use crate::chain::ChainQuery;
use crate::config::{ContractConfig, GasConfig};
use crate::encode::multisend::aggregate_transactions;
use crate::errors::EstimationError;
use crate::gas::{current_gas_price, estimate_gas, estimate_gas_via_simulation, SimulationArgs};
use crate::models::{EstimationStrategy, SafeTransaction, SafeTransactionArgs};
use alloy::primitives::Address;
use tracing::{debug, instrument};

/// Assemble a fully parameterized wallet transaction for one relay attempt.
///
/// Single pass, no retained state: the batch is reduced to one effective
/// call, execution gas comes from the caller-chosen strategy, the gas price
/// from current fee history, and base gas from configuration. Gas token and
/// refund receiver stay at the zero address, meaning native-token refunds to
/// the transaction origin.
#[instrument(skip_all, fields(safe = %args.safe, nonce = %args.nonce, strategy = ?args.strategy))]
pub async fn build_safe_transaction<C: ChainQuery + ?Sized>(
    chain: &C,
    args: &SafeTransactionArgs,
    contracts: &ContractConfig,
    gas: &GasConfig,
) -> Result<SafeTransaction, EstimationError> {
    let effective = aggregate_transactions(&args.transactions, contracts.multi_send)?;

    let safe_tx_gas = match args.strategy {
        EstimationStrategy::Direct => estimate_gas(chain, args.safe, &args.transactions).await?,
        EstimationStrategy::Simulation => {
            estimate_gas_via_simulation(
                chain,
                &SimulationArgs {
                    safe: args.safe,
                    transactions: &args.transactions,
                    multi_send: contracts.multi_send,
                    singleton: contracts.safe_singleton,
                    accessor: contracts.simulate_tx_accessor,
                    deployed: args.deployed,
                },
            )
            .await?
        }
    };

    let gas_price = current_gas_price(chain, gas.reward_percentile).await?;

    debug!(safe_tx_gas, gas_price, "assembled gas parameters");

    Ok(SafeTransaction {
        to: effective.to,
        value: effective.value,
        data: effective.data,
        operation: effective.operation,
        safe_tx_gas,
        base_gas: gas.base_gas,
        gas_price,
        gas_token: Address::ZERO,
        refund_receiver: Address::ZERO,
        nonce: args.nonce,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::testing::StaticChain;
    use crate::chain::{CallOutcome, FeeSample};
    use crate::models::{MetaTransaction, OperationType};
    use alloy::primitives::{Bytes, U256};

    fn contracts() -> ContractConfig {
        ContractConfig {
            safe_singleton: Address::repeat_byte(0x01),
            multi_send: Address::repeat_byte(0x02),
            simulate_tx_accessor: Address::repeat_byte(0x03),
            proxy_factory: Address::repeat_byte(0x04),
        }
    }

    fn fee_chain() -> StaticChain {
        StaticChain {
            fees: FeeSample {
                base_fee_per_gas: 20_000_000_000,
                priority_fee_reward: 1_000_000_000,
            },
            gas_per_leg: 50_000,
            ..Default::default()
        }
    }

    fn leg(to_byte: u8) -> MetaTransaction {
        MetaTransaction {
            to: Address::repeat_byte(to_byte),
            value: U256::ZERO,
            data: Bytes::new(),
            operation: OperationType::Call,
        }
    }

    #[tokio::test]
    async fn single_call_direct_estimation() {
        let chain = fee_chain();
        let args = SafeTransactionArgs {
            safe: Address::repeat_byte(0x5a),
            transactions: vec![leg(0xaa)],
            nonce: U256::ZERO,
            deployed: true,
            strategy: EstimationStrategy::Direct,
        };

        let tx = build_safe_transaction(&chain, &args, &contracts(), &GasConfig::default())
            .await
            .unwrap();

        assert_eq!(tx.to, Address::repeat_byte(0xaa));
        assert_eq!(tx.operation, OperationType::Call);
        assert_eq!(tx.value, U256::ZERO);
        assert_eq!(tx.data, Bytes::new());
        assert_eq!(tx.safe_tx_gas, 50_000);
        assert_eq!(tx.base_gas, GasConfig::default().base_gas);
        assert_eq!(tx.gas_price, 23_100_000_000);
        assert_eq!(tx.gas_token, Address::ZERO);
        assert_eq!(tx.refund_receiver, Address::ZERO);
        assert_eq!(tx.nonce, U256::ZERO);
        assert_eq!(
            tx.total_gas_cost(),
            U256::from(50_000u64 + GasConfig::default().base_gas)
                * U256::from(23_100_000_000u128)
        );
    }

    #[tokio::test]
    async fn batched_calls_route_through_multi_send() {
        let mut chain = fee_chain();
        // accessor payload reporting 100k gas used
        let mut payload = vec![0u8; 97];
        payload[92..].copy_from_slice(&[0x00, 0x00, 0x01, 0x86, 0xa0]);
        chain.call_outcome = Some(CallOutcome::Revert(payload.into()));

        let args = SafeTransactionArgs {
            safe: Address::repeat_byte(0x5a),
            transactions: vec![leg(0xaa), leg(0xbb)],
            nonce: U256::from(7u64),
            deployed: false,
            strategy: EstimationStrategy::Simulation,
        };

        let tx = build_safe_transaction(&chain, &args, &contracts(), &GasConfig::default())
            .await
            .unwrap();

        // the envelope targets the batch executor, not either leg
        assert_eq!(tx.to, contracts().multi_send);
        assert_eq!(tx.operation, OperationType::DelegateCall);
        assert_eq!(tx.safe_tx_gas, 120_000);
        assert_eq!(tx.gas_price, 23_100_000_000);
        assert_eq!(tx.nonce, U256::from(7u64));
    }

    #[tokio::test]
    async fn direct_strategy_never_touches_simulation() {
        // no canned call outcome: a simulation attempt would fail
        let chain = fee_chain();
        let args = SafeTransactionArgs {
            safe: Address::repeat_byte(0x5a),
            transactions: vec![leg(0xaa), leg(0xbb)],
            nonce: U256::ZERO,
            deployed: true,
            strategy: EstimationStrategy::Direct,
        };

        let tx = build_safe_transaction(&chain, &args, &contracts(), &GasConfig::default())
            .await
            .unwrap();
        assert_eq!(tx.safe_tx_gas, 100_000);
        assert_eq!(tx.operation, OperationType::DelegateCall);
    }

    #[tokio::test]
    async fn empty_batch_is_rejected() {
        let chain = fee_chain();
        let args = SafeTransactionArgs {
            safe: Address::repeat_byte(0x5a),
            transactions: vec![],
            nonce: U256::ZERO,
            deployed: true,
            strategy: EstimationStrategy::Direct,
        };

        let err = build_safe_transaction(&chain, &args, &contracts(), &GasConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, EstimationError::Encode(_)));
    }
}
