use crate::chain::{CallOutcome, ChainQuery};
use crate::contracts::{ISafe, ISimulateTxAccessor};
use crate::encode::multisend::aggregate_transactions;
use crate::errors::EstimationError;
use crate::models::MetaTransaction;
use alloy::primitives::Address;
use alloy::sol_types::SolCall;
use tracing::{debug, instrument};

/// Byte offset of the gas figure inside the accessor's revert payload.
const GAS_FIELD_OFFSET: usize = 92;
/// Width of the gas figure, big-endian.
const GAS_FIELD_WIDTH: usize = 5;
/// Shortest payload the decoder accepts.
const MIN_PAYLOAD_LEN: usize = GAS_FIELD_OFFSET + GAS_FIELD_WIDTH;

/// Inputs for one simulation-based estimate.
#[derive(Debug, Clone)]
pub struct SimulationArgs<'a> {
    /// The wallet the transaction will execute from.
    pub safe: Address,
    pub transactions: &'a [MetaTransaction],
    /// Batch-execution contract used when the batch has several legs.
    pub multi_send: Address,
    /// Implementation contract used as the call target while the wallet is
    /// not deployed; it exposes the same simulation entry point.
    pub singleton: Address,
    /// Accessor contract that measures execution gas.
    pub accessor: Address,
    /// Whether the wallet contract exists on chain, supplied by the caller.
    pub deployed: bool,
}

/// Estimate execution gas by running the transaction through the accessor
/// contract in a non-mutating call. The accessor reverts on purpose,
/// carrying the measured gas in its revert payload; a 20% margin is applied
/// on top.
///
/// Any outcome other than the expected revert is fatal for the attempt.
/// There is no automatic fallback to direct estimation; switching strategy
/// is an explicit caller decision.
#[instrument(skip_all, fields(safe = %args.safe, deployed = args.deployed))]
pub async fn estimate_gas_via_simulation<C: ChainQuery + ?Sized>(
    chain: &C,
    args: &SimulationArgs<'_>,
) -> Result<u64, EstimationError> {
    let effective = aggregate_transactions(args.transactions, args.multi_send)?;

    let simulate_data = ISimulateTxAccessor::simulateCall {
        to: effective.to,
        value: effective.value,
        data: effective.data,
        operation: effective.operation.as_u8(),
    }
    .abi_encode();

    let wrapped = ISafe::simulateAndRevertCall {
        targetContract: args.accessor,
        calldataPayload: simulate_data.into(),
    }
    .abi_encode();

    let target = if args.deployed { args.safe } else { args.singleton };

    match chain.simulate_call(target, wrapped.into()).await? {
        CallOutcome::Revert(payload) => {
            let raw = decode_gas_used(&payload)?;
            let estimate = with_safety_margin(raw);
            debug!(raw, estimate, "simulation reported execution gas");
            Ok(estimate)
        }
        CallOutcome::Success(_) => Err(EstimationError::EstimationSimulationFailed(
            "simulated call returned instead of reverting".into(),
        )),
    }
}

/// Extract the measured gas from a revert payload.
///
/// The accessor's revert data has a fixed binary layout; the gas figure is
/// the 5-byte big-endian integer at byte offset 92. This is the only place
/// that layout is known, so a structured ABI-error decoder can replace it
/// without touching callers.
pub fn decode_gas_used(payload: &[u8]) -> Result<u64, EstimationError> {
    if payload.len() < MIN_PAYLOAD_LEN {
        return Err(EstimationError::DecodeFailure { len: payload.len() });
    }
    let field = &payload[GAS_FIELD_OFFSET..GAS_FIELD_OFFSET + GAS_FIELD_WIDTH];
    Ok(field.iter().fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte)))
}

/// ceil(gas * 1.2)
fn with_safety_margin(gas: u64) -> u64 {
    (gas * 6).div_ceil(5)
}
