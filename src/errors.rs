use crate::chain::ChainQueryError;
use alloy::primitives::U256;
use thiserror::Error;

/// Failures produced while deriving gas parameters for a relay attempt.
///
/// Every variant is terminal for the current attempt; nothing in this crate
/// retries internally. The caller decides whether to switch estimation
/// strategy, re-quote, or surface the failure to the user.
#[derive(Debug, Error)]
pub enum EstimationError {
    /// The fee-history query could not be completed.
    #[error("fee query failed: {0}")]
    FeeQueryFailed(ChainQueryError),
    /// Direct gas estimation reverted or the target contract is not deployed.
    /// Callers should switch to the simulation strategy rather than retry.
    #[error("gas estimation failed: {0}")]
    GasEstimationFailed(ChainQueryError),
    /// The simulated call did not revert in the expected shape.
    #[error("gas simulation did not revert as expected: {0}")]
    EstimationSimulationFailed(String),
    /// The revert payload is too short to carry a gas figure.
    #[error("revert payload too short to decode: {len} bytes")]
    DecodeFailure {
        /// Length of the payload that was returned.
        len: usize,
    },
    /// The wallet cannot cover the projected cost of the transaction.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Total cost the wallet must be able to pay.
        required: U256,
        /// Balance the wallet actually holds.
        available: U256,
    },
    /// The node was unreachable or answered with a non-success response
    /// outside of any of the cases above.
    #[error("network failure: {0}")]
    Network(#[from] ChainQueryError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Failures while packing or unpacking batched call payloads.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("cannot aggregate an empty transaction batch")]
    EmptyBatch,
    #[error("payload is not multiSend calldata")]
    NotMultiSend,
    #[error("truncated batch record at byte {offset}")]
    TruncatedRecord { offset: usize },
    #[error("batch record declares an unrepresentable data length")]
    InvalidRecordLength,
    #[error("invalid operation byte: {0}")]
    InvalidOperation(u8),
}

/// Transport-level failures talking to the relayer API.
#[derive(Debug, Error)]
pub enum RelayerApiError {
    #[error("relayer API error: status={status}, body={body}")]
    Api { status: u16, body: String },
    #[error("relayer request failed: {0}")]
    Request(String),
}

/// Client-level failures: bad configuration, or responses the relayer
/// should never produce.
#[derive(Debug, Error)]
pub enum RelayerClientError {
    #[error("invalid relayer url: {0}")]
    InvalidUrl(String),
    #[error("unsupported chain id: {0}")]
    UnsupportedChain(u64),
    #[error("malformed relayer response: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    Api(#[from] RelayerApiError),
}
