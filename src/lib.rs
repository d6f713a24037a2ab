pub mod builder;
pub mod chain;
pub mod client;
pub mod config;
pub mod constants;
pub mod contracts;
pub mod encode;
pub mod endpoints;
pub mod errors;
pub mod gas;
pub mod http_helpers;
pub mod models;
pub mod response;

pub use builder::{build_safe_transaction, derive_safe_address};
pub use chain::{CallOutcome, ChainQuery, ChainQueryError, FeeSample, RpcChain};
pub use client::RelayClient;
pub use config::{get_contract_config, ContractConfig, GasConfig};
pub use errors::{EncodeError, EstimationError, RelayerApiError, RelayerClientError};
pub use models::{
    EstimationStrategy, GasEstimate, MetaTransaction, OperationType, RelayTransactionRequest,
    RelayerTransactionState, SafeTransaction, SafeTransactionArgs,
};
pub use response::RelayTransactionResponse;
