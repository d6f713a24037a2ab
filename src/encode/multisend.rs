use crate::contracts::IMultiSend;
use crate::errors::EncodeError;
use crate::models::{MetaTransaction, OperationType};
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;

/// Bytes of a record before its variable-length data:
/// operation(1) + to(20) + value(32) + data length(32).
const RECORD_HEADER_LEN: usize = 85;

/// Pack one record: operation(1) | to(20) | value(32 BE) | len(data)(32 BE) | data.
/// No per-field padding beyond the fixed widths, no length prefix on the
/// record itself.
fn encode_packed(tx: &MetaTransaction, out: &mut Vec<u8>) {
    out.push(tx.operation.as_u8());
    out.extend_from_slice(tx.to.as_slice());
    out.extend_from_slice(&tx.value.to_be_bytes::<32>());
    out.extend_from_slice(&U256::from(tx.data.len()).to_be_bytes::<32>());
    out.extend_from_slice(&tx.data);
}

/// Wrap a batch of transactions into a single `multiSend(bytes)` call
/// against the batch-execution contract. The wallet must reach that
/// contract via delegate call, so the resulting transaction is always
/// `DelegateCall`.
pub fn encode_multi_send(
    txns: &[MetaTransaction],
    multi_send: Address,
) -> Result<MetaTransaction, EncodeError> {
    if txns.is_empty() {
        return Err(EncodeError::EmptyBatch);
    }

    let mut packed = Vec::new();
    for tx in txns {
        encode_packed(tx, &mut packed);
    }

    let data = IMultiSend::multiSendCall { transactions: packed.into() }.abi_encode();

    Ok(MetaTransaction {
        to: multi_send,
        value: U256::ZERO,
        data: data.into(),
        operation: OperationType::DelegateCall,
    })
}

/// Reduce a batch to one effective transaction: a single entry passes
/// through with `operation` forced to `Call`, anything longer is wrapped
/// via [`encode_multi_send`].
pub fn aggregate_transactions(
    txns: &[MetaTransaction],
    multi_send: Address,
) -> Result<MetaTransaction, EncodeError> {
    match txns {
        [] => Err(EncodeError::EmptyBatch),
        [single] => Ok(MetaTransaction { operation: OperationType::Call, ..single.clone() }),
        _ => encode_multi_send(txns, multi_send),
    }
}

/// Inverse of [`encode_multi_send`]: unwrap `multiSend(bytes)` calldata and
/// scan the packed records back into the original entries, in order.
pub fn decode_multi_send(calldata: &[u8]) -> Result<Vec<MetaTransaction>, EncodeError> {
    let call = IMultiSend::multiSendCall::abi_decode_validate(calldata)
        .map_err(|_| EncodeError::NotMultiSend)?;
    let packed = call.transactions;

    let mut entries = Vec::new();
    let mut offset = 0usize;
    while offset < packed.len() {
        let rest = &packed[offset..];
        if rest.len() < RECORD_HEADER_LEN {
            return Err(EncodeError::TruncatedRecord { offset });
        }

        let operation =
            OperationType::from_u8(rest[0]).ok_or(EncodeError::InvalidOperation(rest[0]))?;
        let to = Address::from_slice(&rest[1..21]);
        let value = U256::from_be_slice(&rest[21..53]);
        let data_len = usize::try_from(U256::from_be_slice(&rest[53..85]))
            .map_err(|_| EncodeError::InvalidRecordLength)?;
        let end = RECORD_HEADER_LEN
            .checked_add(data_len)
            .ok_or(EncodeError::InvalidRecordLength)?;
        if rest.len() < end {
            return Err(EncodeError::TruncatedRecord { offset });
        }

        entries.push(MetaTransaction {
            to,
            value,
            data: Bytes::copy_from_slice(&rest[RECORD_HEADER_LEN..end]),
            operation,
        });
        offset += end;
    }

    Ok(entries)
}
