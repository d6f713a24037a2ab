use alloy::primitives::{b256, B256};

/// keccak256 of the wallet proxy creation code deployed by the canonical
/// v1.3.0 proxy factory. Input to counterfactual address prediction.
pub const SAFE_PROXY_INIT_CODE_HASH: B256 =
    b256!("56e3081a3d1bb38ed4eed1a39f7729c3cc77c7825794c15bbf326f3047fd779c");
