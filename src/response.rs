use crate::client::RelayClient;
use crate::errors::RelayerApiError;
use crate::models::RelayerTransactionState;
use serde_json::Value;
use std::fmt::{self, Debug, Formatter};

/// Handle returned by a successful submission. Borrows the client so the
/// caller can keep tracking the transaction it refers to.
pub struct RelayTransactionResponse<'a> {
    pub transaction_id: Option<String>,
    pub transaction_hash: Option<String>,
    client: &'a RelayClient,
}

impl<'a> RelayTransactionResponse<'a> {
    pub fn new(
        transaction_id: Option<String>,
        transaction_hash: Option<String>,
        client: &'a RelayClient,
    ) -> Self {
        RelayTransactionResponse { transaction_id, transaction_hash, client }
    }

    pub async fn get_transaction(&self) -> Result<Value, RelayerApiError> {
        match &self.transaction_id {
            Some(id) => self.client.get_transaction(id).await,
            None => Err(RelayerApiError::Request("no transaction id".to_string())),
        }
    }

    /// Poll until the transaction is mined or confirmed, bailing out early
    /// if the relayer marks it failed.
    pub async fn wait(&self) -> Result<Option<Value>, RelayerApiError> {
        let Some(transaction_id) = &self.transaction_id else {
            return Ok(None);
        };

        self.client
            .poll_until_state(
                transaction_id,
                &[RelayerTransactionState::Mined, RelayerTransactionState::Confirmed],
                Some(RelayerTransactionState::Failed),
                Some(30),
                Some(2000),
            )
            .await
    }
}

impl Debug for RelayTransactionResponse<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayTransactionResponse")
            .field("transaction_id", &self.transaction_id)
            .field("transaction_hash", &self.transaction_hash)
            .finish()
    }
}
