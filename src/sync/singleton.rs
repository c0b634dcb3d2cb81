use serde::de::DeserializeOwned;
use serde::Serialize;

use super::HostState;
use crate::client::DocumentStoreClient;
use crate::error::Result;
use crate::store::ExecuteReceipt;

/// Local view of a one-per-owner document such as a profile or settings
///
/// The document id is the owner address.
pub struct SyncedDocument<T> {
    client: DocumentStoreClient,
    owner: String,
    collection: String,
    current: Option<T>,
}

impl<T> SyncedDocument<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(
        client: DocumentStoreClient,
        owner: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            client,
            owner: owner.into(),
            collection: collection.into(),
            current: None,
        }
    }

    /// Loaded value, if `load` has succeeded at least once
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// Fetch the owner's document, falling back to `T::default()`
    ///
    /// The default is only held locally; nothing is written until `save`.
    pub async fn load(&mut self) -> Result<&T> {
        let document = self
            .client
            .get_document(&self.owner, &self.collection, &self.owner)
            .await?;

        let value = match document {
            Some(doc) => doc.decode()?,
            None => {
                tracing::info!(
                    collection = %self.collection,
                    "No document found, initializing defaults"
                );
                T::default()
            }
        };

        Ok(&*self.current.insert(value))
    }

    /// Submit the new value and replace the local copy once acknowledged
    pub async fn save(&mut self, value: T) -> Result<ExecuteReceipt> {
        let receipt = self
            .client
            .set_document_unconfirmed(&self.owner, &self.collection, &self.owner, &value)
            .await?;
        self.current = Some(value);
        Ok(receipt)
    }

    /// Reload when the host reports it became active
    pub async fn handle_host_state(&mut self, state: HostState) -> Result<bool> {
        if !state.wants_refresh() {
            return Ok(false);
        }
        self.load().await?;
        Ok(true)
    }
}
