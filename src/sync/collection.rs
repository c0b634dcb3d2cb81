use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::HostState;
use crate::client::{Confirmation, DocumentStoreClient};
use crate::error::{Result, StoreError};
use crate::models::{Timestamped, Todo};
use crate::store::ExecuteReceipt;

/// Local view of a multi-item collection such as "todos"
pub struct SyncedCollection<T> {
    client: DocumentStoreClient,
    owner: String,
    collection: String,
    items: BTreeMap<String, T>,
}

impl<T> SyncedCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Empty view; call `refresh` to load it
    pub fn new(
        client: DocumentStoreClient,
        owner: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            client,
            owner: owner.into(),
            collection: collection.into(),
            items: BTreeMap::new(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    async fn fetch(&self) -> Result<BTreeMap<String, T>> {
        let documents = self
            .client
            .list_documents(&self.owner, &self.collection)
            .await?;

        let mut items = BTreeMap::new();
        for doc in documents {
            match doc.decode::<T>() {
                Ok(value) => {
                    items.insert(doc.id, value);
                }
                Err(e) => {
                    tracing::warn!(
                        collection = %self.collection,
                        document = %doc.id,
                        error = %e,
                        "Skipping undecodable document"
                    );
                }
            }
        }
        Ok(items)
    }

    /// Rebuild the view from the store
    ///
    /// On failure the previous contents are kept.
    pub async fn refresh(&mut self) -> Result<usize> {
        let items = self.fetch().await?;
        self.items = items;

        tracing::info!(
            collection = %self.collection,
            count = self.items.len(),
            "Collection refreshed"
        );
        Ok(self.items.len())
    }

    /// Refresh when the host reports it became active
    pub async fn handle_host_state(&mut self, state: HostState) -> Result<bool> {
        if !state.wants_refresh() {
            return Ok(false);
        }
        tracing::debug!(collection = %self.collection, "Host became active, refreshing");
        self.refresh().await?;
        Ok(true)
    }

    /// Store a new item under a generated id and reload the list
    ///
    /// If the write could not be confirmed the reloaded list may not contain
    /// the item yet; a later refresh will pick it up.
    pub async fn add(&mut self, value: T) -> Result<(String, Confirmation)> {
        let id = self.client.next_document_id();
        let outcome = self
            .client
            .set_document(&self.owner, &self.collection, &id, &value)
            .await?;

        match self.fetch().await {
            Ok(items) => self.items = items,
            Err(e) => {
                tracing::warn!(
                    collection = %self.collection,
                    document = %id,
                    error = %e,
                    "Reload after add failed, keeping item locally"
                );
                self.items.insert(id.clone(), value);
            }
        }

        Ok((id, outcome.confirmation))
    }

    /// Submit an update and apply it locally once acknowledged
    ///
    /// Not rolled back if the transaction later fails to finalize.
    pub async fn update(&mut self, id: &str, value: T) -> Result<ExecuteReceipt> {
        let receipt = self
            .client
            .update_document(&self.owner, &self.collection, id, &value)
            .await?;
        self.items.insert(id.to_string(), value);
        Ok(receipt)
    }

    /// Submit a delete and drop the item locally once acknowledged
    pub async fn remove(&mut self, id: &str) -> Result<ExecuteReceipt> {
        let receipt = self
            .client
            .delete_document(&self.owner, &self.collection, id)
            .await?;
        self.items.remove(id);
        Ok(receipt)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.items.iter().map(|(id, value)| (id.as_str(), value))
    }
}

impl<T> SyncedCollection<T>
where
    T: Serialize + DeserializeOwned + Timestamped,
{
    /// Items ordered by creation time, newest first; ties by id
    pub fn newest_first(&self) -> Vec<(&str, &T)> {
        let mut items: Vec<_> = self.iter().collect();
        items.sort_by(|(a_id, a), (b_id, b)| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a_id.cmp(b_id))
        });
        items
    }
}

impl SyncedCollection<Todo> {
    /// Flip a loaded todo's completion flag, returning the new value
    pub async fn toggle(&mut self, id: &str) -> Result<bool> {
        let toggled = self
            .get(id)
            .map(Todo::toggled)
            .ok_or_else(|| StoreError::Precondition(format!("Todo {} is not loaded", id)))?;
        let completed = toggled.completed;
        self.update(id, toggled).await?;
        Ok(completed)
    }
}
