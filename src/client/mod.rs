//! Document store client
//!
//! Wraps the query and execute interfaces with retry/backoff and the
//! confirmation loop used for read-after-write.

pub mod ids;
pub mod retry;

pub use ids::IdGenerator;
pub use retry::retry_with_backoff;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::constants::*;
use crate::error::{RemoteError, Result, StoreError};
use crate::models::{encode_payload, Document};
use crate::store::{
    DocumentsResponse, ExecuteInterface, ExecuteMsg, ExecuteReceipt, Fee, QueryInterface, QueryMsg,
};

/// Whether a write was seen by a later query
///
/// A timeout is not an error: the write was acknowledged and is expected to
/// show up on a later refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed { attempts: u32 },
    TimedOut { attempts: u32 },
}

impl Confirmation {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Confirmation::Confirmed { .. })
    }
}

/// Result of `set_document`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetOutcome {
    pub receipt: ExecuteReceipt,
    pub confirmation: Confirmation,
}

/// Client for an owner/collection scoped document store contract
///
/// Cheap to clone; clones share the interfaces. Every client draws ids
/// from the process-wide generator.
#[derive(Clone)]
pub struct DocumentStoreClient {
    config: Config,
    query: Option<Arc<dyn QueryInterface>>,
    signer: Option<Arc<dyn ExecuteInterface>>,
    ids: &'static IdGenerator,
}

fn require(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StoreError::Precondition(message.to_string()));
    }
    Ok(())
}

fn parse_documents(owner: &str, collection: &str, response: Value) -> Result<Vec<Document>> {
    if response.is_null() {
        return Ok(Vec::new());
    }

    let response: DocumentsResponse = serde_json::from_value(response)
        .map_err(|e| StoreError::Query(RemoteError::Malformed(e.to_string())))?;

    Ok(response
        .documents
        .unwrap_or_default()
        .into_iter()
        .map(|(id, raw)| Document::from_raw(owner, collection, id, raw))
        .collect())
}

impl DocumentStoreClient {
    /// Create a client without any interfaces attached yet
    ///
    /// The configuration is validated here; operations needing an interface
    /// that has not been attached fail with a precondition error.
    pub fn new(config: Config) -> Result<Self> {
        config.validate().map_err(StoreError::Config)?;

        Ok(Self {
            config,
            query: None,
            signer: None,
            ids: IdGenerator::process(),
        })
    }

    pub fn with_query_client(mut self, query: Arc<dyn QueryInterface>) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_signing_client(mut self, signer: Arc<dyn ExecuteInterface>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fresh id for a multi-item collection
    pub fn next_document_id(&self) -> String {
        self.ids.next_id()
    }

    fn query_client(&self) -> Result<&dyn QueryInterface> {
        self.query
            .as_deref()
            .ok_or_else(|| StoreError::Precondition(ERR_MISSING_QUERY_CLIENT.to_string()))
    }

    fn signing_client(&self) -> Result<&dyn ExecuteInterface> {
        self.signer
            .as_deref()
            .ok_or_else(|| StoreError::Precondition(ERR_MISSING_SIGNING_CLIENT.to_string()))
    }

    fn check_write(&self, owner: &str, collection: &str, id: &str) -> Result<&dyn ExecuteInterface> {
        require(owner, ERR_MISSING_OWNER)?;
        require(collection, ERR_MISSING_COLLECTION)?;
        require(id, ERR_MISSING_DOCUMENT_ID)?;
        self.signing_client()
    }

    /// All documents of an owner's collection
    ///
    /// A response without a `documents` field is an empty collection, not
    /// an error.
    pub async fn list_documents(&self, owner: &str, collection: &str) -> Result<Vec<Document>> {
        require(owner, ERR_MISSING_OWNER)?;
        require(collection, ERR_MISSING_COLLECTION)?;
        let query = self.query_client()?;

        let msg = QueryMsg::UserDocuments {
            owner: owner.to_string(),
            collection: collection.to_string(),
        };
        let contract = self.config.contract_address.as_str();
        let msg_ref = &msg;

        let response = retry_with_backoff(&self.config.retry, "query", move || {
            query.query_smart(contract, msg_ref)
        })
        .await
        .map_err(StoreError::Query)?;

        let documents = parse_documents(owner, collection, response)?;
        tracing::debug!(
            owner,
            collection,
            count = documents.len(),
            "Fetched documents"
        );

        Ok(documents)
    }

    /// Single document by id, if present
    pub async fn get_document(
        &self,
        owner: &str,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>> {
        let documents = self.list_documents(owner, collection).await?;
        Ok(documents.into_iter().find(|doc| doc.id == id))
    }

    /// Write a document and wait until it shows up in the collection
    ///
    /// Polls the collection at a fixed interval after the transaction is
    /// acknowledged. Running out of polls yields `Confirmation::TimedOut`
    /// rather than an error.
    pub async fn set_document<T: Serialize>(
        &self,
        owner: &str,
        collection: &str,
        id: &str,
        value: &T,
    ) -> Result<SetOutcome> {
        let signer = self.check_write(owner, collection, id)?;
        // Confirmation needs to read back
        self.query_client()?;

        let msg = ExecuteMsg::Set {
            collection: collection.to_string(),
            document: id.to_string(),
            data: encode_payload(value)?,
        };
        let receipt = self.submit(signer, owner, msg).await?;
        let confirmation = self.confirm_visible(owner, collection, id).await;

        Ok(SetOutcome {
            receipt,
            confirmation,
        })
    }

    /// Write a document without waiting for it to become visible
    pub async fn set_document_unconfirmed<T: Serialize>(
        &self,
        owner: &str,
        collection: &str,
        id: &str,
        value: &T,
    ) -> Result<ExecuteReceipt> {
        let signer = self.check_write(owner, collection, id)?;

        let msg = ExecuteMsg::Set {
            collection: collection.to_string(),
            document: id.to_string(),
            data: encode_payload(value)?,
        };
        self.submit(signer, owner, msg).await
    }

    /// Submit an `Update`; existence is checked by the contract, not here
    pub async fn update_document<T: Serialize>(
        &self,
        owner: &str,
        collection: &str,
        id: &str,
        value: &T,
    ) -> Result<ExecuteReceipt> {
        let signer = self.check_write(owner, collection, id)?;

        let msg = ExecuteMsg::Update {
            collection: collection.to_string(),
            document: id.to_string(),
            data: encode_payload(value)?,
        };
        self.submit(signer, owner, msg).await
    }

    pub async fn delete_document(
        &self,
        owner: &str,
        collection: &str,
        id: &str,
    ) -> Result<ExecuteReceipt> {
        let signer = self.check_write(owner, collection, id)?;

        let msg = ExecuteMsg::Delete {
            collection: collection.to_string(),
            document: id.to_string(),
        };
        self.submit(signer, owner, msg).await
    }

    /// Poll until `id` is listed in the collection or the budget runs out
    ///
    /// Failed polls count as "not yet visible".
    pub async fn confirm_visible(&self, owner: &str, collection: &str, id: &str) -> Confirmation {
        let policy = self.config.confirm;
        let max_attempts = policy.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.list_documents(owner, collection).await {
                Ok(documents) if documents.iter().any(|doc| doc.id == id) => {
                    tracing::debug!(collection, document = id, attempt, "Write confirmed");
                    return Confirmation::Confirmed { attempts: attempt };
                }
                Ok(_) => {
                    tracing::debug!(collection, document = id, attempt, "Write not yet visible");
                }
                Err(e) => {
                    tracing::warn!(
                        collection,
                        document = id,
                        attempt,
                        error = %e,
                        "Confirmation poll failed"
                    );
                }
            }

            if attempt < max_attempts {
                tokio::time::sleep(policy.interval).await;
            }
        }

        tracing::warn!(
            collection,
            document = id,
            attempts = max_attempts,
            "Write not visible yet, continuing without confirmation"
        );
        Confirmation::TimedOut {
            attempts: max_attempts,
        }
    }

    async fn submit(
        &self,
        signer: &dyn ExecuteInterface,
        owner: &str,
        msg: ExecuteMsg,
    ) -> Result<ExecuteReceipt> {
        let contract = self.config.contract_address.as_str();
        let msg_ref = &msg;

        let receipt = retry_with_backoff(&self.config.retry, msg.action(), move || {
            signer.execute(owner, contract, msg_ref, Fee::Auto)
        })
        .await
        .map_err(StoreError::Write)?;

        tracing::info!(
            action = msg.action(),
            collection = msg.collection(),
            document = msg.document(),
            tx_hash = %receipt.tx_hash,
            "Transaction acknowledged"
        );

        Ok(receipt)
    }
}
