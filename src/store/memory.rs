//! In-memory document store contract
//!
//! Behaves like the deployed contract as seen through the query and execute
//! interfaces: writes are acknowledged immediately but only become visible
//! to queries after the configured settlement lag.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::interface::{ExecuteInterface, QueryInterface};
use super::messages::{DocumentsResponse, ExecuteMsg, ExecuteReceipt, Fee, QueryMsg};
use crate::error::RemoteError;
use crate::models::RawDocument;

type CollectionKey = (String, String);

#[derive(Debug)]
enum Change {
    Put(String),
    Remove,
}

#[derive(Debug)]
struct PendingWrite {
    visible_at: Instant,
    key: CollectionKey,
    document: String,
    change: Change,
}

#[derive(Debug, Default)]
struct Ledger {
    /// (owner, collection) -> document id -> payload
    documents: HashMap<CollectionKey, BTreeMap<String, String>>,
    /// Acknowledged writes not yet visible, in submission order
    pending: VecDeque<PendingWrite>,
    sequence: u64,
}

impl Ledger {
    fn settle(&mut self, now: Instant) {
        while self
            .pending
            .front()
            .is_some_and(|write| write.visible_at <= now)
        {
            let Some(write) = self.pending.pop_front() else {
                break;
            };
            let collection = self.documents.entry(write.key).or_default();
            match write.change {
                Change::Put(data) => {
                    collection.insert(write.document, data);
                }
                Change::Remove => {
                    collection.remove(&write.document);
                }
            }
        }
    }

    /// Whether the document exists once every acknowledged write settles
    fn exists_eventually(&self, key: &CollectionKey, document: &str) -> bool {
        let mut exists = self
            .documents
            .get(key)
            .is_some_and(|docs| docs.contains_key(document));
        for write in self
            .pending
            .iter()
            .filter(|w| &w.key == key && w.document == document)
        {
            exists = matches!(write.change, Change::Put(_));
        }
        exists
    }
}

/// Simulated document store implementing both consumed interfaces
#[derive(Debug)]
pub struct InMemoryStore {
    contract_address: String,
    settlement_lag: Duration,
    ledger: Mutex<Ledger>,
    query_calls: AtomicU32,
    execute_calls: AtomicU32,
    failing_queries: AtomicU32,
    failing_executes: AtomicU32,
}

impl InMemoryStore {
    /// Store whose writes are visible to the next query
    pub fn new(contract_address: impl Into<String>) -> Self {
        Self {
            contract_address: contract_address.into(),
            settlement_lag: Duration::ZERO,
            ledger: Mutex::new(Ledger::default()),
            query_calls: AtomicU32::new(0),
            execute_calls: AtomicU32::new(0),
            failing_queries: AtomicU32::new(0),
            failing_executes: AtomicU32::new(0),
        }
    }

    /// Delay between acknowledging a write and it becoming visible
    pub fn with_settlement_lag(mut self, lag: Duration) -> Self {
        self.settlement_lag = lag;
        self
    }

    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }

    /// Make the next `count` queries fail as unavailable
    pub fn fail_next_queries(&self, count: u32) {
        self.failing_queries.store(count, Ordering::SeqCst);
    }

    /// Make the next `count` executes fail as unavailable
    pub fn fail_next_executes(&self, count: u32) {
        self.failing_executes.store(count, Ordering::SeqCst);
    }

    pub fn query_calls(&self) -> u32 {
        self.query_calls.load(Ordering::SeqCst)
    }

    pub fn execute_calls(&self) -> u32 {
        self.execute_calls.load(Ordering::SeqCst)
    }

    /// Visible document ids for (owner, collection)
    pub async fn visible_ids(&self, owner: &str, collection: &str) -> Vec<String> {
        let mut ledger = self.ledger.lock().await;
        ledger.settle(Instant::now());
        ledger
            .documents
            .get(&(owner.to_string(), collection.to_string()))
            .map(|docs| docs.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of acknowledged writes still waiting to settle
    pub async fn pending_writes(&self) -> usize {
        let mut ledger = self.ledger.lock().await;
        ledger.settle(Instant::now());
        ledger.pending.len()
    }

    fn check_contract(&self, contract: &str) -> Result<(), RemoteError> {
        if contract != self.contract_address {
            return Err(RemoteError::Rejected(format!("unknown contract {}", contract)));
        }
        Ok(())
    }

    fn take_failure(counter: &AtomicU32) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

fn transaction_hash(signer: &str, msg: &ExecuteMsg, sequence: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(signer.as_bytes());
    hasher.update(serde_json::to_vec(msg).unwrap_or_default());
    hasher.update(sequence.to_be_bytes());
    hex::encode_upper(hasher.finalize())
}

#[async_trait]
impl QueryInterface for InMemoryStore {
    async fn query_smart(&self, contract: &str, msg: &QueryMsg) -> Result<Value, RemoteError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        if Self::take_failure(&self.failing_queries) {
            return Err(RemoteError::Unavailable("query node unreachable".to_string()));
        }
        self.check_contract(contract)?;

        let QueryMsg::UserDocuments { owner, collection } = msg;
        let mut ledger = self.ledger.lock().await;
        ledger.settle(Instant::now());

        let Some(docs) = ledger.documents.get(&(owner.clone(), collection.clone())) else {
            // Never written: the contract omits the field entirely
            return Ok(json!({}));
        };

        let response = DocumentsResponse {
            documents: Some(
                docs.iter()
                    .map(|(id, data)| {
                        (
                            id.clone(),
                            RawDocument {
                                data: Value::String(data.clone()),
                            },
                        )
                    })
                    .collect(),
            ),
        };
        serde_json::to_value(response).map_err(|e| RemoteError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl ExecuteInterface for InMemoryStore {
    async fn execute(
        &self,
        signer: &str,
        contract: &str,
        msg: &ExecuteMsg,
        _fee: Fee,
    ) -> Result<ExecuteReceipt, RemoteError> {
        self.execute_calls.fetch_add(1, Ordering::SeqCst);
        if Self::take_failure(&self.failing_executes) {
            return Err(RemoteError::Unavailable("broadcast failed".to_string()));
        }
        self.check_contract(contract)?;

        let now = Instant::now();
        let mut ledger = self.ledger.lock().await;
        ledger.settle(now);

        let key = (signer.to_string(), msg.collection().to_string());
        let document = msg.document().to_string();

        let change = match msg {
            ExecuteMsg::Set { data, .. } => Change::Put(data.clone()),
            ExecuteMsg::Update { data, .. } => {
                if !ledger.exists_eventually(&key, &document) {
                    return Err(RemoteError::Rejected("document not found".to_string()));
                }
                Change::Put(data.clone())
            }
            ExecuteMsg::Delete { .. } => {
                if !ledger.exists_eventually(&key, &document) {
                    return Err(RemoteError::Rejected("document not found".to_string()));
                }
                Change::Remove
            }
        };

        ledger.sequence += 1;
        let tx_hash = transaction_hash(signer, msg, ledger.sequence);
        ledger.pending.push_back(PendingWrite {
            visible_at: now + self.settlement_lag,
            key,
            document,
            change,
        });
        ledger.settle(now);

        Ok(ExecuteReceipt { tx_hash })
    }
}
