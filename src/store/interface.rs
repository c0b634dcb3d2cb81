//! Consumed interfaces
//!
//! Both are provided by the wallet/chain SDK. The client only depends on
//! these traits, so any transport (or the in-memory store) can back it.

use async_trait::async_trait;
use serde_json::Value;

use super::messages::{ExecuteMsg, ExecuteReceipt, Fee, QueryMsg};
use crate::error::RemoteError;

/// Read-only smart query against a contract
#[async_trait]
pub trait QueryInterface: Send + Sync {
    /// Returns the contract's JSON response
    async fn query_smart(&self, contract: &str, msg: &QueryMsg) -> Result<Value, RemoteError>;
}

/// Signed transaction submission
#[async_trait]
pub trait ExecuteInterface: Send + Sync {
    /// Resolves once the transaction is acknowledged, not once it is visible
    async fn execute(
        &self,
        signer: &str,
        contract: &str,
        msg: &ExecuteMsg,
        fee: Fee,
    ) -> Result<ExecuteReceipt, RemoteError>;
}
