use serde::{Deserialize, Serialize};

use crate::models::RawDocument;

/// Read messages understood by the document store contract
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum QueryMsg {
    UserDocuments { owner: String, collection: String },
}

/// Write messages understood by the document store contract
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum ExecuteMsg {
    Set {
        collection: String,
        document: String,
        data: String,
    },
    Update {
        collection: String,
        document: String,
        data: String,
    },
    Delete {
        collection: String,
        document: String,
    },
}

impl ExecuteMsg {
    pub fn collection(&self) -> &str {
        match self {
            ExecuteMsg::Set { collection, .. }
            | ExecuteMsg::Update { collection, .. }
            | ExecuteMsg::Delete { collection, .. } => collection,
        }
    }

    pub fn document(&self) -> &str {
        match self {
            ExecuteMsg::Set { document, .. }
            | ExecuteMsg::Update { document, .. }
            | ExecuteMsg::Delete { document, .. } => document,
        }
    }

    /// Short action name for logs
    pub fn action(&self) -> &'static str {
        match self {
            ExecuteMsg::Set { .. } => "set",
            ExecuteMsg::Update { .. } => "update",
            ExecuteMsg::Delete { .. } => "delete",
        }
    }
}

/// Response to `UserDocuments`
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DocumentsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<(String, RawDocument)>>,
}

/// Fee mode passed along with every signed transaction
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Fee {
    #[default]
    Auto,
}

/// Acknowledgment of a submitted transaction
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExecuteReceipt {
    #[serde(rename = "transactionHash")]
    pub tx_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_msg_shape() {
        let msg = QueryMsg::UserDocuments {
            owner: "xion1abc".to_string(),
            collection: "todos".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({ "UserDocuments": { "owner": "xion1abc", "collection": "todos" } })
        );
    }

    #[test]
    fn test_execute_msg_shapes() {
        let set = ExecuteMsg::Set {
            collection: "settings".to_string(),
            document: "xion1abc".to_string(),
            data: "{}".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            json!({ "Set": { "collection": "settings", "document": "xion1abc", "data": "{}" } })
        );

        let delete = ExecuteMsg::Delete {
            collection: "todos".to_string(),
            document: "1700000000000".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&delete).unwrap(),
            json!({ "Delete": { "collection": "todos", "document": "1700000000000" } })
        );
        assert_eq!(delete.action(), "delete");
        assert_eq!(delete.document(), "1700000000000");
    }

    #[test]
    fn test_documents_response_variants() {
        let empty: DocumentsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.documents.is_none());

        let listed: DocumentsResponse = serde_json::from_value(json!({
            "documents": [["1700000000000", { "data": "{\"title\":\"buy milk\"}" }]]
        }))
        .unwrap();
        let documents = listed.documents.unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].0, "1700000000000");
    }

    #[test]
    fn test_fee_is_auto() {
        assert_eq!(serde_json::to_value(Fee::Auto).unwrap(), json!("auto"));
    }
}
