use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::Timestamped;

/// Todo item stored in the "todos" collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub title: String,
    pub completed: bool,
    /// Unix milliseconds
    pub created_at: i64,
}

impl Todo {
    /// Create an open todo stamped with the current time
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
            created_at: Utc::now().timestamp_millis(),
        }
    }

    /// Copy with the completion flag flipped
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

impl Timestamped for Todo {
    fn created_at(&self) -> i64 {
        self.created_at
    }
}
