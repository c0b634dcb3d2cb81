//! MentorX Document Store Client
//!
//! Client-side synchronization over an owner/collection scoped document
//! store contract: retrying queries and writes, read-after-write
//! confirmation, and optimistic local views for the app's collections.

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod store;
pub mod sync;

pub use client::{Confirmation, DocumentStoreClient, SetOutcome};
pub use config::{Config, ConfirmPolicy, RetryPolicy};
pub use error::{RemoteError, Result, StoreError};
pub use models::{Document, Profile, Settings, SocialLinks, Todo};
pub use sync::{HostState, SyncedCollection, SyncedDocument};
