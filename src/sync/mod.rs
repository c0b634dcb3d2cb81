//! Caller-owned local views over the store
//!
//! Each view keeps an in-memory copy of one owner's collection, applies
//! writes optimistically once they are acknowledged and rebuilds itself from
//! the store on `refresh`. Local state is only touched after the last await
//! of an operation, so dropping an in-flight operation leaves it unchanged.

pub mod collection;
pub mod singleton;

pub use collection::SyncedCollection;
pub use singleton::SyncedDocument;

/// Foreground state reported by the host application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    Active,
    Inactive,
    Background,
}

impl HostState {
    /// Views refresh when the host comes back to the foreground
    pub fn wants_refresh(self) -> bool {
        matches!(self, HostState::Active)
    }
}
