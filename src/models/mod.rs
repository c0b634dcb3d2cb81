pub mod document;
pub mod profile;
pub mod settings;
pub mod todo;

pub use document::{encode_payload, Document, RawDocument};
pub use profile::{Profile, SocialLinks};
pub use settings::Settings;
pub use todo::Todo;

/// Payloads carrying their own creation time, used for client-side ordering
pub trait Timestamped {
    /// Creation time in Unix milliseconds
    fn created_at(&self) -> i64;
}
