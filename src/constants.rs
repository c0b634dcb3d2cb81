/// Maximum attempts for a single remote query or execute call
pub const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 3;

/// Base delay for exponential backoff between retries (1 second)
/// Waits grow as base * 2^attempt: 1s, 2s, ...
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1_000;

/// Maximum polls while waiting for a write to become visible
pub const DEFAULT_CONFIRM_MAX_ATTEMPTS: u32 = 10;

/// Fixed wait between confirmation polls (2 seconds)
pub const DEFAULT_CONFIRM_INTERVAL_MS: u64 = 2_000;

// =============================================================================
// Collections
// =============================================================================

/// Multi-item collection, ids are generated by the client
pub const COLLECTION_TODOS: &str = "todos";

/// One profile document per owner, id equals the owner address
pub const COLLECTION_PROFILES: &str = "profiles";

/// One settings document per owner, id equals the owner address
pub const COLLECTION_SETTINGS: &str = "settings";

// =============================================================================
// Error Messages
// =============================================================================

pub const ERR_MISSING_OWNER: &str = "Owner address is not available";

pub const ERR_MISSING_COLLECTION: &str = "Collection name must not be empty";

pub const ERR_MISSING_DOCUMENT_ID: &str = "Document id must not be empty";

pub const ERR_MISSING_QUERY_CLIENT: &str = "Query client not initialized";

pub const ERR_MISSING_SIGNING_CLIENT: &str = "Signing client not initialized";

pub const ERR_MISSING_CONTRACT_ADDRESS: &str =
    "DOCUSTORE_CONTRACT_ADDRESS is not set in your environment file";
