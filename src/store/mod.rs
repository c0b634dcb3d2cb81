pub mod interface;
pub mod memory;
pub mod messages;

pub use interface::{ExecuteInterface, QueryInterface};
pub use memory::InMemoryStore;
pub use messages::{DocumentsResponse, ExecuteMsg, ExecuteReceipt, Fee, QueryMsg};
