pub use forge_types::error::FgResult;
pub use forge_types::types::{KeyType, StorageInfo, VisibilityLevel};

pub use tracing::debug;

// vim: ts=4
