pub use forge_types::error::{Error, FgResult};
pub use forge_types::types::{KeyType, StorageInfo, VisibilityLevel};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
