pub use crate::error::{Error, FgResult};
pub use crate::types::{KeyType, StorageInfo, VisibilityLevel};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
