//! Read-only collaborators consulted while building admin option lists
//!
//! Every method returns `Error::Unavailable` when the underlying source cannot
//! be reached. An empty answer is a valid, different result.

use std::collections::BTreeSet;

use crate::prelude::*;

/// Cryptographic capability lookup for SSH public keys
pub trait KeySizeCapabilityProvider: Send + Sync {
	/// Minimum bit sizes an administrator may require for `key_type`
	fn supported_sizes(&self, key_type: KeyType) -> FgResult<BTreeSet<u32>>;
}

/// Configured repository storages, in configuration order
pub trait StorageCatalog: Send + Sync {
	fn list_storages(&self) -> FgResult<Vec<StorageInfo>>;
}

/// Background job queues known to the instance
pub trait QueueCatalog: Send + Sync {
	fn list_queues(&self) -> FgResult<Vec<String>>;
}

// vim: ts=4
