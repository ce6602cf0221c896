//! Settings subsystem: typed definitions, snapshots and the loading service
//!
//! # Architecture
//!
//! - **Types** (`types.rs`): value and definition types, registry
//! - **Snapshot** (`snapshot.rs`): immutable resolved view of the record plus the
//!   read-only `SettingsAccess` interface
//! - **Service** (`service.rs`): loads snapshots from a `SettingsStore`, caches
//!   the current one and applies whitelisted bulk updates
//!
//! A snapshot is loaded once per request or operation and never changes
//! afterwards. Updates go through the service, which drops the cached snapshot
//! so the next request sees the new values.

pub mod service;
pub mod snapshot;
pub mod types;

pub use service::{SettingsService, UpdateOutcome};
pub use snapshot::{SettingsAccess, SettingsSnapshot};
pub use types::{
	FrozenSettingsRegistry, SettingDefinition, SettingDefinitionBuilder, SettingValue,
	SettingsRegistry,
};

// vim: ts=4
