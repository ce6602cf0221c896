//! Settings policy resolution for the admin area.
//!
//! Turns an application settings snapshot into render-ready option lists:
//! SSH key restriction tiers, checkbox states for visibility levels, import
//! sources and OAuth providers, and select options for repository storages
//! and throttled job queues.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod help_text;
pub mod options;
pub mod resolver;

mod prelude;

pub use options::{
	CheckboxState, ImportSourceCheckbox, KeyRestrictionOption, QueueOption, StorageOption,
};
pub use resolver::{CloneProtocol, SettingsPolicyResolver};

// vim: ts=4
