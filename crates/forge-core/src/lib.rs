//! Core of the Forge application settings stack.
//!
//! Holds the settings registry and the application settings schema, the
//! snapshot service that loads the persisted record, the static catalogs
//! (import sources, SSH key sizes) and the instance configuration.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app_settings;
pub mod catalog;
pub mod config;
pub mod prelude;
pub mod settings;
pub mod ssh_key;
pub mod whitelist;

pub use config::InstanceConfig;
pub use settings::{SettingsAccess, SettingsService, SettingsSnapshot};

/// Build and freeze the registry holding every application setting
pub fn build_registry() -> forge_types::error::FgResult<settings::FrozenSettingsRegistry> {
	let mut registry = settings::SettingsRegistry::new();
	app_settings::register_settings(&mut registry)?;
	let registry = registry.freeze();
	whitelist::validate_whitelist(&registry)?;
	Ok(registry)
}

// vim: ts=4
