//! Settings policy resolver
//!
//! Built per request from an immutable settings snapshot and the instance
//! configuration. Collaborators default to the instance configuration (as
//! storage and queue catalog) and the built-in SSH key size table; each can
//! be replaced.

use std::collections::BTreeSet;

use forge_core::config::InstanceConfig;
use forge_core::settings::SettingsAccess;
use forge_core::ssh_key::StaticKeySizes;
use forge_core::whitelist;
use forge_types::catalog::{KeySizeCapabilityProvider, QueueCatalog, StorageCatalog};

use crate::options::{
	self, CheckboxState, ImportSourceCheckbox, KeyRestrictionOption, QueueOption, StorageOption,
};
use crate::prelude::*;

static STATIC_KEY_SIZES: StaticKeySizes = StaticKeySizes;

/// Clone button flavour offered on project pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneProtocol {
	Ssh,
	Http,
}

impl CloneProtocol {
	/// `"ssh"` selects SSH, anything else the HTTP clone URL
	pub fn for_protocol(protocol: &str) -> Self {
		if protocol == "ssh" { CloneProtocol::Ssh } else { CloneProtocol::Http }
	}
}

pub struct SettingsPolicyResolver<'a> {
	settings: &'a dyn SettingsAccess,
	config: &'a InstanceConfig,
	key_sizes: &'a dyn KeySizeCapabilityProvider,
	storages: &'a dyn StorageCatalog,
	queues: &'a dyn QueueCatalog,
}

impl<'a> SettingsPolicyResolver<'a> {
	pub fn new(settings: &'a dyn SettingsAccess, config: &'a InstanceConfig) -> Self {
		Self { settings, config, key_sizes: &STATIC_KEY_SIZES, storages: config, queues: config }
	}

	// Collaborators
	pub fn key_sizes(mut self, provider: &'a dyn KeySizeCapabilityProvider) -> Self {
		self.key_sizes = provider;
		self
	}

	pub fn storage_catalog(mut self, catalog: &'a dyn StorageCatalog) -> Self {
		self.storages = catalog;
		self
	}

	pub fn queue_catalog(mut self, catalog: &'a dyn QueueCatalog) -> Self {
		self.queues = catalog;
		self
	}

	/// Attributes the settings form may mass-assign
	pub fn whitelisted_attributes(&self) -> &'static [&'static str] {
		whitelist::visible_attributes()
	}

	// Delegated flags
	//*****************
	pub fn gravatar_enabled(&self) -> bool {
		self.settings.bool_value("gravatar_enabled")
	}

	pub fn signup_enabled(&self) -> bool {
		self.settings.bool_value("signup_enabled")
	}

	pub fn password_authentication_enabled(&self) -> bool {
		self.settings.bool_value("password_authentication_enabled")
	}

	pub fn akismet_enabled(&self) -> bool {
		self.settings.bool_value("akismet_enabled")
	}

	pub fn koding_enabled(&self) -> bool {
		self.settings.bool_value("koding_enabled")
	}

	pub fn user_oauth_applications(&self) -> bool {
		self.settings.bool_value("user_oauth_applications")
	}

	// Git access protocol
	//*********************
	/// Whether git access is restricted to a single protocol
	pub fn allowed_protocols_present(&self) -> bool {
		self.settings
			.str_value("enabled_git_access_protocol")
			.is_some_and(|p| !p.trim().is_empty())
	}

	/// The only protocol git access is allowed over, if restricted. "http"
	/// resolves to the configured web protocol.
	pub fn enabled_protocol(&self) -> Option<&str> {
		match self.settings.str_value("enabled_git_access_protocol") {
			Some("http") => Some(self.config.web.protocol.as_str()),
			Some("ssh") => Some("ssh"),
			_ => None,
		}
	}

	// Option lists
	//**************
	pub fn key_restriction_options(&self, key_type: KeyType) -> FgResult<Vec<KeyRestrictionOption>> {
		let sizes = self.key_sizes.supported_sizes(key_type)?;
		if sizes.is_empty() {
			debug!("No supported sizes for {} keys", key_type);
		}
		Ok(options::key_restriction_options(sizes))
	}

	/// Like `key_restriction_options`, for a type given by name. Unknown
	/// names get only the "Allowed" and "Forbidden" entries.
	pub fn key_restriction_options_named(&self, key_type: &str) -> FgResult<Vec<KeyRestrictionOption>> {
		match KeyType::parse(key_type) {
			Some(key_type) => self.key_restriction_options(key_type),
			None => {
				debug!("Unknown key type '{}'", key_type);
				Ok(options::key_restriction_options(std::iter::empty()))
			}
		}
	}

	pub fn restricted_visibility_levels(&self) -> BTreeSet<VisibilityLevel> {
		match self.settings.set_value("restricted_visibility_levels") {
			Some(stored) => options::parse_visibility_levels(stored.iter().map(String::as_str)),
			None => BTreeSet::new(),
		}
	}

	pub fn visibility_level_checkbox_states(&self) -> Vec<CheckboxState<VisibilityLevel>> {
		options::visibility_level_checkbox_states(&self.restricted_visibility_levels())
	}

	pub fn import_source_checkbox_states(&self) -> Vec<ImportSourceCheckbox> {
		options::import_source_checkbox_states(self.set("import_sources"))
	}

	/// Button-based providers, checked unless listed in
	/// `disabled_oauth_sign_in_sources`
	pub fn oauth_provider_checkbox_states(&self) -> Vec<CheckboxState<String>> {
		let providers = self.config.button_based_providers();
		options::oauth_provider_checkbox_states(&providers, self.set("disabled_oauth_sign_in_sources"))
	}

	pub fn repository_storage_options(&self) -> FgResult<Vec<StorageOption>> {
		let storages = self.storages.list_storages()?;
		Ok(options::storage_options(&storages, self.set("repository_storages")))
	}

	pub fn sidekiq_queue_options(&self) -> FgResult<Vec<QueueOption>> {
		let queues = self.queues.list_queues()?;
		Ok(options::queue_options(&queues, self.set("sidekiq_throttling_queues")))
	}

	fn set(&self, key: &str) -> &BTreeSet<String> {
		static EMPTY: BTreeSet<String> = BTreeSet::new();
		self.settings.set_value(key).unwrap_or(&EMPTY)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use forge_core::settings::{SettingValue, SettingsSnapshot};

	#[test]
	fn test_clone_protocol() {
		assert_eq!(CloneProtocol::for_protocol("ssh"), CloneProtocol::Ssh);
		assert_eq!(CloneProtocol::for_protocol("http"), CloneProtocol::Http);
		assert_eq!(CloneProtocol::for_protocol("https"), CloneProtocol::Http);
	}

	#[test]
	fn test_enabled_protocol() {
		let mut config = InstanceConfig::default();
		config.web.protocol = "https".into();

		let http = SettingsSnapshot::from_values([(
			"enabled_git_access_protocol",
			SettingValue::String("http".into()),
		)]);
		let resolver = SettingsPolicyResolver::new(&http, &config);
		assert!(resolver.allowed_protocols_present());
		assert_eq!(resolver.enabled_protocol(), Some("https"));

		let ssh = SettingsSnapshot::from_values([(
			"enabled_git_access_protocol",
			SettingValue::String("ssh".into()),
		)]);
		assert_eq!(SettingsPolicyResolver::new(&ssh, &config).enabled_protocol(), Some("ssh"));

		let both = SettingsSnapshot::from_values([(
			"enabled_git_access_protocol",
			SettingValue::String(String::new()),
		)]);
		let resolver = SettingsPolicyResolver::new(&both, &config);
		assert!(!resolver.allowed_protocols_present());
		assert_eq!(resolver.enabled_protocol(), None);
	}

	#[test]
	fn test_unknown_key_type_gets_base_options() {
		let snapshot = SettingsSnapshot::default();
		let config = InstanceConfig::default();
		let resolver = SettingsPolicyResolver::new(&snapshot, &config);
		let options =
			resolver.key_restriction_options_named("ssh-quantum").expect("unknown type resolves");
		assert_eq!(options.len(), 2);

		let options = resolver.key_restriction_options_named("RSA").expect("RSA resolves");
		assert_eq!(options.len(), 2 + 4);
	}
}

// vim: ts=4
