//! Settings policy resolver tests
//!
//! Resolve admin option lists from snapshots built against the real
//! application settings schema.

use serde_json::json;
use std::collections::{BTreeSet, HashMap};

use forge_admin::SettingsPolicyResolver;
use forge_core::config::InstanceConfig;
use forge_core::settings::SettingsSnapshot;
use forge_core::ssh_key::FORBIDDEN_KEY_VALUE;
use forge_types::catalog::{KeySizeCapabilityProvider, QueueCatalog, StorageCatalog};
use forge_types::error::{Error, FgResult};
use forge_types::types::{KeyType, StorageInfo, VisibilityLevel};

const CONFIG: &str = r"
web:
  protocol: https
omniauth:
  providers:
    - name: twitter
    - name: github
    - name: ldapmain
repositories:
  storages:
    default:
      path: /var/opt/forge/repositories
    nfs:
      path: /mnt/nfs/repositories
sidekiq:
  queues: [default, mailers, pipeline_processing]
";

struct FixedSizes(Vec<u32>);

impl KeySizeCapabilityProvider for FixedSizes {
	fn supported_sizes(&self, _key_type: KeyType) -> FgResult<BTreeSet<u32>> {
		Ok(self.0.iter().copied().collect())
	}
}

struct Offline;

impl KeySizeCapabilityProvider for Offline {
	fn supported_sizes(&self, _key_type: KeyType) -> FgResult<BTreeSet<u32>> {
		Err(Error::Unavailable("capability provider".into()))
	}
}

impl StorageCatalog for Offline {
	fn list_storages(&self) -> FgResult<Vec<StorageInfo>> {
		Err(Error::Unavailable("storage catalog".into()))
	}
}

impl QueueCatalog for Offline {
	fn list_queues(&self) -> FgResult<Vec<String>> {
		Err(Error::Unavailable("queue catalog".into()))
	}
}

fn config() -> InstanceConfig {
	InstanceConfig::from_yaml_str(CONFIG).expect("test config should parse")
}

fn snapshot(record: serde_json::Value) -> SettingsSnapshot {
	let registry = forge_core::build_registry().expect("registry should build");
	let record: HashMap<String, serde_json::Value> =
		serde_json::from_value(record).expect("record should be an object");
	SettingsSnapshot::from_record(&registry, &record).expect("record should resolve")
}

#[test]
fn test_rsa_key_restriction_scenario() {
	let settings = snapshot(json!({}));
	let config = config();
	let sizes = FixedSizes(vec![4096, 2048]);
	let resolver = SettingsPolicyResolver::new(&settings, &config).key_sizes(&sizes);

	let options = resolver.key_restriction_options(KeyType::Rsa).expect("options");
	let pairs: Vec<_> = options.iter().map(|o| (o.label.as_str(), o.value)).collect();
	assert_eq!(
		pairs,
		vec![
			("Allowed", 0),
			("Must be at least 2048 bits", 2048),
			("Must be at least 4096 bits", 4096),
			("Forbidden", FORBIDDEN_KEY_VALUE),
		]
	);
}

#[test]
fn test_key_restriction_shape_for_every_type() {
	let settings = snapshot(json!({}));
	let config = config();
	let resolver = SettingsPolicyResolver::new(&settings, &config);

	for key_type in KeyType::ALL {
		let sizes = forge_core::ssh_key::supported_sizes(key_type);
		let options = resolver.key_restriction_options(key_type).expect("options");
		assert_eq!(options.len(), 2 + sizes.len());
		assert_eq!((options[0].label.as_str(), options[0].value), ("Allowed", 0));
		let last = &options[options.len() - 1];
		assert_eq!((last.label.as_str(), last.value), ("Forbidden", FORBIDDEN_KEY_VALUE));
		let middle: Vec<i64> = options[1..options.len() - 1].iter().map(|o| o.value).collect();
		assert!(middle.windows(2).all(|w| w[0] < w[1]));
	}
}

#[test]
fn test_empty_provider_gives_base_options() {
	let settings = snapshot(json!({}));
	let config = config();
	let sizes = FixedSizes(Vec::new());
	let resolver = SettingsPolicyResolver::new(&settings, &config).key_sizes(&sizes);

	let options = resolver.key_restriction_options(KeyType::Ed25519).expect("options");
	assert_eq!(options.len(), 2);
}

#[test]
fn test_unavailable_collaborators_propagate() {
	let settings = snapshot(json!({}));
	let config = config();
	let resolver = SettingsPolicyResolver::new(&settings, &config)
		.key_sizes(&Offline)
		.storage_catalog(&Offline)
		.queue_catalog(&Offline);

	assert!(matches!(resolver.key_restriction_options(KeyType::Rsa), Err(Error::Unavailable(_))));
	assert!(matches!(resolver.repository_storage_options(), Err(Error::Unavailable(_))));
	assert!(matches!(resolver.sidekiq_queue_options(), Err(Error::Unavailable(_))));
}

#[test]
fn test_visibility_checkboxes_from_snapshot() {
	let settings = snapshot(json!({ "restricted_visibility_levels": ["private"] }));
	let config = config();
	let resolver = SettingsPolicyResolver::new(&settings, &config);

	let states: Vec<_> =
		resolver.visibility_level_checkbox_states().into_iter().map(|s| (s.value, s.checked)).collect();
	assert_eq!(
		states,
		vec![
			(VisibilityLevel::Private, true),
			(VisibilityLevel::Internal, false),
			(VisibilityLevel::Public, false),
		]
	);
}

#[test]
fn test_visibility_checkboxes_accept_integer_codes() {
	let settings = snapshot(json!({ "restricted_visibility_levels": ["10", "20"] }));
	let config = config();
	let resolver = SettingsPolicyResolver::new(&settings, &config);

	let checked: Vec<_> = resolver
		.visibility_level_checkbox_states()
		.into_iter()
		.filter(|s| s.checked)
		.map(|s| s.value)
		.collect();
	assert_eq!(checked, vec![VisibilityLevel::Internal, VisibilityLevel::Public]);
}

#[test]
fn test_import_sources_checked_by_inclusion() {
	let settings = snapshot(json!({ "import_sources": ["bitbucket", "git"] }));
	let config = config();
	let resolver = SettingsPolicyResolver::new(&settings, &config);

	let checked: Vec<_> = resolver
		.import_source_checkbox_states()
		.into_iter()
		.filter(|s| s.checked)
		.map(|s| s.name)
		.collect();
	assert_eq!(checked, ["Bitbucket", "Repo by URL"]);

	// Default record enables every source
	let defaults = snapshot(json!({}));
	let resolver = SettingsPolicyResolver::new(&defaults, &config);
	assert!(resolver.import_source_checkbox_states().iter().all(|s| s.checked));
}

#[test]
fn test_oauth_providers_checked_by_exclusion() {
	let settings = snapshot(json!({ "disabled_oauth_sign_in_sources": ["twitter"] }));
	let config = config();
	let resolver = SettingsPolicyResolver::new(&settings, &config);

	let states: Vec<_> = resolver
		.oauth_provider_checkbox_states()
		.into_iter()
		.map(|s| (s.value, s.checked))
		.collect();
	// ldapmain is form based and never listed
	assert_eq!(states, vec![("twitter".to_string(), false), ("github".to_string(), true)]);
}

#[test]
fn test_inclusion_and_exclusion_stay_asymmetric() {
	let settings = snapshot(json!({
		"import_sources": [],
		"restricted_visibility_levels": [],
		"disabled_oauth_sign_in_sources": [],
	}));
	let config = config();
	let resolver = SettingsPolicyResolver::new(&settings, &config);

	assert!(resolver.import_source_checkbox_states().iter().all(|s| !s.checked));
	assert!(resolver.visibility_level_checkbox_states().iter().all(|s| !s.checked));
	assert!(resolver.oauth_provider_checkbox_states().iter().all(|s| s.checked));
}

#[test]
fn test_storage_and_queue_options() {
	let settings = snapshot(json!({
		"repository_storages": ["nfs"],
		"sidekiq_throttling_queues": ["mailers"],
	}));
	let config = config();
	let resolver = SettingsPolicyResolver::new(&settings, &config);

	let storages = resolver.repository_storage_options().expect("storages");
	let storages: Vec<_> =
		storages.iter().map(|s| (s.label.as_str(), s.name.as_str(), s.selected)).collect();
	assert_eq!(
		storages,
		vec![
			("default - /var/opt/forge/repositories", "default", false),
			("nfs - /mnt/nfs/repositories", "nfs", true),
		]
	);

	let queues = resolver.sidekiq_queue_options().expect("queues");
	let selected: Vec<_> = queues.iter().filter(|q| q.selected).map(|q| q.name.as_str()).collect();
	assert_eq!(selected, ["mailers"]);
	assert_eq!(queues.len(), 3);
}

#[test]
fn test_delegated_flags() {
	let settings = snapshot(json!({ "signup_enabled": false, "koding_enabled": true }));
	let config = config();
	let resolver = SettingsPolicyResolver::new(&settings, &config);

	assert!(!resolver.signup_enabled());
	assert!(resolver.koding_enabled());
	assert!(resolver.gravatar_enabled());
	assert!(resolver.password_authentication_enabled());
	assert!(!resolver.akismet_enabled());
	assert!(resolver.user_oauth_applications());
	assert!(!resolver.allowed_protocols_present());
}

#[test]
fn test_enabled_protocol_from_gitlab_section() {
	let settings = snapshot(json!({ "enabled_git_access_protocol": "http" }));
	let config =
		InstanceConfig::from_yaml_str("gitlab:\n  protocol: https\n").expect("config should parse");
	let resolver = SettingsPolicyResolver::new(&settings, &config);

	assert!(resolver.allowed_protocols_present());
	assert_eq!(resolver.enabled_protocol(), Some("https"));
}

#[test]
fn test_whitelist_through_resolver() {
	let settings = snapshot(json!({}));
	let config = config();
	let resolver = SettingsPolicyResolver::new(&settings, &config);

	let attributes = resolver.whitelisted_attributes();
	assert_eq!(attributes, resolver.whitelisted_attributes());
	assert!(attributes.contains(&"rsa_key_restriction"));
	assert!(attributes.contains(&"disabled_oauth_sign_in_sources"));
}

// vim: ts=4
