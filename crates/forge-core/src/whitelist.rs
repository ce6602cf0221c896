//! Attributes of the application settings record open to mass-assignment

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::prelude::*;
use crate::settings::FrozenSettingsRegistry;

/// Attribute names an admin form may bulk-update, in display order
pub const VISIBLE_ATTRIBUTES: [&str; 90] = [
	"admin_notification_email",
	"after_sign_out_path",
	"after_sign_up_text",
	"akismet_api_key",
	"akismet_enabled",
	"auto_devops_enabled",
	"circuitbreaker_failure_count_threshold",
	"circuitbreaker_failure_reset_time",
	"circuitbreaker_failure_wait_time",
	"circuitbreaker_storage_timeout",
	"clientside_sentry_dsn",
	"clientside_sentry_enabled",
	"container_registry_token_expire_delay",
	"default_artifacts_expire_in",
	"default_branch_protection",
	"default_group_visibility",
	"default_project_visibility",
	"default_projects_limit",
	"default_snippet_visibility",
	"disabled_oauth_sign_in_sources",
	"domain_blacklist_enabled",
	"domain_blacklist_raw",
	"domain_whitelist_raw",
	"dsa_key_restriction",
	"ecdsa_key_restriction",
	"ed25519_key_restriction",
	"email_author_in_body",
	"enabled_git_access_protocol",
	"gravatar_enabled",
	"hashed_storage_enabled",
	"help_page_hide_commercial_content",
	"help_page_support_url",
	"help_page_text",
	"home_page_url",
	"housekeeping_bitmaps_enabled",
	"housekeeping_enabled",
	"housekeeping_full_repack_period",
	"housekeeping_gc_period",
	"housekeeping_incremental_repack_period",
	"html_emails_enabled",
	"import_sources",
	"koding_enabled",
	"koding_url",
	"max_artifacts_size",
	"max_attachment_size",
	"max_pages_size",
	"metrics_enabled",
	"metrics_host",
	"metrics_method_call_threshold",
	"metrics_packet_size",
	"metrics_pool_size",
	"metrics_port",
	"metrics_sample_interval",
	"metrics_timeout",
	"password_authentication_enabled",
	"performance_bar_allowed_group_id",
	"performance_bar_enabled",
	"plantuml_enabled",
	"plantuml_url",
	"polling_interval_multiplier",
	"project_export_enabled",
	"prometheus_metrics_enabled",
	"recaptcha_enabled",
	"recaptcha_private_key",
	"recaptcha_site_key",
	"repository_checks_enabled",
	"repository_storages",
	"require_two_factor_authentication",
	"restricted_visibility_levels",
	"rsa_key_restriction",
	"send_user_confirmation_email",
	"sentry_dsn",
	"sentry_enabled",
	"session_expire_delay",
	"shared_runners_enabled",
	"shared_runners_text",
	"sidekiq_throttling_enabled",
	"sidekiq_throttling_factor",
	"sidekiq_throttling_queues",
	"sign_in_text",
	"signup_enabled",
	"terminal_max_session_time",
	"two_factor_grace_period",
	"unique_ips_limit_enabled",
	"unique_ips_limit_per_user",
	"unique_ips_limit_time_window",
	"usage_ping_enabled",
	"user_default_external",
	"user_oauth_applications",
	"version_check_enabled",
];

static WHITELIST: LazyLock<HashSet<&'static str>> =
	LazyLock::new(|| VISIBLE_ATTRIBUTES.iter().copied().collect());

/// The whitelisted attribute names. Same slice on every call.
pub fn visible_attributes() -> &'static [&'static str] {
	&VISIBLE_ATTRIBUTES
}

pub fn is_whitelisted(name: &str) -> bool {
	WHITELIST.contains(name)
}

/// Every whitelisted name must have a definition in the registry
pub fn validate_whitelist(registry: &FrozenSettingsRegistry) -> FgResult<()> {
	let missing: Vec<&str> =
		VISIBLE_ATTRIBUTES.iter().copied().filter(|name| !registry.contains(name)).collect();

	if !missing.is_empty() {
		return Err(Error::ConfigError(format!(
			"Whitelisted settings without definition: {}",
			missing.join(", ")
		)));
	}

	debug!("Settings whitelist verified ({} attributes)", VISIBLE_ATTRIBUTES.len());
	Ok(())
}


// vim: ts=4
