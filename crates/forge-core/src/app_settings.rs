//! Application settings schema
//!
//! Registers every attribute of the application settings record with its
//! type, default and validation rules.

use crate::catalog::import_source_values;
use crate::prelude::*;
use crate::settings::{SettingDefinition, SettingValue, SettingsRegistry};
use crate::ssh_key::{is_valid_restriction, ALLOWED_KEY_VALUE};

/// Boolean flags: (key, description, default)
const FLAGS: &[(&str, &str, bool)] = &[
	("akismet_enabled", "Check issues and snippets for spam with Akismet", false),
	("auto_devops_enabled", "Enable Auto DevOps for projects by default", false),
	("clientside_sentry_enabled", "Report front-end errors to Sentry", false),
	("domain_blacklist_enabled", "Reject sign-ups from blacklisted email domains", false),
	("email_author_in_body", "Put the author's email in notification bodies", false),
	("gravatar_enabled", "Show Gravatar avatars", true),
	("hashed_storage_enabled", "Store new repositories under hashed paths", false),
	("help_page_hide_commercial_content", "Hide marketing content on the help page", false),
	("housekeeping_bitmaps_enabled", "Write bitmap indexes during housekeeping", true),
	("housekeeping_enabled", "Run git housekeeping after pushes", true),
	("html_emails_enabled", "Send HTML emails in addition to plain text", true),
	("koding_enabled", "Enable the Koding integration", false),
	("metrics_enabled", "Collect InfluxDB performance metrics", false),
	("password_authentication_enabled", "Allow sign-in with a password", true),
	("performance_bar_enabled", "Show the performance bar to the allowed group", false),
	("plantuml_enabled", "Render PlantUML diagrams", false),
	("project_export_enabled", "Allow exporting projects", true),
	("prometheus_metrics_enabled", "Expose Prometheus metrics", false),
	("recaptcha_enabled", "Require reCAPTCHA on sign-up", false),
	("repository_checks_enabled", "Run periodic repository integrity checks", true),
	("require_two_factor_authentication", "Require two-factor authentication for all users", false),
	("send_user_confirmation_email", "Send a confirmation email on sign-up", false),
	("sentry_enabled", "Report back-end errors to Sentry", false),
	("shared_runners_enabled", "Enable shared runners for new projects", true),
	("sidekiq_throttling_enabled", "Throttle the selected job queues", false),
	("signup_enabled", "Allow new user sign-ups", true),
	("unique_ips_limit_enabled", "Limit sign-ins per user to a number of unique IPs", false),
	("usage_ping_enabled", "Send a weekly usage ping", true),
	("user_default_external", "Mark newly registered users as external", false),
	("user_oauth_applications", "Allow users to register OAuth applications", true),
	("version_check_enabled", "Check for new releases", true),
];

/// Integer attributes that must not be negative: (key, description, default)
const COUNTS: &[(&str, &str, i64)] = &[
	("circuitbreaker_failure_count_threshold", "Storage failures before access is blocked", 3),
	("circuitbreaker_failure_reset_time", "Seconds failure information is kept", 1800),
	("circuitbreaker_failure_wait_time", "Seconds access is blocked after a failure", 30),
	("circuitbreaker_storage_timeout", "Seconds to wait for storage access", 30),
	("container_registry_token_expire_delay", "Registry token lifetime in minutes", 5),
	("default_projects_limit", "Projects a new user may create", 100_000),
	("housekeeping_full_repack_period", "Pushes between full repacks", 50),
	("housekeeping_gc_period", "Pushes between git gc runs", 200),
	("housekeeping_incremental_repack_period", "Pushes between incremental repacks", 10),
	("max_artifacts_size", "Maximum artifacts size in MB", 100),
	("max_attachment_size", "Maximum attachment size in MB", 10),
	("max_pages_size", "Maximum Pages site size in MB", 100),
	("metrics_method_call_threshold", "Method call threshold in milliseconds", 10),
	("metrics_packet_size", "Metrics per UDP packet", 1),
	("metrics_pool_size", "InfluxDB connection pool size", 16),
	("metrics_port", "InfluxDB UDP port", 8089),
	("metrics_sample_interval", "Seconds between metric samples", 15),
	("metrics_timeout", "InfluxDB timeout in seconds", 10),
	("session_expire_delay", "Session lifetime in minutes", 10080),
	("terminal_max_session_time", "Web terminal session limit in seconds, 0 for none", 0),
	("two_factor_grace_period", "Hours before two-factor authentication is enforced", 48),
	("unique_ips_limit_per_user", "Unique IPs allowed per user", 10),
	("unique_ips_limit_time_window", "Seconds an IP counts towards the limit", 3600),
];

/// Free-form text attributes that may stay unset: (key, description)
const TEXTS: &[(&str, &str)] = &[
	("admin_notification_email", "Address receiving admin notifications"),
	("after_sign_out_path", "Redirect target after sign-out"),
	("after_sign_up_text", "Text shown after sign-up"),
	("akismet_api_key", "Akismet API key"),
	("clientside_sentry_dsn", "Sentry DSN for front-end errors"),
	("domain_blacklist_raw", "Blacklisted sign-up domains, one per line"),
	("domain_whitelist_raw", "Whitelisted sign-up domains, one per line"),
	("help_page_support_url", "Support page URL shown on the help page"),
	("help_page_text", "Additional help page text"),
	("home_page_url", "Redirect target for signed-out visitors"),
	("koding_url", "Koding instance URL"),
	("plantuml_url", "PlantUML server URL"),
	("recaptcha_private_key", "reCAPTCHA private key"),
	("recaptcha_site_key", "reCAPTCHA site key"),
	("sentry_dsn", "Sentry DSN for back-end errors"),
	("shared_runners_text", "Text shown on the shared runners page"),
	("sign_in_text", "Text shown on the sign-in page"),
];

fn non_negative(key: &'static str) -> impl Fn(&SettingValue) -> FgResult<()> + Send + Sync {
	move |value| match value {
		SettingValue::Int(i) if *i >= 0 => Ok(()),
		_ => Err(Error::ValidationError(format!("'{}' must be a non-negative integer", key))),
	}
}

fn visibility(key: &'static str) -> impl Fn(&SettingValue) -> FgResult<()> + Send + Sync {
	move |value| match value {
		SettingValue::String(s) if VisibilityLevel::parse(s).is_some() => Ok(()),
		_ => Err(Error::ValidationError(format!("'{}' must be a visibility level", key))),
	}
}

fn visibility_set(value: &SettingValue) -> FgResult<()> {
	match value {
		SettingValue::Set(levels) => match levels.iter().find(|l| VisibilityLevel::parse(l).is_none()) {
			Some(level) => Err(Error::ValidationError(format!("Unknown visibility level '{}'", level))),
			None => Ok(()),
		},
		_ => Err(Error::ValidationError("restricted_visibility_levels must be a set".into())),
	}
}

fn key_restriction(key: &'static str) -> impl Fn(&SettingValue) -> FgResult<()> + Send + Sync {
	move |value| match value {
		SettingValue::Int(i) if is_valid_restriction(*i) => Ok(()),
		_ => Err(Error::ValidationError(format!("'{}' is not a valid key restriction", key))),
	}
}

fn parse_decimal(key: &str, value: &SettingValue) -> FgResult<f64> {
	value
		.as_str()
		.and_then(|s| s.trim().parse::<f64>().ok())
		.filter(|f| f.is_finite())
		.ok_or_else(|| Error::ValidationError(format!("'{}' must be a decimal number", key)))
}

/// Register all application settings
pub fn register_settings(registry: &mut SettingsRegistry) -> FgResult<()> {
	for &(key, description, default) in FLAGS {
		registry.register(
			SettingDefinition::builder(key)
				.description(description)
				.default(SettingValue::Bool(default))
				.build()?,
		)?;
	}

	for &(key, description, default) in COUNTS {
		registry.register(
			SettingDefinition::builder(key)
				.description(description)
				.default(SettingValue::Int(default))
				.validator(non_negative(key))
				.build()?,
		)?;
	}

	for &(key, description) in TEXTS {
		registry.register(
			SettingDefinition::builder(key)
				.description(description)
				.optional(SettingValue::String(String::new()))
				.build()?,
		)?;
	}

	// Visibility defaults
	for key in ["default_group_visibility", "default_project_visibility", "default_snippet_visibility"]
	{
		registry.register(
			SettingDefinition::builder(key)
				.description("Default visibility of new items")
				.default(SettingValue::String(VisibilityLevel::Private.as_str().into()))
				.validator(visibility(key))
				.build()?,
		)?;
	}

	registry.register(
		SettingDefinition::builder("restricted_visibility_levels")
			.description("Visibility levels only administrators may use")
			.default(SettingValue::set(Vec::<String>::new()))
			.validator(visibility_set)
			.build()?,
	)?;

	// SSH key restrictions
	for key_type in KeyType::ALL {
		let key = key_type.restriction_setting();
		registry.register(
			SettingDefinition::builder(key)
				.description(format!("Restriction on {} SSH keys", key_type.as_str().to_uppercase()))
				.default(SettingValue::Int(ALLOWED_KEY_VALUE))
				.validator(key_restriction(key))
				.build()?,
		)?;
	}

	registry.register(
		SettingDefinition::builder("default_branch_protection")
			.description("0: unprotected, 1: developers can push, 2: fully protected")
			.default(SettingValue::Int(2))
			.validator(|value| match value {
				SettingValue::Int(0..=2) => Ok(()),
				_ => Err(Error::ValidationError(
					"default_branch_protection must be 0, 1 or 2".into(),
				)),
			})
			.build()?,
	)?;

	registry.register(
		SettingDefinition::builder("default_artifacts_expire_in")
			.description("Default expiry of job artifacts")
			.default(SettingValue::String("30 days".into()))
			.build()?,
	)?;

	registry.register(
		SettingDefinition::builder("enabled_git_access_protocol")
			.description("Restrict git access to one protocol; empty allows both")
			.optional(SettingValue::String(String::new()))
			.validator(|value| match value.as_str() {
				Some("" | "ssh" | "http") => Ok(()),
				_ => Err(Error::ValidationError(
					"enabled_git_access_protocol must be empty, ssh or http".into(),
				)),
			})
			.build()?,
	)?;

	registry.register(
		SettingDefinition::builder("import_sources")
			.description("Sources projects may be imported from")
			.default(SettingValue::set(import_source_values()))
			.validator(|value| match value {
				SettingValue::Set(sources) => {
					match sources.iter().find(|s| !import_source_values().any(|v| v == s.as_str())) {
						Some(source) => {
							Err(Error::ValidationError(format!("Unknown import source '{}'", source)))
						}
						None => Ok(()),
					}
				}
				_ => Err(Error::ValidationError("import_sources must be a set".into())),
			})
			.build()?,
	)?;

	registry.register(
		SettingDefinition::builder("disabled_oauth_sign_in_sources")
			.description("OAuth providers hidden from the sign-in page")
			.default(SettingValue::set(Vec::<String>::new()))
			.build()?,
	)?;

	registry.register(
		SettingDefinition::builder("metrics_host")
			.description("InfluxDB host")
			.default(SettingValue::String("localhost".into()))
			.build()?,
	)?;

	registry.register(
		SettingDefinition::builder("performance_bar_allowed_group_id")
			.description("Group whose members see the performance bar")
			.optional(SettingValue::Int(0))
			.validator(non_negative("performance_bar_allowed_group_id"))
			.build()?,
	)?;

	registry.register(
		SettingDefinition::builder("polling_interval_multiplier")
			.description("Multiplier for front-end polling intervals, 0 disables polling")
			.default(SettingValue::String("1".into()))
			.validator(|value| {
				if parse_decimal("polling_interval_multiplier", value)? < 0.0 {
					return Err(Error::ValidationError(
						"polling_interval_multiplier must not be negative".into(),
					));
				}
				Ok(())
			})
			.build()?,
	)?;

	registry.register(
		SettingDefinition::builder("repository_storages")
			.description("Storages new repositories are created on")
			.default(SettingValue::set(["default"]))
			.build()?,
	)?;

	registry.register(
		SettingDefinition::builder("sidekiq_throttling_factor")
			.description("Share of job workers the throttled queues may use")
			.optional(SettingValue::String(String::new()))
			.validator(|value| {
				let factor = parse_decimal("sidekiq_throttling_factor", value)?;
				if factor <= 0.0 || factor >= 1.0 {
					return Err(Error::ValidationError(
						"sidekiq_throttling_factor must be between 0 and 1".into(),
					));
				}
				Ok(())
			})
			.build()?,
	)?;

	registry.register(
		SettingDefinition::builder("sidekiq_throttling_queues")
			.description("Job queues subject to throttling")
			.default(SettingValue::set(Vec::<String>::new()))
			.build()?,
	)?;

	Ok(())
}


// vim: ts=4
