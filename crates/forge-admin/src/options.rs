//! Option list derivations
//!
//! Pure functions over explicit inputs. The resolver feeds them from a
//! settings snapshot; callers holding the inputs already can use them
//! directly.

use serde::Serialize;
use std::collections::BTreeSet;

use forge_core::catalog::{import_sources, ImportSource};
use forge_core::ssh_key::{ALLOWED_KEY_VALUE, FORBIDDEN_KEY_VALUE};

use crate::prelude::*;

pub const ALLOWED_LABEL: &str = "Allowed";
pub const FORBIDDEN_LABEL: &str = "Forbidden";

/// One entry of a key restriction select
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyRestrictionOption {
	pub label: String,
	pub value: i64,
}

impl KeyRestrictionOption {
	fn new(label: impl Into<String>, value: i64) -> Self {
		Self { label: label.into(), value }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckboxState<T> {
	pub value: T,
	pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSourceCheckbox {
	pub name: &'static str,
	pub source: &'static str,
	pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageOption {
	/// "<name> - <path>"
	pub label: String,
	pub name: String,
	pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueOption {
	pub name: String,
	pub selected: bool,
}

/// Restriction tiers for one key type: "Allowed", one minimum per supported
/// size in ascending order, then "Forbidden".
///
/// Duplicate sizes collapse, so thresholds are strictly increasing. A size of
/// zero is skipped since it is the "Allowed" value. With no supported sizes
/// only the two fixed entries remain.
pub fn key_restriction_options<I>(supported_sizes: I) -> Vec<KeyRestrictionOption>
where
	I: IntoIterator<Item = u32>,
{
	let sizes: BTreeSet<u32> = supported_sizes.into_iter().filter(|&bits| bits > 0).collect();

	let mut options = Vec::with_capacity(sizes.len() + 2);
	options.push(KeyRestrictionOption::new(ALLOWED_LABEL, ALLOWED_KEY_VALUE));
	options.extend(sizes.into_iter().map(|bits| {
		KeyRestrictionOption::new(format!("Must be at least {} bits", bits), i64::from(bits))
	}));
	options.push(KeyRestrictionOption::new(FORBIDDEN_LABEL, FORBIDDEN_KEY_VALUE));
	options
}

/// Checked when the level is restricted
pub fn visibility_level_checkbox_states(
	restricted: &BTreeSet<VisibilityLevel>,
) -> Vec<CheckboxState<VisibilityLevel>> {
	VisibilityLevel::values()
		.iter()
		.map(|&level| CheckboxState { value: level, checked: restricted.contains(&level) })
		.collect()
}

/// Restricted levels as stored in the settings record. Entries that name no
/// known level are dropped.
pub fn parse_visibility_levels<'a, I>(stored: I) -> BTreeSet<VisibilityLevel>
where
	I: IntoIterator<Item = &'a str>,
{
	stored.into_iter().filter_map(VisibilityLevel::parse).collect()
}

/// Checked when the source is enabled
pub fn import_source_checkbox_states(enabled: &BTreeSet<String>) -> Vec<ImportSourceCheckbox> {
	import_sources()
		.iter()
		.map(|&ImportSource { name, source }| ImportSourceCheckbox {
			name,
			source,
			checked: enabled.contains(source),
		})
		.collect()
}

/// Checked when the provider is NOT disabled.
///
/// Inverse of the other checkbox groups: the stored set lists the providers
/// that are switched off.
pub fn oauth_provider_checkbox_states<S: AsRef<str>>(
	providers: &[S],
	disabled: &BTreeSet<String>,
) -> Vec<CheckboxState<String>> {
	providers
		.iter()
		.map(|p| {
			let name = p.as_ref();
			CheckboxState { value: name.to_string(), checked: !disabled.contains(name) }
		})
		.collect()
}

pub fn storage_options(storages: &[StorageInfo], selected: &BTreeSet<String>) -> Vec<StorageOption> {
	storages
		.iter()
		.map(|s| StorageOption {
			label: format!("{} - {}", s.name, s.path),
			name: s.name.clone(),
			selected: selected.contains(&s.name),
		})
		.collect()
}

pub fn queue_options(queues: &[String], selected: &BTreeSet<String>) -> Vec<QueueOption> {
	queues
		.iter()
		.map(|q| QueueOption { name: q.clone(), selected: selected.contains(q) })
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn labels(options: &[KeyRestrictionOption]) -> Vec<(&str, i64)> {
		options.iter().map(|o| (o.label.as_str(), o.value)).collect()
	}

	#[test]
	fn test_key_restriction_rsa_scenario() {
		let options = key_restriction_options([4096, 2048]);
		assert_eq!(
			labels(&options),
			vec![
				("Allowed", 0),
				("Must be at least 2048 bits", 2048),
				("Must be at least 4096 bits", 4096),
				("Forbidden", FORBIDDEN_KEY_VALUE),
			]
		);
	}

	#[test]
	fn test_key_restriction_without_sizes() {
		let options = key_restriction_options(std::iter::empty());
		assert_eq!(labels(&options), vec![("Allowed", 0), ("Forbidden", FORBIDDEN_KEY_VALUE)]);
	}

	#[test]
	fn test_key_restriction_skips_zero_size() {
		let options = key_restriction_options([0, 2048]);
		assert_eq!(
			labels(&options),
			vec![
				("Allowed", ALLOWED_KEY_VALUE),
				("Must be at least 2048 bits", 2048),
				("Forbidden", FORBIDDEN_KEY_VALUE),
			]
		);
		assert_eq!(options.iter().filter(|o| o.value == ALLOWED_KEY_VALUE).count(), 1);
	}

	#[test]
	fn test_key_restriction_dedups_and_orders() {
		let sizes = [521, 256, 384, 256];
		let options = key_restriction_options(sizes);
		assert_eq!(options.len(), 2 + 3);
		let middle: Vec<i64> = options[1..options.len() - 1].iter().map(|o| o.value).collect();
		assert!(middle.windows(2).all(|w| w[0] < w[1]));
		assert_eq!(options.first().map(|o| o.value), Some(0));
		assert_eq!(options.last().map(|o| o.value), Some(FORBIDDEN_KEY_VALUE));
	}

	#[test]
	fn test_visibility_private_only() {
		let restricted = BTreeSet::from([VisibilityLevel::Private]);
		let states: Vec<_> = visibility_level_checkbox_states(&restricted)
			.into_iter()
			.map(|s| (s.value, s.checked))
			.collect();
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
	fn test_parse_visibility_ignores_unknown() {
		let levels = parse_visibility_levels(["public", "0", "galactic"]);
		assert_eq!(levels, BTreeSet::from([VisibilityLevel::Private, VisibilityLevel::Public]));
	}

	#[test]
	fn test_import_sources_by_inclusion() {
		let enabled = BTreeSet::from(["github".to_string(), "gitea".to_string()]);
		let states = import_source_checkbox_states(&enabled);
		assert_eq!(states.len(), import_sources().len());
		let checked: Vec<_> = states.iter().filter(|s| s.checked).map(|s| s.source).collect();
		assert_eq!(checked, ["github", "gitea"]);
		assert!(import_source_checkbox_states(&BTreeSet::new()).iter().all(|s| !s.checked));
	}

	#[test]
	fn test_oauth_by_exclusion() {
		let disabled = BTreeSet::from(["twitter".to_string()]);
		let states: Vec<_> = oauth_provider_checkbox_states(&["twitter", "github"], &disabled)
			.into_iter()
			.map(|s| (s.value, s.checked))
			.collect();
		assert_eq!(states, vec![("twitter".to_string(), false), ("github".to_string(), true)]);
	}

	#[test]
	fn test_empty_sets_give_opposite_defaults() {
		// Inclusion-based groups start unchecked, the exclusion-based OAuth group
		// starts checked. The asymmetry is deliberate.
		let empty = BTreeSet::new();
		assert!(visibility_level_checkbox_states(&BTreeSet::new()).iter().all(|s| !s.checked));
		assert!(import_source_checkbox_states(&empty).iter().all(|s| !s.checked));
		assert!(oauth_provider_checkbox_states(&["github", "google_oauth2"], &empty)
			.iter()
			.all(|s| s.checked));
	}

	#[test]
	fn test_storage_options() {
		let storages = vec![
			StorageInfo { name: "default".into(), path: "/repos".into() },
			StorageInfo { name: "nfs".into(), path: "/mnt/nfs".into() },
		];
		let selected = BTreeSet::from(["nfs".to_string()]);
		let options = storage_options(&storages, &selected);
		assert_eq!(options[0].label, "default - /repos");
		assert!(!options[0].selected);
		assert_eq!(options[1].label, "nfs - /mnt/nfs");
		assert!(options[1].selected);
	}

	#[test]
	fn test_queue_options() {
		let queues = vec!["default".to_string(), "mailers".to_string()];
		let selected = BTreeSet::from(["mailers".to_string()]);
		let options = queue_options(&queues, &selected);
		assert_eq!(
			options.iter().map(|o| (o.name.as_str(), o.selected)).collect::<Vec<_>>(),
			vec![("default", false), ("mailers", true)]
		);
	}
}

// vim: ts=4
