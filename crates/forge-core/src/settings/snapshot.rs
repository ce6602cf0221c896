//! Immutable, resolved view of the application settings record

use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

use super::types::{FrozenSettingsRegistry, SettingValue};
use crate::prelude::*;

/// Read-only access to resolved application settings.
///
/// Consumers depend on this trait rather than on the service or the store, so
/// one snapshot can be handed to every derivation of a request.
pub trait SettingsAccess: Send + Sync {
	fn value(&self, key: &str) -> Option<&SettingValue>;

	/// Boolean attribute, `false` when unset or of another type
	fn bool_value(&self, key: &str) -> bool {
		self.value(key).and_then(SettingValue::as_bool).unwrap_or(false)
	}

	fn int_value(&self, key: &str) -> Option<i64> {
		self.value(key).and_then(SettingValue::as_int)
	}

	fn str_value(&self, key: &str) -> Option<&str> {
		self.value(key).and_then(SettingValue::as_str)
	}

	fn set_value(&self, key: &str) -> Option<&BTreeSet<String>> {
		self.value(key).and_then(SettingValue::as_set)
	}

	/// Membership test on a set attribute. An unset attribute is an empty set.
	fn set_contains(&self, key: &str, item: &str) -> bool {
		self.set_value(key).is_some_and(|set| set.contains(item))
	}
}

/// Settings record resolved against the registry: stored values override
/// defaults, optional settings without a stored value are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsSnapshot {
	values: HashMap<String, SettingValue>,
}

impl SettingsSnapshot {
	/// Resolve a raw stored record
	pub fn from_record(
		registry: &FrozenSettingsRegistry,
		record: &HashMap<String, Value>,
	) -> FgResult<Self> {
		let mut values = HashMap::with_capacity(registry.len());

		for def in registry.list() {
			let stored = match record.get(&def.key) {
				Some(Value::Null) | None => None,
				Some(json) => Some(serde_json::from_value::<SettingValue>(json.clone()).map_err(
					|e| Error::ValidationError(format!("Invalid stored value for '{}': {}", def.key, e)),
				)?),
			};

			if let Some(value) = stored {
				def.check(&value)?;
				values.insert(def.key.clone(), value);
			} else if let Some(default) = &def.default {
				values.insert(def.key.clone(), default.clone());
			}
		}

		for key in record.keys().filter(|key| !registry.contains(key)) {
			debug!("Ignoring stored attribute without definition: {}", key);
		}

		Ok(Self { values })
	}

	/// Snapshot of registry defaults only
	pub fn defaults(registry: &FrozenSettingsRegistry) -> Self {
		let values = registry
			.list()
			.filter_map(|def| def.default.clone().map(|v| (def.key.clone(), v)))
			.collect();
		Self { values }
	}

	/// Snapshot from already typed values
	pub fn from_values<I, K>(values: I) -> Self
	where
		I: IntoIterator<Item = (K, SettingValue)>,
		K: Into<String>,
	{
		Self { values: values.into_iter().map(|(k, v)| (k.into(), v)).collect() }
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v))
	}
}

impl SettingsAccess for SettingsSnapshot {
	fn value(&self, key: &str) -> Option<&SettingValue> {
		self.values.get(key)
	}
}


// vim: ts=4
