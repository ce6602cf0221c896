//! Settings service with snapshot caching, whitelist filtering and validation

use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use forge_types::settings_adapter::SettingsStore;

use super::snapshot::SettingsSnapshot;
use super::types::{FrozenSettingsRegistry, SettingValue};
use crate::prelude::*;
use crate::whitelist;

/// Result of a bulk update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
	/// Attributes written to the store
	pub applied: Vec<String>,
	/// Attributes dropped because they are not on the whitelist
	pub ignored: Vec<String>,
}

/// Settings service - loads snapshots of the application settings record and
/// applies updates to it
pub struct SettingsService {
	registry: Arc<FrozenSettingsRegistry>,
	store: Arc<dyn SettingsStore>,
	current: RwLock<Option<Arc<SettingsSnapshot>>>,
	/// Bumped on every invalidation, under the `current` write lock
	generation: AtomicU64,
}

impl SettingsService {
	pub fn new(registry: Arc<FrozenSettingsRegistry>, store: Arc<dyn SettingsStore>) -> Self {
		Self { registry, store, current: RwLock::new(None), generation: AtomicU64::new(0) }
	}

	/// Current snapshot, loaded from the store on first use or after an update
	pub async fn snapshot(&self) -> FgResult<Arc<SettingsSnapshot>> {
		let cached = self.current.read().clone();
		if let Some(snapshot) = cached {
			debug!("Settings snapshot cache hit");
			return Ok(snapshot);
		}

		self.reload().await
	}

	/// Load a fresh snapshot from the store and make it current.
	///
	/// If an update invalidates the cache while the store is being read, the
	/// loaded snapshot is still returned but not cached.
	pub async fn reload(&self) -> FgResult<Arc<SettingsSnapshot>> {
		let generation = self.generation.load(Ordering::Acquire);
		let record = self.store.read_settings().await?;
		let snapshot = Arc::new(SettingsSnapshot::from_record(&self.registry, &record)?);
		info!("Loaded settings snapshot ({} stored attributes)", record.len());

		let mut current = self.current.write();
		if self.generation.load(Ordering::Acquire) == generation {
			*current = Some(Arc::clone(&snapshot));
		} else {
			debug!("Settings changed during reload, snapshot not cached");
		}
		Ok(snapshot)
	}

	/// Drop the cached snapshot; the next `snapshot()` call reads the store
	pub fn invalidate(&self) {
		let mut current = self.current.write();
		self.generation.fetch_add(1, Ordering::AcqRel);
		*current = None;
	}

	/// Resolved value of a single attribute
	pub async fn get(&self, key: &str) -> FgResult<SettingValue> {
		let def = self
			.registry
			.get(key)
			.ok_or_else(|| Error::ValidationError(format!("Unknown setting: {}", key)))?;

		if let Some(json_value) = self.store.read_setting(key).await? {
			let value = serde_json::from_value::<SettingValue>(json_value)
				.map_err(|e| Error::ValidationError(format!("Invalid setting value: {}", e)))?;
			def.check(&value)?;
			return Ok(value);
		}

		def.default.clone().ok_or(Error::NotFound)
	}

	/// Update a single attribute. Attributes outside the whitelist are refused.
	pub async fn set(&self, key: &str, value: SettingValue) -> FgResult<()> {
		if !whitelist::is_whitelisted(key) {
			warn!("Refusing to update non-whitelisted setting '{}'", key);
			return Err(Error::PermissionDenied);
		}

		self.update_attributes([(key.to_string(), value)]).await?;
		Ok(())
	}

	/// Mass-assign attributes.
	///
	/// Names outside the whitelist are dropped and reported in the outcome.
	/// Every kept value is type-checked and validated before anything is
	/// written, so a rejected value leaves the record untouched.
	pub async fn update_attributes<I>(&self, params: I) -> FgResult<UpdateOutcome>
	where
		I: IntoIterator<Item = (String, SettingValue)>,
	{
		let mut outcome = UpdateOutcome::default();
		let mut changes = Vec::new();

		for (key, value) in params {
			if !whitelist::is_whitelisted(&key) {
				warn!("Unpermitted setting attribute: {}", key);
				outcome.ignored.push(key);
				continue;
			}

			let def = self
				.registry
				.get(&key)
				.ok_or_else(|| Error::ConfigError(format!("Whitelisted setting '{}' is not registered", key)))?;
			def.check(&value)?;

			changes.push((key, Some(serde_json::to_value(&value)?)));
		}

		if !changes.is_empty() {
			self.store.update_settings(&changes).await?;
			self.invalidate();
			outcome.applied = changes.into_iter().map(|(key, _)| key).collect();
			info!("Updated settings: {}", outcome.applied.join(", "));
		}

		Ok(outcome)
	}

	/// Remove a stored attribute so it falls back to its default
	pub async fn reset(&self, key: &str) -> FgResult<()> {
		if !self.registry.contains(key) {
			return Err(Error::ValidationError(format!("Unknown setting: {}", key)));
		}

		self.store.update_setting(key, None).await?;
		self.invalidate();

		info!("Setting '{}' reset to default", key);
		Ok(())
	}

	/// Get reference to registry (for listing all settings)
	pub fn registry(&self) -> &Arc<FrozenSettingsRegistry> {
		&self.registry
	}
}

// vim: ts=4
