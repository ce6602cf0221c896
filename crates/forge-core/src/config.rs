//! Instance configuration loaded from YAML
//!
//! This is the static, file-based side of the configuration: web protocol,
//! OAuth providers, repository storages and job queues. It is not editable
//! from the admin area, unlike the application settings record.

use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::path::Path;

use forge_types::catalog::{QueueCatalog, StorageCatalog};

use crate::catalog::is_form_based_provider;
use crate::prelude::*;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
	pub host: String,
	/// "http" or "https"
	pub protocol: String,
}

impl Default for WebConfig {
	fn default() -> Self {
		Self { host: "localhost".into(), protocol: "http".into() }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
	pub name: String,
	#[serde(default)]
	pub label: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OmniauthConfig {
	pub providers: Vec<ProviderConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RepositoriesConfig {
	/// Storages in document order
	#[serde(deserialize_with = "deserialize_storages")]
	pub storages: Vec<StorageInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SidekiqConfig {
	pub queues: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InstanceConfig {
	#[serde(alias = "gitlab")]
	pub web: WebConfig,
	pub omniauth: OmniauthConfig,
	pub repositories: RepositoriesConfig,
	pub sidekiq: SidekiqConfig,
}

fn deserialize_storages<'de, D>(deserializer: D) -> Result<Vec<StorageInfo>, D::Error>
where
	D: Deserializer<'de>,
{
	use serde::de::Error as _;

	let mapping = serde_yaml::Mapping::deserialize(deserializer)?;
	let mut storages = Vec::with_capacity(mapping.len());
	for (name, entry) in mapping {
		let name = name.as_str().ok_or_else(|| D::Error::custom("storage name must be a string"))?;
		let path = entry
			.get("path")
			.and_then(serde_yaml::Value::as_str)
			.ok_or_else(|| D::Error::custom(format!("storage '{}' has no path", name)))?;
		storages.push(StorageInfo { name: name.to_string(), path: path.to_string() });
	}
	Ok(storages)
}

impl InstanceConfig {
	pub fn from_yaml_str(yaml: &str) -> FgResult<Self> {
		let config: InstanceConfig = serde_yaml::from_str(yaml)?;
		config.validate()?;
		Ok(config)
	}

	pub fn from_file(path: impl AsRef<Path>) -> FgResult<Self> {
		let path = path.as_ref();
		let yaml = std::fs::read_to_string(path)?;
		let config = Self::from_yaml_str(&yaml)?;
		info!(
			"Loaded instance config from {} ({} storages, {} queues)",
			path.display(),
			config.repositories.storages.len(),
			config.sidekiq.queues.len()
		);
		Ok(config)
	}

	pub fn validate(&self) -> FgResult<()> {
		if !matches!(self.web.protocol.as_str(), "http" | "https") {
			return Err(Error::ConfigError(format!(
				"web.protocol must be http or https, got '{}'",
				self.web.protocol
			)));
		}

		let mut seen = HashSet::new();
		if let Some(dup) = self.repositories.storages.iter().find(|s| !seen.insert(s.name.as_str())) {
			return Err(Error::ConfigError(format!("Duplicate repository storage '{}'", dup.name)));
		}

		Ok(())
	}

	/// Configured OAuth providers that sign in through a redirect button
	pub fn button_based_providers(&self) -> Vec<&str> {
		self.omniauth
			.providers
			.iter()
			.map(|p| p.name.as_str())
			.filter(|name| !is_form_based_provider(name))
			.collect()
	}
}

impl StorageCatalog for InstanceConfig {
	fn list_storages(&self) -> FgResult<Vec<StorageInfo>> {
		Ok(self.repositories.storages.clone())
	}
}

impl QueueCatalog for InstanceConfig {
	fn list_queues(&self) -> FgResult<Vec<String>> {
		Ok(self.sidekiq.queues.clone())
	}
}


// vim: ts=4
