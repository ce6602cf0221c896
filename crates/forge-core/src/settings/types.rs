//! Settings types and definitions
//!
//! Core types for the application settings record and its registry.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;

use crate::prelude::*;

/// Type alias for setting validator function
pub type SettingValidator = Box<dyn Fn(&SettingValue) -> FgResult<()> + Send + Sync>;

/// Setting value types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)] // No type tag - type inferred from SettingDefinition
pub enum SettingValue {
	Bool(bool), // Must be before Int to avoid bool -> int coercion
	Int(i64),
	String(String),
	Set(BTreeSet<String>),
}

impl SettingValue {
	/// Build a set value from anything yielding strings
	pub fn set<I, S>(items: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		SettingValue::Set(items.into_iter().map(Into::into).collect())
	}

	/// Check if this value matches the type of another value
	pub fn matches_type(&self, other: &SettingValue) -> bool {
		matches!(
			(self, other),
			(SettingValue::String(_), SettingValue::String(_))
				| (SettingValue::Int(_), SettingValue::Int(_))
				| (SettingValue::Bool(_), SettingValue::Bool(_))
				| (SettingValue::Set(_), SettingValue::Set(_))
		)
	}

	/// Get the type name for error messages
	pub fn type_name(&self) -> &'static str {
		match self {
			SettingValue::String(_) => "string",
			SettingValue::Int(_) => "int",
			SettingValue::Bool(_) => "bool",
			SettingValue::Set(_) => "set",
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			SettingValue::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			SettingValue::Int(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			SettingValue::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_set(&self) -> Option<&BTreeSet<String>> {
		match self {
			SettingValue::Set(s) => Some(s),
			_ => None,
		}
	}
}

/// Setting definition - defines metadata for each setting
pub struct SettingDefinition {
	/// Attribute name (e.g., "signup_enabled")
	pub key: String,

	/// Human-readable description
	pub description: String,

	/// Optional default value
	pub default: Option<SettingValue>,

	/// Whether this setting may stay unset. Optional settings without a
	/// default carry their type in `kind`.
	pub optional: bool,

	/// Type of the value when no default exists
	pub kind: Option<SettingValue>,

	/// Optional validation function
	pub validator: Option<SettingValidator>,
}

impl Debug for SettingDefinition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingDefinition")
			.field("key", &self.key)
			.field("description", &self.description)
			.field("default", &self.default)
			.field("optional", &self.optional)
			.field("kind", &self.kind)
			.field("validator", &self.validator.is_some())
			.finish()
	}
}

impl SettingDefinition {
	/// Create a builder for constructing a SettingDefinition
	pub fn builder(key: impl Into<String>) -> SettingDefinitionBuilder {
		SettingDefinitionBuilder::new(key)
	}

	/// Value whose variant describes the type of this setting
	pub fn type_witness(&self) -> Option<&SettingValue> {
		self.default.as_ref().or(self.kind.as_ref())
	}

	/// Type-check and run the validator on a candidate value
	pub fn check(&self, value: &SettingValue) -> FgResult<()> {
		if let Some(witness) = self.type_witness() {
			if !value.matches_type(witness) {
				return Err(Error::ValidationError(format!(
					"Type mismatch for setting '{}': expected {}, got {}",
					self.key,
					witness.type_name(),
					value.type_name()
				)));
			}
		}

		if let Some(validator) = &self.validator {
			validator(value)?;
		}

		Ok(())
	}
}

/// Builder for SettingDefinition with fluent API
pub struct SettingDefinitionBuilder {
	key: String,
	description: Option<String>,
	default: Option<SettingValue>,
	optional: bool,
	kind: Option<SettingValue>,
	validator: Option<SettingValidator>,
}

impl SettingDefinitionBuilder {
	pub fn new(key: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			description: None,
			default: None,
			optional: false,
			kind: None,
			validator: None,
		}
	}

	/// Set the description (required)
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Set the default value
	pub fn default(mut self, value: SettingValue) -> Self {
		self.default = Some(value);
		self
	}

	/// Mark this setting as optional, typed by the variant of `kind`
	pub fn optional(mut self, kind: SettingValue) -> Self {
		self.optional = true;
		self.kind = Some(kind);
		self
	}

	/// Set a validation function
	pub fn validator<F>(mut self, f: F) -> Self
	where
		F: Fn(&SettingValue) -> FgResult<()> + Send + Sync + 'static,
	{
		self.validator = Some(Box::new(f));
		self
	}

	/// Build the SettingDefinition
	pub fn build(self) -> FgResult<SettingDefinition> {
		let description = self
			.description
			.ok_or_else(|| Error::ConfigError("Setting description is required".into()))?;

		if self.default.is_none() && !self.optional {
			return Err(Error::ConfigError(format!(
				"Setting '{}' needs a default or must be optional",
				self.key
			)));
		}

		let def = SettingDefinition {
			key: self.key,
			description,
			default: self.default,
			optional: self.optional,
			kind: self.kind,
			validator: self.validator,
		};

		// A default must pass its own validator
		if let Some(default) = &def.default {
			def.check(default).map_err(|e| {
				Error::ConfigError(format!("Default of setting '{}' is invalid: {}", def.key, e))
			})?;
		}

		Ok(def)
	}
}

/// Mutable registry used during initialization
pub struct SettingsRegistry {
	definitions: HashMap<String, SettingDefinition>,
}

impl SettingsRegistry {
	pub fn new() -> Self {
		Self { definitions: HashMap::new() }
	}

	/// Register a new setting definition
	pub fn register(&mut self, def: SettingDefinition) -> FgResult<()> {
		if self.definitions.contains_key(&def.key) {
			return Err(Error::ConfigError(format!("Setting '{}' is already registered", def.key)));
		}

		debug!("Registering setting: {}", def.key);
		self.definitions.insert(def.key.clone(), def);
		Ok(())
	}

	/// Freeze the registry (make it immutable)
	pub fn freeze(self) -> FrozenSettingsRegistry {
		info!("Freezing settings registry with {} definitions", self.definitions.len());
		FrozenSettingsRegistry { definitions: self.definitions }
	}

	/// Get number of registered settings
	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	/// Check if registry is empty
	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

impl Default for SettingsRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Immutable registry shared by the service and snapshots
pub struct FrozenSettingsRegistry {
	definitions: HashMap<String, SettingDefinition>,
}

impl FrozenSettingsRegistry {
	/// Get a setting definition by key
	pub fn get(&self, key: &str) -> Option<&SettingDefinition> {
		self.definitions.get(key)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.definitions.contains_key(key)
	}

	/// List all registered settings
	pub fn list(&self) -> impl Iterator<Item = &SettingDefinition> {
		self.definitions.values()
	}

	/// Get number of registered settings
	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	/// Check if registry is empty
	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}


// vim: ts=4
