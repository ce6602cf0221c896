//! Persistence interface for the application settings record

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;

use crate::prelude::*;

/// Backing store of the application settings record.
///
/// Values are kept as JSON; the settings core owns typing and defaults.
#[async_trait]
pub trait SettingsStore: Debug + Send + Sync {
	/// Read every stored attribute
	async fn read_settings(&self) -> FgResult<HashMap<String, serde_json::Value>>;

	/// Read a single attribute, `None` if it was never stored
	async fn read_setting(&self, name: &str) -> FgResult<Option<serde_json::Value>>;

	/// Write a batch of attributes. A `None` value removes the stored attribute
	/// so that it falls back to its default.
	async fn update_settings(&self, changes: &[(String, Option<serde_json::Value>)])
		-> FgResult<()>;

	async fn update_setting(&self, name: &str, value: Option<serde_json::Value>) -> FgResult<()> {
		self.update_settings(&[(name.to_string(), value)]).await
	}
}

// vim: ts=4
