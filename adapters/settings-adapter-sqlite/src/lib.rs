//! SQLite-backed store for the application settings record
//!
//! Each attribute is one row holding its JSON-encoded value. Missing rows fall
//! back to the defaults of the settings schema.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::{self, SqlitePool};

use forge_types::prelude::*;
use forge_types::settings_adapter::SettingsStore;

fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

#[derive(Debug)]
pub struct SettingsAdapterSqlite {
	db: SqlitePool,
}

impl SettingsAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> FgResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::Unavailable("settings database".into()))?;

		init_db(&db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;

		info!("Settings database opened at {}", path.as_ref().display());
		Ok(Self { db })
	}
}

async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS application_settings (
			name text NOT NULL,
			value text,
			PRIMARY KEY(name)
		)",
	)
	.execute(db)
	.await?;

	Ok(())
}

#[async_trait]
impl SettingsStore for SettingsAdapterSqlite {
	async fn read_settings(&self) -> FgResult<HashMap<String, serde_json::Value>> {
		let rows = sqlx::query("SELECT name, value FROM application_settings")
			.fetch_all(&self.db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		let mut settings = HashMap::with_capacity(rows.len());
		for row in rows {
			let name: String = row.try_get("name").map_err(|_| Error::DbError)?;
			let value: Option<String> = row.try_get("value").map_err(|_| Error::DbError)?;
			settings.insert(name, parse_value(value)?);
		}

		Ok(settings)
	}

	async fn read_setting(&self, name: &str) -> FgResult<Option<serde_json::Value>> {
		let row = sqlx::query("SELECT value FROM application_settings WHERE name = ?")
			.bind(name)
			.fetch_optional(&self.db)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		match row {
			Some(row) => {
				let value: Option<String> = row.try_get("value").map_err(|_| Error::DbError)?;
				Ok(Some(parse_value(value)?).filter(|v| !v.is_null()))
			}
			None => Ok(None),
		}
	}

	async fn update_settings(&self, changes: &[(String, Option<serde_json::Value>)]) -> FgResult<()> {
		let mut tx = self.db.begin().await.inspect_err(inspect).map_err(|_| Error::DbError)?;

		for (name, value) in changes {
			if let Some(val) = value {
				sqlx::query("INSERT OR REPLACE INTO application_settings (name, value) VALUES (?, ?)")
					.bind(name.as_str())
					.bind(val.to_string())
					.execute(&mut *tx)
					.await
					.inspect_err(inspect)
					.map_err(|_| Error::DbError)?;
			} else {
				// Delete setting if value is None
				sqlx::query("DELETE FROM application_settings WHERE name = ?")
					.bind(name.as_str())
					.execute(&mut *tx)
					.await
					.inspect_err(inspect)
					.map_err(|_| Error::DbError)?;
			}
		}

		tx.commit().await.inspect_err(inspect).map_err(|_| Error::DbError)?;
		debug!("Wrote {} settings", changes.len());
		Ok(())
	}
}

fn parse_value(value: Option<String>) -> FgResult<serde_json::Value> {
	match value {
		Some(v) => Ok(serde_json::from_str(&v)?),
		None => Ok(serde_json::Value::Null),
	}
}

// vim: ts=4
