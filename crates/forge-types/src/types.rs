//! Common value types: visibility levels, SSH key types, repository storages

use serde::{Deserialize, Serialize};
use std::fmt;

// VisibilityLevel
//*****************
/// Visibility of a project, group or snippet.
///
/// The discriminants are the persisted integer codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityLevel {
	Private = 0,
	Internal = 10,
	Public = 20,
}

impl VisibilityLevel {
	/// All levels, in display order
	pub const ALL: [VisibilityLevel; 3] =
		[VisibilityLevel::Private, VisibilityLevel::Internal, VisibilityLevel::Public];

	pub fn values() -> &'static [VisibilityLevel] {
		&Self::ALL
	}

	pub fn as_str(self) -> &'static str {
		match self {
			VisibilityLevel::Private => "private",
			VisibilityLevel::Internal => "internal",
			VisibilityLevel::Public => "public",
		}
	}

	pub fn code(self) -> i64 {
		self as i64
	}

	/// Parse either the level name ("private") or its integer code ("0")
	pub fn parse(s: &str) -> Option<Self> {
		let s = s.trim();
		Self::ALL.into_iter().find(|level| {
			level.as_str().eq_ignore_ascii_case(s) || s.parse::<i64>().ok() == Some(level.code())
		})
	}
}

impl fmt::Display for VisibilityLevel {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

// KeyType
//*********
/// SSH public key algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
	Rsa,
	Dsa,
	Ecdsa,
	Ed25519,
}

impl KeyType {
	pub const ALL: [KeyType; 4] = [KeyType::Rsa, KeyType::Dsa, KeyType::Ecdsa, KeyType::Ed25519];

	pub fn as_str(self) -> &'static str {
		match self {
			KeyType::Rsa => "rsa",
			KeyType::Dsa => "dsa",
			KeyType::Ecdsa => "ecdsa",
			KeyType::Ed25519 => "ed25519",
		}
	}

	/// Name of the application setting holding the restriction for this key type
	pub fn restriction_setting(self) -> &'static str {
		match self {
			KeyType::Rsa => "rsa_key_restriction",
			KeyType::Dsa => "dsa_key_restriction",
			KeyType::Ecdsa => "ecdsa_key_restriction",
			KeyType::Ed25519 => "ed25519_key_restriction",
		}
	}

	pub fn parse(s: &str) -> Option<Self> {
		let s = s.trim();
		Self::ALL.into_iter().find(|t| t.as_str().eq_ignore_ascii_case(s))
	}
}

impl fmt::Display for KeyType {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A configured repository storage shard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageInfo {
	pub name: String,
	pub path: String,
}


// vim: ts=4
