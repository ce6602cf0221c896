//! SSH public key size capabilities

use std::collections::BTreeSet;

use forge_types::catalog::KeySizeCapabilityProvider;

use crate::prelude::*;

/// Restriction value meaning "keys of this type are not accepted at all".
/// Shared by every key type and never a valid bit size.
pub const FORBIDDEN_KEY_VALUE: i64 = -1;

/// Restriction value meaning "any size is accepted"
pub const ALLOWED_KEY_VALUE: i64 = 0;

/// Minimum sizes that can be required, per key type
pub fn supported_sizes(key_type: KeyType) -> &'static [u32] {
	match key_type {
		KeyType::Rsa => &[1024, 2048, 3072, 4096],
		KeyType::Dsa => &[1024, 2048, 3072],
		KeyType::Ecdsa => &[256, 384, 521],
		KeyType::Ed25519 => &[256],
	}
}

/// Whether `value` is acceptable for a `*_key_restriction` attribute
pub fn is_valid_restriction(value: i64) -> bool {
	value == ALLOWED_KEY_VALUE || value == FORBIDDEN_KEY_VALUE || value > 0
}

/// Capability provider backed by the built-in size table
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticKeySizes;

impl KeySizeCapabilityProvider for StaticKeySizes {
	fn supported_sizes(&self, key_type: KeyType) -> FgResult<BTreeSet<u32>> {
		Ok(supported_sizes(key_type).iter().copied().collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_sizes_are_strictly_increasing() {
		for key_type in KeyType::ALL {
			let sizes = supported_sizes(key_type);
			assert!(!sizes.is_empty());
			assert!(sizes.windows(2).all(|w| w[0] < w[1]), "{} sizes not increasing", key_type);
		}
	}

	#[test]
	fn test_forbidden_is_out_of_band() {
		for key_type in KeyType::ALL {
			assert!(
				supported_sizes(key_type)
					.iter()
					.all(|&bits| i64::from(bits) != FORBIDDEN_KEY_VALUE)
			);
		}
		assert!(is_valid_restriction(FORBIDDEN_KEY_VALUE));
		assert!(is_valid_restriction(0));
		assert!(is_valid_restriction(2048));
		assert!(!is_valid_restriction(-2));
	}

	#[test]
	fn test_static_provider() {
		let sizes = StaticKeySizes.supported_sizes(KeyType::Ecdsa).expect("static sizes");
		assert_eq!(sizes.into_iter().collect::<Vec<_>>(), vec![256, 384, 521]);
	}
}

// vim: ts=4
